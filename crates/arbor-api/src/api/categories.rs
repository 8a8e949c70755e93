//! Category route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use arbor_core::entities::{Category, CategoryWithPosts};
use arbor_core::responses::ApiResponse;
use arbor_db::repos::category::CategoryFilter;
use arbor_db::updates::category::CategoryUpdate;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the flat listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<i64>,
    pub parent_id: Option<i64>,
    pub slug: Option<String>,
}

/// `GET /api/categories`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryWithPosts>>>, ApiError> {
    let filter = CategoryFilter {
        status: query.status,
        parent_id: query.parent_id,
        slug: query.slug,
    };
    let categories = state.service.list_categories(&filter).await?;
    Ok(Json(ApiResponse::success(categories)))
}

#[derive(Debug, Default, Deserialize)]
pub struct TreeQuery {
    pub depth: Option<i64>,
}

/// `GET /api/categories/tree` — formatted forest; `depth` bounds the levels,
/// absent means unbounded.
pub async fn tree(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, ApiError> {
    let max_depth = parse_depth(query.depth)?;
    let records = state.service.formatted_category_tree(max_depth).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// `GET /api/categories/:id`
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let id = parse_id(&id)?;
    let category = state.service.get_category(id).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// `GET /api/categories/:id/tree` — formatted full-depth subtree.
pub async fn subtree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.service.formatted_category_subtree(id).await?;
    Ok(Json(ApiResponse::success(record)))
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_status")]
    pub status: i64,
}

const fn default_status() -> i64 {
    1
}

/// `POST /api/categories`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    if request.slug.trim().is_empty() || request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("slug and name are required".into()));
    }
    let category = state
        .service
        .create_category(
            &request.slug,
            &request.name,
            request.parent_id,
            request.sort_order,
            request.status,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(category))))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    /// Present-and-null clears the parent; absent leaves it untouched.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<i64>>,
    pub sort_order: Option<i64>,
    pub status: Option<i64>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// `PUT /api/categories/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let id = parse_id(&id)?;
    let update = CategoryUpdate {
        slug: request.slug,
        name: request.name,
        parent_id: request.parent_id,
        sort_order: request.sort_order,
        status: request.status,
    };
    let category = state.service.update_category(id, update).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// `DELETE /api/categories/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete_category(id).await?;
    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": id }))))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("invalid category id '{raw}'")))
}

fn parse_depth(depth: Option<i64>) -> Result<Option<usize>, ApiError> {
    match depth {
        None => Ok(None),
        Some(d) if d > 0 => usize::try_from(d)
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("depth {d} out of range"))),
        Some(d) => Err(ApiError::BadRequest(format!(
            "depth must be positive, got {d}"
        ))),
    }
}
