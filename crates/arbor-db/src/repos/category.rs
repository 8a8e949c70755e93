//! Category repository — CRUD and the flat (non-hierarchical) listing.

use chrono::Utc;

use arbor_core::entities::{Category, CategoryWithPosts};

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::ArborService;
use crate::updates::category::CategoryUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, slug, name, parent_id, sort_order, status, created_at";

pub(crate) fn row_to_category(row: &libsql::Row) -> Result<Category, DatabaseError> {
    Ok(Category {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        parent_id: row.get::<Option<i64>>(3)?,
        sort_order: row.get(4)?,
        status: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Equality filters for the flat listing. All present fields apply
/// conjunctively; when both `parent_id` and `slug` are absent the listing
/// defaults to roots only.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub status: Option<i64>,
    pub parent_id: Option<i64>,
    pub slug: Option<String>,
}

impl ArborService {
    pub async fn create_category(
        &self,
        slug: &str,
        name: &str,
        parent_id: Option<i64>,
        sort_order: i64,
        status: i64,
    ) -> Result<Category, DatabaseError> {
        if let Some(parent_id) = parent_id {
            // Typed not-found beats a raw FK violation at the boundary.
            self.get_category(parent_id).await?;
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO categories (slug, name, parent_id, sort_order, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![slug, name, parent_id, sort_order, status, now.to_rfc3339()],
            )
            .await?;
        let id = self.db().conn().last_insert_rowid();

        Ok(Category {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
            parent_id,
            sort_order,
            status,
            created_at: now,
        })
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM categories WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "category", id })?;
        row_to_category(&row)
    }

    pub async fn update_category(
        &self,
        id: i64,
        update: CategoryUpdate,
    ) -> Result<Category, DatabaseError> {
        if update.is_empty() {
            return self.get_category(id).await;
        }

        if let Some(Some(parent_id)) = update.parent_id {
            if parent_id == id {
                return Err(DatabaseError::InvalidState(format!(
                    "category {id} cannot be its own parent"
                )));
            }
            self.get_category(parent_id).await?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref slug) = update.slug {
            sets.push(format!("slug = ?{}", params.len() + 1));
            params.push(slug.clone().into());
        }
        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{}", params.len() + 1));
            params.push(name.clone().into());
        }
        if let Some(parent_id) = update.parent_id {
            sets.push(format!("parent_id = ?{}", params.len() + 1));
            params.push(parent_id.map_or(libsql::Value::Null, Into::into));
        }
        if let Some(sort_order) = update.sort_order {
            sets.push(format!("sort_order = ?{}", params.len() + 1));
            params.push(sort_order.into());
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{}", params.len() + 1));
            params.push(status.into());
        }

        params.push(id.into());
        let sql = format!(
            "UPDATE categories SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_category(id).await
    }

    /// Delete a category. Refuses while children or posts still reference it.
    pub async fn delete_category(&self, id: i64) -> Result<(), DatabaseError> {
        self.get_category(id).await?;

        let children = self
            .count_rows("SELECT COUNT(*) FROM categories WHERE parent_id = ?1", id)
            .await?;
        let posts = self
            .count_rows("SELECT COUNT(*) FROM posts WHERE category_id = ?1", id)
            .await?;
        if children > 0 || posts > 0 {
            return Err(DatabaseError::InvalidState(format!(
                "category {id} still has {children} children and {posts} posts"
            )));
        }

        self.db()
            .conn()
            .execute("DELETE FROM categories WHERE id = ?1", [id])
            .await?;
        Ok(())
    }

    /// Complete category snapshot, ordered for deterministic assembly.
    pub async fn load_all_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM categories ORDER BY sort_order, name"),
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }
        Ok(categories)
    }

    /// Flat listing with posts preloaded and no children. Filters are
    /// evaluated in SQL, not in memory.
    pub async fn list_categories(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<CategoryWithPosts>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(status) = filter.status {
            clauses.push(format!("status = ?{}", params.len() + 1));
            params.push(status.into());
        }
        if let Some(parent_id) = filter.parent_id {
            clauses.push(format!("parent_id = ?{}", params.len() + 1));
            params.push(parent_id.into());
        }
        if let Some(ref slug) = filter.slug {
            clauses.push(format!("slug = ?{}", params.len() + 1));
            params.push(slug.clone().into());
        }
        // Roots only unless an explicit parent or slug constraint says otherwise.
        if filter.parent_id.is_none() && filter.slug.is_none() {
            clauses.push("parent_id IS NULL".to_string());
        }

        let sql = format!(
            "SELECT {SELECT_COLS} FROM categories WHERE {} ORDER BY sort_order, name",
            clauses.join(" AND ")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }

        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        let mut posts_by_category = self.posts_for_categories(&ids).await?;

        Ok(categories
            .into_iter()
            .map(|category| {
                let posts = posts_by_category.remove(&category.id).unwrap_or_default();
                CategoryWithPosts { category, posts }
            })
            .collect())
    }

    async fn count_rows(&self, sql: &str, id: i64) -> Result<i64, DatabaseError> {
        let mut rows = self.db().conn().query(sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Query("COUNT returned no row".into()))?;
        Ok(row.get(0)?)
    }
}
