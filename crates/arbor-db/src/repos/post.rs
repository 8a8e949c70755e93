//! Post repository — read-only loaders feeding tree assembly and the flat
//! listing. Posts are written by migrations/seeding, not through this
//! service.

use std::collections::HashMap;

use arbor_core::entities::Post;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_datetime};
use crate::service::ArborService;

pub(crate) const SELECT_COLS: &str = "id, slug, title, summary, content, cover_image, status, \
     is_featured, published_at, created_at, updated_at, category_id";

pub(crate) fn row_to_post(row: &libsql::Row) -> Result<Post, DatabaseError> {
    Ok(Post {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        summary: get_opt_string(row, 3)?,
        content: row.get(4)?,
        cover_image: get_opt_string(row, 5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        is_featured: row.get::<i64>(7)? != 0,
        published_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
        category_id: row.get(11)?,
    })
}

impl ArborService {
    /// Complete post snapshot, grouped-friendly ordering.
    pub async fn load_all_posts(&self) -> Result<Vec<Post>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM posts ORDER BY category_id, id"),
                (),
            )
            .await?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(row_to_post(&row)?);
        }
        Ok(posts)
    }

    /// Posts for the given categories, grouped by owning category id.
    /// Within a group, query result order (ascending id) is preserved.
    pub async fn posts_for_categories(
        &self,
        category_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Post>>, DatabaseError> {
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders: Vec<String> = (1..=category_ids.len())
            .map(|idx| format!("?{idx}"))
            .collect();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM posts WHERE category_id IN ({}) ORDER BY category_id, id",
            placeholders.join(", ")
        );
        let params: Vec<libsql::Value> = category_ids.iter().map(|&id| id.into()).collect();

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut grouped: HashMap<i64, Vec<Post>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            let post = row_to_post(&row)?;
            grouped.entry(post.category_id).or_default().push(post);
        }
        Ok(grouped)
    }
}
