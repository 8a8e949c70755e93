use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Post;

/// A content category. `parent_id = None` marks a root; the self-referencing
/// parent link makes categories form a forest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub parent_id: Option<i64>,
    pub sort_order: i64,
    pub status: i64,
    pub created_at: DateTime<Utc>,
}

/// A category with its posts preloaded, as returned by the flat
/// (non-hierarchical) listing. Carries no children.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryWithPosts {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
}
