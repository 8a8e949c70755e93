//! Storage-facing tree operations.
//!
//! Each call performs exactly two reads (all categories, all posts), builds a
//! request-scoped [`CategoryIndex`], and hands back assembled or formatted
//! trees. Storage failures propagate — an empty forest always means the
//! store really is empty.

use arbor_core::format::{format_forest, format_node};
use arbor_core::tree::{CategoryIndex, CategoryNode, TreeError};

use crate::error::DatabaseError;
use crate::service::ArborService;

impl ArborService {
    /// Load the full snapshot and build the per-request index.
    async fn category_index(&self) -> Result<CategoryIndex, DatabaseError> {
        let categories = self.load_all_categories().await?;
        let posts = self.load_all_posts().await?;
        let index = CategoryIndex::build(categories, posts)
            .map_err(|TreeError::CycleDetected { id }| DatabaseError::CyclicHierarchy { id })?;

        if !index.orphans().is_empty() {
            tracing::warn!(
                orphans = ?index.orphans(),
                "categories with dangling parents promoted to roots"
            );
        }
        Ok(index)
    }

    /// Assemble the category forest, optionally bounded to `max_depth`
    /// levels.
    pub async fn category_forest(
        &self,
        max_depth: Option<usize>,
    ) -> Result<Vec<CategoryNode>, DatabaseError> {
        Ok(self.category_index().await?.assemble_forest(max_depth))
    }

    /// Assemble the full-depth subtree rooted at `id`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` when no category has this id.
    pub async fn category_subtree(&self, id: i64) -> Result<CategoryNode, DatabaseError> {
        self.category_index()
            .await?
            .assemble_subtree(id)
            .ok_or(DatabaseError::NotFound { entity: "category", id })
    }

    /// Forest formatted into generic nested records for serialization.
    pub async fn formatted_category_tree(
        &self,
        max_depth: Option<usize>,
    ) -> Result<Vec<serde_json::Value>, DatabaseError> {
        Ok(format_forest(&self.category_forest(max_depth).await?))
    }

    /// Subtree formatted into a generic nested record.
    pub async fn formatted_category_subtree(
        &self,
        id: i64,
    ) -> Result<serde_json::Value, DatabaseError> {
        Ok(format_node(&self.category_subtree(id).await?))
    }
}
