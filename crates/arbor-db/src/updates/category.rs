//! Category update builder.
//!
//! Outer `Option` = "field present in the update"; inner `Option` on
//! `parent_id` = "set to this parent / clear to root".

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

impl CategoryUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.name.is_none()
            && self.parent_id.is_none()
            && self.sort_order.is_none()
            && self.status.is_none()
    }
}

pub struct CategoryUpdateBuilder(CategoryUpdate);

impl CategoryUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CategoryUpdate::default())
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.0.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn parent_id(mut self, parent_id: Option<i64>) -> Self {
        self.0.parent_id = Some(parent_id);
        self
    }

    #[must_use]
    pub fn sort_order(mut self, sort_order: i64) -> Self {
        self.0.sort_order = Some(sort_order);
        self
    }

    #[must_use]
    pub fn status(mut self, status: i64) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> CategoryUpdate {
        self.0
    }
}

impl Default for CategoryUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
