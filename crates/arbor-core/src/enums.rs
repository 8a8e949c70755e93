//! Status enums for Arbor entities.
//!
//! All enums use `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]`, matching the TEXT values stored in
//! SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication status of a post.
///
/// ```text
/// draft → scheduled → published → archived
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl PostStatus {
    /// String representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_matches_as_str() {
        for status in [
            PostStatus::Draft,
            PostStatus::Scheduled,
            PostStatus::Published,
            PostStatus::Archived,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().into()));
        }
    }

    #[test]
    fn deserializes_from_sql_text() {
        let status: PostStatus = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(status, PostStatus::Published);
    }
}
