//! Tree formatting into generic nested records.
//!
//! Converts an assembled forest into `serde_json` maps suitable for direct
//! serialization: category scalars plus a `posts` key (only when posts exist)
//! and a `children` key (only when children exist). Post records carry an
//! explicit `category: null` so the post → category back-reference is never
//! serialized.

use serde_json::{Map, Value, json};

use crate::entities::Post;
use crate::tree::CategoryNode;

/// Format an ordered sequence of assembled nodes.
#[must_use]
pub fn format_forest(nodes: &[CategoryNode]) -> Vec<Value> {
    nodes.iter().map(format_node).collect()
}

/// Format a single node and, recursively, its children.
#[must_use]
pub fn format_node(node: &CategoryNode) -> Value {
    let mut record = Map::new();
    record.insert("id".into(), json!(node.category.id));
    record.insert("name".into(), json!(node.category.name));
    record.insert("slug".into(), json!(node.category.slug));
    record.insert("parent_id".into(), json!(node.category.parent_id));
    record.insert("sort_order".into(), json!(node.category.sort_order));
    record.insert("status".into(), json!(node.category.status));
    record.insert("created_at".into(), json!(node.category.created_at));

    if !node.posts.is_empty() {
        record.insert(
            "posts".into(),
            Value::Array(node.posts.iter().map(format_post).collect()),
        );
    }
    if !node.children.is_empty() {
        record.insert(
            "children".into(),
            Value::Array(node.children.iter().map(format_node).collect()),
        );
    }
    Value::Object(record)
}

fn format_post(post: &Post) -> Value {
    let mut record = Map::new();
    record.insert("id".into(), json!(post.id));
    record.insert("slug".into(), json!(post.slug));
    record.insert("title".into(), json!(post.title));
    record.insert("summary".into(), json!(post.summary));
    record.insert("content".into(), json!(post.content));
    record.insert("cover_image".into(), json!(post.cover_image));
    record.insert("status".into(), json!(post.status));
    record.insert("is_featured".into(), json!(post.is_featured));
    record.insert("published_at".into(), json!(post.published_at));
    record.insert("created_at".into(), json!(post.created_at));
    record.insert("updated_at".into(), json!(post.updated_at));
    record.insert("category_id".into(), json!(post.category_id));
    record.insert("category".into(), Value::Null);
    Value::Object(record)
}
