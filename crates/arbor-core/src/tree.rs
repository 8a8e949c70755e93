//! Category-tree assembly.
//!
//! Materializes a forest of category nodes from two flat result sets: the
//! complete set of category rows and the complete set of post rows. The index
//! is rebuilt per request and lives for exactly one read operation; nothing
//! here is cached or shared across calls.
//!
//! Children are grouped by parent id and sorted once at build time, so
//! assembly is linear in the number of categories and two runs over the same
//! snapshot produce identical output.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::entities::{Category, Post};

/// Errors raised while indexing a category snapshot.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The parent chain starting at `id` loops back on itself.
    #[error("cyclic category hierarchy at id {id}")]
    CycleDetected { id: i64 },
}

/// An assembled category node with posts and children attached.
///
/// `posts` and `children` are omitted from the serialized form when empty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

/// Lookup structures built once per request from flat category and post rows.
pub struct CategoryIndex {
    categories: HashMap<i64, Category>,
    posts: HashMap<i64, Vec<Post>>,
    children: HashMap<i64, Vec<i64>>,
    roots: Vec<i64>,
    orphans: Vec<i64>,
}

impl CategoryIndex {
    /// Build the index: category-by-id, posts-grouped-by-category, and
    /// children-grouped-by-parent.
    ///
    /// Posts whose owning category is missing from the snapshot are dropped.
    /// A category whose `parent_id` does not resolve is promoted to a root
    /// and recorded in [`orphans`](Self::orphans). Child lists and the root
    /// list are sorted by `(sort_order, name, id)` so every later traversal
    /// is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CycleDetected`] when a parent chain loops.
    pub fn build(categories: Vec<Category>, posts: Vec<Post>) -> Result<Self, TreeError> {
        let mut by_id: HashMap<i64, Category> = HashMap::with_capacity(categories.len());
        for category in categories {
            by_id.insert(category.id, category);
        }

        detect_cycles(&by_id)?;

        let mut by_category: HashMap<i64, Vec<Post>> = HashMap::new();
        for post in posts {
            if by_id.contains_key(&post.category_id) {
                by_category.entry(post.category_id).or_default().push(post);
            }
        }

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut roots = Vec::new();
        let mut orphans = Vec::new();
        for category in by_id.values() {
            match category.parent_id {
                Some(parent_id) if by_id.contains_key(&parent_id) => {
                    children.entry(parent_id).or_default().push(category.id);
                }
                Some(_) => {
                    orphans.push(category.id);
                    roots.push(category.id);
                }
                None => roots.push(category.id),
            }
        }

        let sort_key = |id: &i64| {
            let category = &by_id[id];
            (category.sort_order, category.name.clone(), category.id)
        };
        roots.sort_by_key(sort_key);
        for ids in children.values_mut() {
            ids.sort_by_key(sort_key);
        }
        orphans.sort_unstable();

        Ok(Self {
            categories: by_id,
            posts: by_category,
            children,
            roots,
            orphans,
        })
    }

    /// Number of categories in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Ids of categories whose declared parent did not resolve, in ascending
    /// order. They appear as roots in assembled forests.
    #[must_use]
    pub fn orphans(&self) -> &[i64] {
        &self.orphans
    }

    /// Assemble the forest, optionally bounded to `max_depth` levels.
    ///
    /// Roots sit at depth 0. With `max_depth = Some(d)` only nodes at depth
    /// `< d` appear; bounded-out nodes are absent entirely, never included
    /// with empty children.
    #[must_use]
    pub fn assemble_forest(&self, max_depth: Option<usize>) -> Vec<CategoryNode> {
        if max_depth == Some(0) {
            return Vec::new();
        }
        self.roots
            .iter()
            .map(|&id| self.assemble_node(id, 0, max_depth))
            .collect()
    }

    /// Assemble the full-depth subtree rooted at `root_id`, or `None` when
    /// the id is not part of the snapshot.
    #[must_use]
    pub fn assemble_subtree(&self, root_id: i64) -> Option<CategoryNode> {
        self.categories
            .contains_key(&root_id)
            .then(|| self.assemble_node(root_id, 0, None))
    }

    // Post-order: children are fully assembled before the node is built.
    fn assemble_node(&self, id: i64, depth: usize, max_depth: Option<usize>) -> CategoryNode {
        let children = if max_depth.is_none_or(|limit| depth + 1 < limit) {
            self.children.get(&id).map_or_else(Vec::new, |ids| {
                ids.iter()
                    .map(|&child| self.assemble_node(child, depth + 1, max_depth))
                    .collect()
            })
        } else {
            Vec::new()
        };

        CategoryNode {
            category: self.categories[&id].clone(),
            posts: self.posts.get(&id).cloned().unwrap_or_default(),
            children,
        }
    }
}

/// Walk every parent chain once, coloring nodes as on-chain or settled.
/// Dangling parent references terminate a chain and are not cycles.
fn detect_cycles(categories: &HashMap<i64, Category>) -> Result<(), TreeError> {
    const ON_CHAIN: u8 = 1;
    const SETTLED: u8 = 2;

    let mut ids: Vec<i64> = categories.keys().copied().collect();
    ids.sort_unstable();

    let mut marks: HashMap<i64, u8> = HashMap::with_capacity(categories.len());
    for start in ids {
        if marks.contains_key(&start) {
            continue;
        }
        let mut chain = Vec::new();
        let mut current = Some(start);
        while let Some(id) = current {
            match marks.get(&id) {
                Some(&ON_CHAIN) => return Err(TreeError::CycleDetected { id }),
                Some(&SETTLED) => break,
                _ => {}
            }
            marks.insert(id, ON_CHAIN);
            chain.push(id);
            current = categories
                .get(&id)
                .and_then(|category| category.parent_id)
                .filter(|parent_id| categories.contains_key(parent_id));
        }
        for id in chain {
            marks.insert(id, SETTLED);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::PostStatus;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn category(id: i64, name: &str, parent_id: Option<i64>, sort_order: i64) -> Category {
        Category {
            id,
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            parent_id,
            sort_order,
            status: 1,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn post(id: i64, category_id: i64) -> Post {
        Post {
            id,
            slug: format!("post-{id}"),
            title: format!("Post {id}"),
            summary: None,
            content: "body".into(),
            cover_image: None,
            status: PostStatus::Published,
            is_featured: false,
            published_at: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
            category_id,
        }
    }

    /// Tech(1) → [AI(2) → LLMs(4), Hardware(3)], post A on AI.
    fn sample_index() -> CategoryIndex {
        let categories = vec![
            category(1, "Tech", None, 0),
            category(2, "AI", Some(1), 0),
            category(3, "Hardware", Some(1), 1),
            category(4, "LLMs", Some(2), 0),
        ];
        CategoryIndex::build(categories, vec![post(10, 2)]).unwrap()
    }

    #[test]
    fn forest_completeness() {
        let categories = vec![
            category(1, "Tech", None, 1),
            category(2, "Life", None, 0),
            category(3, "AI", Some(1), 0),
        ];
        let index = CategoryIndex::build(categories, vec![]).unwrap();
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());

        let forest = index.assemble_forest(None);
        let root_ids: Vec<i64> = forest.iter().map(|node| node.category.id).collect();
        assert_eq!(root_ids, vec![2, 1], "every parentless category is a root, sorted");
    }

    #[test]
    fn full_depth_assembly() {
        let forest = sample_index().assemble_forest(None);
        assert_eq!(forest.len(), 1);

        let tech = &forest[0];
        assert_eq!(tech.category.name, "Tech");
        let child_names: Vec<&str> = tech
            .children
            .iter()
            .map(|node| node.category.name.as_str())
            .collect();
        assert_eq!(child_names, vec!["AI", "Hardware"]);
        assert_eq!(tech.children[0].children[0].category.name, "LLMs");
    }

    #[rstest]
    #[case(Some(1), 0)] // roots only
    #[case(Some(2), 2)] // roots + children
    #[case(Some(3), 2)] // full tree of the sample
    #[case(None, 2)]
    fn depth_bound(#[case] max_depth: Option<usize>, #[case] tech_children: usize) {
        let forest = sample_index().assemble_forest(max_depth);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), tech_children);
    }

    #[test]
    fn depth_bound_omits_nodes_entirely() {
        let forest = sample_index().assemble_forest(Some(2));
        let ai = &forest[0].children[0];
        assert_eq!(ai.category.name, "AI");
        assert!(ai.children.is_empty(), "LLMs is absent, not pruned-empty");
        // Posts remain visible on nodes inside the bound.
        assert_eq!(ai.posts.len(), 1);
        assert_eq!(ai.posts[0].id, 10);
    }

    #[test]
    fn depth_zero_is_empty_forest() {
        assert!(sample_index().assemble_forest(Some(0)).is_empty());
    }

    #[test]
    fn subtree_found() {
        let node = sample_index().assemble_subtree(2).unwrap();
        assert_eq!(node.category.name, "AI");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].category.name, "LLMs");
        assert_eq!(node.posts.len(), 1);
    }

    #[test]
    fn subtree_not_found() {
        assert!(sample_index().assemble_subtree(999).is_none());
    }

    #[test]
    fn posts_attach_to_owning_node_only() {
        let categories = vec![category(1, "Tech", None, 0), category(2, "AI", Some(1), 0)];
        let posts = vec![post(10, 2), post(11, 2), post(12, 1)];
        let index = CategoryIndex::build(categories, posts).unwrap();
        let forest = index.assemble_forest(None);

        let tech = &forest[0];
        assert_eq!(tech.posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![12]);
        let ai = &tech.children[0];
        assert_eq!(ai.posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![10, 11]);
    }

    #[test]
    fn post_attachment_idempotent_across_assemblies() {
        let index = sample_index();
        let first = index.assemble_forest(None);
        let second = index.assemble_forest(None);
        assert_eq!(first[0].children[0].posts, second[0].children[0].posts);
        assert_eq!(first[0].children[0].posts.len(), 1, "no duplication");
    }

    #[test]
    fn orphan_posts_are_dropped() {
        let index = CategoryIndex::build(vec![category(1, "Tech", None, 0)], vec![post(10, 42)])
            .unwrap();
        let forest = index.assemble_forest(None);
        assert!(forest[0].posts.is_empty());
    }

    #[test]
    fn dangling_parent_promotes_to_root() {
        let categories = vec![
            category(1, "Tech", None, 0),
            category(2, "Ghost child", Some(99), 0),
        ];
        let index = CategoryIndex::build(categories, vec![]).unwrap();
        assert_eq!(index.orphans(), &[2]);

        let forest = index.assemble_forest(None);
        let root_ids: Vec<i64> = forest.iter().map(|node| node.category.id).collect();
        assert_eq!(root_ids, vec![2, 1], "nothing is silently lost");
    }

    #[test]
    fn cycle_detected() {
        let categories = vec![
            category(1, "A", Some(2), 0),
            category(2, "B", Some(1), 0),
            category(3, "Root", None, 0),
        ];
        let result = CategoryIndex::build(categories, vec![]);
        assert!(matches!(result, Err(TreeError::CycleDetected { .. })));
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let result = CategoryIndex::build(vec![category(1, "Loop", Some(1), 0)], vec![]);
        assert!(matches!(result, Err(TreeError::CycleDetected { id: 1 })));
    }

    #[test]
    fn sibling_order_is_sort_order_then_name() {
        let categories = vec![
            category(1, "Root", None, 0),
            category(2, "Zebra", Some(1), 0),
            category(3, "Apple", Some(1), 0),
            category(4, "First", Some(1), -1),
        ];
        let index = CategoryIndex::build(categories, vec![]).unwrap();
        let names: Vec<String> = index.assemble_forest(None)[0]
            .children
            .iter()
            .map(|node| node.category.name.clone())
            .collect();
        assert_eq!(names, vec!["First", "Apple", "Zebra"]);
    }

    #[test]
    fn assembly_is_deterministic() {
        let categories: Vec<Category> = (1..=30)
            .map(|id| category(id, &format!("Cat {}", id % 7), (id > 5).then(|| id % 5 + 1), id % 3))
            .collect();
        let posts: Vec<Post> = (1..=20).map(|id| post(100 + id, id % 30 + 1)).collect();

        let a = CategoryIndex::build(categories.clone(), posts.clone()).unwrap();
        let b = CategoryIndex::build(categories, posts).unwrap();
        assert_eq!(
            serde_json::to_string(&a.assemble_forest(None)).unwrap(),
            serde_json::to_string(&b.assemble_forest(None)).unwrap(),
            "two independent runs serialize byte-identically"
        );
    }

    #[test]
    fn node_serialization_omits_empty_keys() {
        let index = CategoryIndex::build(vec![category(1, "Tech", None, 0)], vec![]).unwrap();
        let json = serde_json::to_value(&index.assemble_forest(None)[0]).unwrap();
        assert!(json.get("posts").is_none());
        assert!(json.get("children").is_none());
        assert_eq!(json["slug"], "tech");
    }
}
