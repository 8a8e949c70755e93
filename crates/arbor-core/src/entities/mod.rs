//! Entity structs for the Arbor domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! wire-shape validation.

mod category;
mod post;

pub use category::{Category, CategoryWithPosts};
pub use post::Post;
