//! Serde roundtrip and JsonSchema validation tests for the wire types.

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use arbor_core::entities::{Category, CategoryWithPosts, Post};
use arbor_core::enums::PostStatus;
use arbor_core::responses::ApiResponse;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_category() -> Category {
    Category {
        id: 1,
        slug: "tech".into(),
        name: "Tech".into(),
        parent_id: None,
        sort_order: 0,
        status: 1,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn sample_post() -> Post {
    Post {
        id: 10,
        slug: "hello-world".into(),
        title: "Hello World".into(),
        summary: Some("First post".into()),
        content: "Body text".into(),
        cover_image: None,
        status: PostStatus::Published,
        is_featured: true,
        published_at: Some(Utc.with_ymd_and_hms(2026, 1, 3, 9, 30, 0).unwrap()),
        created_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        category_id: 1,
    }
}

roundtrip_and_validate!(category_roundtrip, Category, sample_category());

roundtrip_and_validate!(post_roundtrip, Post, sample_post());

roundtrip_and_validate!(
    category_with_posts_roundtrip,
    CategoryWithPosts,
    CategoryWithPosts {
        category: sample_category(),
        posts: vec![sample_post()],
    }
);

roundtrip_and_validate!(
    envelope_roundtrip,
    ApiResponse<Category>,
    ApiResponse::success(sample_category())
);

#[test]
fn category_wire_field_names() {
    let json = serde_json::to_value(sample_category()).unwrap();
    let map = json.as_object().unwrap();
    for key in ["id", "slug", "name", "parent_id", "sort_order", "status", "created_at"] {
        assert!(map.contains_key(key), "missing wire field {key}");
    }
}

#[test]
fn post_status_serializes_snake_case() {
    let json = serde_json::to_value(sample_post()).unwrap();
    assert_eq!(json["status"], "published");
}
