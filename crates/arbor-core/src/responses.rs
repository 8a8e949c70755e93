//! The response envelope returned by every Arbor endpoint.
//!
//! Every HTTP response, success or failure, is wrapped in
//! `{ "code": <int>, "message": <string>, "data": <any|null> }`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 envelope with data.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "Success".into(),
            data: Some(data),
        }
    }

    /// 201 envelope with data.
    #[must_use]
    pub fn created(data: T) -> Self {
        Self {
            code: 201,
            message: "Created Successfully".into(),
            data: Some(data),
        }
    }

    /// Error envelope; `data` carries the error detail when there is one.
    #[must_use]
    pub fn error(code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }
}
