//! # arbor-core
//!
//! Core types and the category-tree assembly algorithm for Arbor.
//!
//! This crate provides the foundational pieces shared across all Arbor crates:
//! - Entity structs for categories and posts
//! - The `PostStatus` enum
//! - The per-request category index, forest/subtree assembly, and formatter
//! - The HTTP response envelope
//!
//! Everything here is pure in-memory computation; storage and HTTP live in
//! `arbor-db` and `arbor-api`.

pub mod entities;
pub mod enums;
pub mod format;
pub mod responses;
pub mod tree;
