//! Resource abstraction layer
//!
//! This module turns API paths into [`Resource`]s: a fetched body plus its
//! tabular projection, and the kind of resource the path refers to.
//!
//! # Architecture
//!
//! - [`registry`] - Static endpoint table and the pattern lookup built from it
//! - [`resolver`] - Classifies link paths: exact, parent wildcard, grandparent wildcard
//! - [`projection`] - Deterministic JSON to table translation
//! - [`table`] - Rows, columns and cells
//! - [`fetcher`] - The `Resource` type: fetch, refresh, link materialization
//!
//! # Example
//!
//! ```ignore
//! use dnd5e::api::ApiClient;
//! use dnd5e::resource::{Endpoint, Resource};
//!
//! async fn list_scores(client: &ApiClient) -> anyhow::Result<usize> {
//!     let mut scores = Resource::collection(client, Endpoint::AbilityScores).await?;
//!     scores.materialize_links().await;
//!     Ok(scores.len())
//! }
//! ```

mod fetcher;
pub mod projection;
mod registry;
pub mod resolver;
pub mod table;

pub use fetcher::{Resource, ResponseMeta, NESTED_SEPARATOR};
pub use registry::*;
pub use resolver::resolve;
pub use table::{Cell, RowRef, Table};
