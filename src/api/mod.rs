//! Reference API interaction module
//!
//! This module provides the HTTP plumbing for talking to the D&D 5e
//! reference API: a thin reqwest wrapper and the configured client that
//! every [`Resource`](crate::resource::Resource) fetches through.
//!
//! # Module Structure
//!
//! - [`client`] - Root URL, request headers, timeout and link fan-out width
//! - [`http`] - GET requests that report non-200 statuses instead of failing
//!
//! # Example
//!
//! ```ignore
//! use dnd5e::api::ApiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("https://www.dnd5eapi.co")?;
//!     let response = client.get("/api/ability-scores").await?;
//!     assert_eq!(response.status, 200);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::{ApiClient, DEFAULT_LINK_CONCURRENCY, DEFAULT_ROOT};
pub use http::{format_api_error, ApiHttpClient, ApiResponse};
