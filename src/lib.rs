//! Client library for the D&D 5th Edition SRD REST API.
//!
//! Paths are fetched into [`resource::Resource`]s, which carry the decoded
//! body and a table projection of it. Links between resources are resolved
//! through a static registry of the API's endpoints.

pub mod api;
pub mod browser;
pub mod config;
pub mod records;
pub mod render;
pub mod resource;

/// Version injected at compile time via DND5E_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("DND5E_VERSION") {
    Some(v) => v,
    None => "dev",
};
