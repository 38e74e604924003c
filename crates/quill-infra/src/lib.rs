//! # Quill Infrastructure
//!
//! Concrete implementations of the collaborator ports defined in
//! `quill-core`: HTTP clients for the hosted backend's data and auth APIs,
//! and in-memory stand-ins used by tests and by the no-configuration dev
//! mode.

pub mod auth;
pub mod config;
pub mod data;

pub use auth::{HttpAuthService, InMemoryAuthService};
pub use config::BackendConfig;
pub use data::{HttpDataService, InMemoryDataService};
