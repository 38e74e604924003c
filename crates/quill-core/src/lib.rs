//! # Quill Core
//!
//! The domain layer of the Quill publishing client.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! view models, collaborator ports, the fetch lifecycle, access control, and the
//! row-to-view-model mapping. Concrete backend clients live in `quill-infra`.

pub mod domain;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod mapper;
pub mod pages;
pub mod ports;
pub mod rows;
pub mod session;

pub use error::FetchError;
