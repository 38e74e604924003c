//! Auth service adapters.

mod http;
mod memory;

pub use http::HttpAuthService;
pub use memory::InMemoryAuthService;
