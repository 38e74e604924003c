//! Ports - trait definitions for the external collaborators.
//! The hosted backend implements persistence and authentication; these are
//! the interfaces its clients must satisfy so tests can substitute fakes.

mod auth;
mod data;

pub use auth::{AuthError, AuthService, Session, UserIdentity};
pub use data::{DataError, DataService, Embed, Filter, Order, SelectQuery};
