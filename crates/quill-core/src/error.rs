//! Fetch-level error taxonomy.

use thiserror::Error;

use crate::ports::{AuthError, DataError};

/// Terminal failure of a page fetch or page action.
///
/// How each variant is surfaced is page policy: `Fetch` is shown with a
/// manual retry control, `NotFound` triggers a redirect instead of an error
/// screen, `Unauthorized` blocks the attempted action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Fetch(String),

    #[error("not found")]
    NotFound,

    #[error("you must be signed in to do that")]
    Unauthorized,
}

impl From<DataError> for FetchError {
    fn from(err: DataError) -> Self {
        FetchError::Fetch(err.to_string())
    }
}

impl From<AuthError> for FetchError {
    fn from(err: AuthError) -> Self {
        FetchError::Fetch(err.to_string())
    }
}
