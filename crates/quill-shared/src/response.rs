//! Error body rendered by the web surface.

use serde::{Deserialize, Serialize};

/// Structured error payload.
///
/// `retryable` tells the rendering layer whether to offer a manual retry
/// control (collaborator failures) or not (rejected input, missing session).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub retryable: bool,
}

impl ErrorBody {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            detail: None,
            retryable: false,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized").with_detail(detail)
    }

    /// A collaborator call failed; the client may retry manually.
    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::new(502, "Backend Unavailable")
            .with_detail(detail)
            .retryable()
    }

    pub fn internal() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
