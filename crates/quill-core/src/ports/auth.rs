//! Auth service port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    pub email: String,
}

/// A live session issued by the auth collaborator. The access token is
/// opaque to this side; only the collaborator can interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: UserIdentity,
}

/// Operations the hosted auth service exposes.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Resolve an access token to its user. `Ok(None)` means the token no
    /// longer identifies anyone (revoked, expired) - anonymity, not failure.
    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, AuthError>;
}

/// Auth service errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("auth request failed: {0}")]
    Transport(String),

    #[error("auth service returned {status}: {message}")]
    Service { status: u16, message: String },
}
