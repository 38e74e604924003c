//! Session gateway - wraps the auth collaborator for one client.

use std::sync::Arc;

use crate::ports::{AuthError, AuthService, Session, UserIdentity};

/// Answers "is there a current authenticated user" for the access token this
/// client carries, and performs sign-in. Nothing is cached: every
/// `current_user` call goes back to the collaborator, since sessions can end
/// out-of-band (sign-out elsewhere, expiry).
#[derive(Clone)]
pub struct SessionGateway {
    auth: Arc<dyn AuthService>,
    access_token: Option<String>,
}

impl SessionGateway {
    pub fn new(auth: Arc<dyn AuthService>, access_token: Option<String>) -> Self {
        Self { auth, access_token }
    }

    pub fn anonymous(auth: Arc<dyn AuthService>) -> Self {
        Self::new(auth, None)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.auth.sign_in(email, password).await
    }

    /// The user behind the carried token, or `None` when anonymous.
    pub async fn current_user(&self) -> Result<Option<UserIdentity>, AuthError> {
        match &self.access_token {
            None => Ok(None),
            Some(token) => self.auth.current_user(token).await,
        }
    }
}
