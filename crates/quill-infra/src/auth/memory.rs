//! In-memory auth service - registered users with opaque session tokens.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::{AuthError, AuthService, Session, UserIdentity};

/// Stand-in for the hosted auth service. Sign-in checks a registered
/// email/password pair and mints an opaque token; `current_user` resolves
/// only tokens minted by this instance.
pub struct InMemoryAuthService {
    users: RwLock<HashMap<String, (String, UserIdentity)>>,
    sessions: RwLock<HashMap<String, UserIdentity>>,
}

impl InMemoryAuthService {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> UserIdentity {
        let identity = UserIdentity {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        self.users.write().await.insert(
            email.to_string(),
            (password.to_string(), identity.clone()),
        );
        identity
    }
}

impl Default for InMemoryAuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let users = self.users.read().await;
        let Some((expected, identity)) = users.get(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if expected != password {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = identity.clone();
        drop(users);

        let access_token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(access_token.clone(), identity.clone());
        Ok(Session {
            access_token,
            user: identity,
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, AuthError> {
        Ok(self.sessions.read().await.get(access_token).cloned())
    }
}
