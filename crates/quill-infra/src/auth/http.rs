//! HTTP auth service - client for the hosted backend's password auth API.

use async_trait::async_trait;
use serde::Deserialize;

use quill_core::ports::{AuthError, AuthService, Session, UserIdentity};

use crate::config::BackendConfig;

pub struct HttpAuthService {
    http: reqwest::Client,
    base: String,
    anon_key: String,
}

impl HttpAuthService {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{}/auth/v1", config.url.trim_end_matches('/')),
            anon_key: config.anon_key.clone(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserPayload,
}

#[derive(Deserialize)]
struct UserPayload {
    id: uuid::Uuid,
    email: String,
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(format!("{}/token", self.base))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(Session {
            access_token: token.access_token,
            user: UserIdentity {
                id: token.user.id,
                email: token.user.email,
            },
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, AuthError> {
        let response = self
            .http
            .get(format!("{}/user", self.base))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        // A token the service no longer honors means anonymous, not failure.
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let user: UserPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(Some(UserIdentity {
            id: user.id,
            email: user.email,
        }))
    }
}
