//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::BackendConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: Option<BackendConfig>,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let backend = env::var("BACKEND_URL").ok().map(|url| {
            let anon_key = env::var("BACKEND_ANON_KEY").unwrap_or_else(|_| {
                tracing::warn!("BACKEND_ANON_KEY not set; backend calls will be unauthenticated");
                String::new()
            });
            BackendConfig { url, anon_key }
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            backend,
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string()),
        }
    }
}
