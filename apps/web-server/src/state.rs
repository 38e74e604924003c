//! Application state - the collaborator services shared across handlers.

use std::sync::Arc;

use serde_json::json;

use quill_core::ports::{AuthService, DataService};
use quill_infra::{HttpAuthService, HttpDataService, InMemoryAuthService, InMemoryDataService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<dyn DataService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        match &config.backend {
            Some(backend) => {
                tracing::info!("Using hosted backend at {}", backend.url);
                Self::with_services(
                    Arc::new(HttpDataService::new(backend)),
                    Arc::new(HttpAuthService::new(backend)),
                )
            }
            None => {
                tracing::warn!(
                    "BACKEND_URL not set. Running with in-memory collaborators (demo mode)."
                );
                if config.admin_password == "change-me" {
                    tracing::warn!("Using default admin password. Set ADMIN_PASSWORD.");
                }
                Self::in_memory(&config.admin_email, &config.admin_password).await
            }
        }
    }

    pub fn with_services(data: Arc<dyn DataService>, auth: Arc<dyn AuthService>) -> Self {
        Self { data, auth }
    }

    async fn in_memory(admin_email: &str, admin_password: &str) -> Self {
        let auth = InMemoryAuthService::new();
        let admin = auth.register(admin_email, admin_password).await;

        let data = InMemoryDataService::new();
        data.seed(
            "profiles",
            vec![json!({"id": admin.id, "name": "Quill Admin", "avatar_url": null})],
        )
        .await;
        let category_id = uuid::Uuid::new_v4();
        data.seed(
            "categories",
            vec![json!({"id": category_id, "name": "General", "slug": "general"})],
        )
        .await;
        data.seed(
            "posts",
            vec![json!({
                "title": "Welcome to Quill",
                "excerpt": "A starter post from demo mode.",
                "content": "This instance is running without a hosted backend, \
                            so everything you see lives in memory.",
                "status": "published",
                "published_at": chrono::Utc::now(),
                "slug": "welcome-to-quill",
                "reading_time": 1,
                "author_id": admin.id,
                "category_id": category_id,
            })],
        )
        .await;

        Self::with_services(Arc::new(data), Arc::new(auth))
    }
}
