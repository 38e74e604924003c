//! Request forms accepted by the web surface.

use serde::{Deserialize, Serialize};

/// Sign-in form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Comment submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

/// Editor save. `status` must be exactly `draft` or `published`; anything
/// else is rejected before the collaborator is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    pub status: String,
}

/// Delete confirmation. The collaborator call is only made when `confirm`
/// is true; deletion has no soft-delete tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirm: bool,
}
