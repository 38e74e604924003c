//! Raw collaborator row shapes.
//!
//! These are the wire forms the data service returns, including embedded
//! foreign rows keyed by relation name. The mapper turns them into the view
//! models in [`crate::domain`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::PostStatus;
use crate::ports::DataError;

/// Embedded author profile. Both fields are nullable in the backend schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Embedded category reference.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// A `posts` row, optionally carrying its embedded relations.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    pub status: PostStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub slug: String,
    #[serde(default)]
    pub reading_time: u32,
    #[serde(default)]
    pub profiles: Option<ProfileRef>,
    #[serde(default)]
    pub categories: Option<CategoryRef>,
}

/// A `comments` row with its embedded author profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub profiles: Option<ProfileRef>,
}

/// A `categories` row.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Decode raw rows into a typed row struct.
pub fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, DataError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| DataError::Decode(e.to_string())))
        .collect()
}
