use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;

/// Comment view model. A comment belongs to exactly one post and is fetched
/// on demand; comment lists are always presented in ascending creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
