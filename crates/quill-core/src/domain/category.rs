use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category view model. `post_count` is recomputed on every fetch and never
/// stored authoritatively in the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub post_count: u64,
}
