use serde::{Deserialize, Serialize};

/// Display identity of a post or comment author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar_url: String,
}
