//! Post editor: compose a new post or edit an existing one.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::FetchError;
use crate::fetch::{FetchMachine, FetchState};
use crate::mapper;
use crate::ports::{DataService, SelectQuery};
use crate::rows::{self, PostRow};

/// The editable fields of a post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
}

pub struct PostEditorPage {
    data: Arc<dyn DataService>,
    machine: FetchMachine<Post>,
    bound: Option<Uuid>,
}

impl PostEditorPage {
    /// Editor for a new, not-yet-persisted post.
    pub fn compose(data: Arc<dyn DataService>) -> Self {
        Self {
            data,
            machine: FetchMachine::new(),
            bound: None,
        }
    }

    /// Editor bound to an existing post.
    pub fn edit(data: Arc<dyn DataService>, id: Uuid) -> Self {
        Self {
            data,
            machine: FetchMachine::new(),
            bound: Some(id),
        }
    }

    pub fn post_id(&self) -> Option<Uuid> {
        self.bound
    }

    pub fn state(&self) -> FetchState<Post> {
        self.machine.snapshot()
    }

    pub fn unmount(&self) {
        self.machine.unmount();
    }

    /// Load the bound post into the editor. A no-op for a new post.
    pub async fn load(&self) {
        let Some(id) = self.bound else { return };
        let token = self.machine.begin();
        let outcome = self.fetch(id).await;
        self.machine.resolve(token, outcome);
    }

    async fn fetch(&self, id: Uuid) -> Result<Post, FetchError> {
        let query = SelectQuery::new("posts").eq("id", id.to_string());
        let row = rows::decode::<PostRow>(self.data.select(query).await?)?
            .into_iter()
            .next()
            .ok_or(FetchError::NotFound)?;
        Ok(mapper::post_view(row))
    }

    /// Persist the draft with the given status.
    ///
    /// Publishing stamps `published_at` with the current time; saving as
    /// draft clears it. Whether this inserts or updates is decided solely by
    /// whether an id is bound to this editor. The slug is derived from the
    /// title once, at insert; updates never touch it.
    pub async fn save(&self, draft: &PostDraft, status: PostStatus) -> Result<(), FetchError> {
        let now = Utc::now();
        let published_at = match status {
            PostStatus::Published => Some(now),
            PostStatus::Draft => None,
        };
        let mut fields = json!({
            "title": draft.title,
            "excerpt": draft.excerpt,
            "content": draft.content,
            "status": status,
            "published_at": published_at,
            "reading_time": reading_time_estimate(&draft.content),
            "updated_at": now,
        });

        match self.bound {
            Some(id) => self.data.update("posts", id, fields).await?,
            None => {
                fields["slug"] = json!(slug_for(&draft.title));
                self.data.insert("posts", vec![fields]).await?;
            }
        }
        Ok(())
    }

    /// Delete the bound post. Irreversible; the interactive confirmation
    /// happens at the presentation boundary before this is called.
    pub async fn delete(&self) -> Result<(), FetchError> {
        let id = self
            .bound
            .ok_or_else(|| FetchError::Fetch("no post bound to this editor".into()))?;
        self.data.delete("posts", id).await?;
        Ok(())
    }
}

/// URL-safe slug derived from a title.
pub fn slug_for(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Reading time estimate at ~200 words per minute, at least one minute for
/// non-empty content.
pub fn reading_time_estimate(content: &str) -> u32 {
    let words = content.split_whitespace().count() as u32;
    if words == 0 { 0 } else { words.div_ceil(200).max(1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_dashed_and_trimmed() {
        assert_eq!(slug_for("Hello, World!"), "hello-world");
        assert_eq!(slug_for("  Rust & Async  "), "rust-async");
        assert_eq!(slug_for("Already-fine"), "already-fine");
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_estimate(""), 0);
        assert_eq!(reading_time_estimate("one two three"), 1);
        let long = "word ".repeat(450);
        assert_eq!(reading_time_estimate(&long), 3);
    }
}
