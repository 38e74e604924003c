//! Single-post view with comments.

use serde::Serialize;
use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::error::FetchError;
use crate::fetch::{FetchMachine, FetchState};
use crate::mapper;
use crate::ports::{DataService, SelectQuery};
use crate::rows::{self, CommentRow, PostRow};
use crate::session::SessionGateway;

/// Post plus its comments, in ascending creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPostView {
    pub post: Post,
    pub comments: Vec<Comment>,
}

pub struct BlogPostPage {
    data: Arc<dyn DataService>,
    machine: FetchMachine<BlogPostView>,
}

impl BlogPostPage {
    pub fn new(data: Arc<dyn DataService>) -> Self {
        Self {
            data,
            machine: FetchMachine::new(),
        }
    }

    pub fn state(&self) -> FetchState<BlogPostView> {
        self.machine.snapshot()
    }

    pub fn unmount(&self) {
        self.machine.unmount();
    }

    /// A missing slug is not an error to display: the page policy is to
    /// redirect back to the list instead.
    pub fn should_redirect_to_list(&self) -> bool {
        matches!(self.state(), FetchState::Failed(FetchError::NotFound))
    }

    pub async fn load(&self, slug: &str) {
        let token = self.machine.begin();
        let outcome = self.fetch(slug).await;
        self.machine.resolve(token, outcome);
    }

    async fn fetch(&self, slug: &str) -> Result<BlogPostView, FetchError> {
        let query = SelectQuery::new("posts")
            .embed("profiles", "author_id", &["name", "avatar_url"])
            .embed("categories", "category_id", &["name"])
            .eq("slug", slug);
        let row = rows::decode::<PostRow>(self.data.select(query).await?)?
            .into_iter()
            .next()
            .ok_or(FetchError::NotFound)?;
        let post = mapper::post_view(row);
        let comments = self.fetch_comments(post.id).await?;
        Ok(BlogPostView { post, comments })
    }

    async fn fetch_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, FetchError> {
        let query = SelectQuery::new("comments")
            .embed("profiles", "user_id", &["name", "avatar_url"])
            .eq("post_id", post_id.to_string())
            .order_asc("created_at");
        Ok(rows::decode::<CommentRow>(self.data.select(query).await?)?
            .into_iter()
            .map(mapper::comment_view)
            .collect())
    }

    /// Submit a comment as the gateway's current user.
    ///
    /// Requires a signed-in session; an anonymous submission fails with
    /// `Unauthorized` and leaves the comment collection untouched. After a
    /// successful insert the full list is refetched rather than appended
    /// optimistically, so the rendered list always reflects committed server
    /// order. If the refetch fails the machine is left `Failed` for that
    /// step; the insert is not rolled back.
    pub async fn add_comment(
        &self,
        gateway: &SessionGateway,
        content: &str,
    ) -> Result<(), FetchError> {
        let user = gateway
            .current_user()
            .await
            .map_err(|e| FetchError::Fetch(e.to_string()))?
            .ok_or(FetchError::Unauthorized)?;

        let post = match self.machine.snapshot() {
            FetchState::Ready(view) => view.post,
            _ => return Err(FetchError::Fetch("no post loaded".into())),
        };

        self.data
            .insert(
                "comments",
                vec![json!({
                    "post_id": post.id,
                    "user_id": user.id,
                    "content": content,
                })],
            )
            .await?;

        let token = self.machine.begin();
        let outcome = self
            .fetch_comments(post.id)
            .await
            .map(|comments| BlogPostView { post, comments });
        self.machine.resolve(token, outcome);
        Ok(())
    }
}
