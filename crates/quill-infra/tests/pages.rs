//! Page-controller behavior against the in-memory collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{Mutex, oneshot};
use uuid::Uuid;

use quill_core::FetchError;
use quill_core::domain::PostStatus;
use quill_core::fetch::FetchState;
use quill_core::mapper;
use quill_core::pages::{AdminPostsPage, BlogListPage, BlogPostPage, PostDraft, PostEditorPage};
use quill_core::ports::{AuthService, DataError, DataService, Filter, SelectQuery};
use quill_core::session::SessionGateway;
use quill_infra::{InMemoryAuthService, InMemoryDataService};

async fn seeded_blog() -> Arc<InMemoryDataService> {
    let data = InMemoryDataService::new();
    let rust_cat = Uuid::new_v4();
    let go_cat = Uuid::new_v4();
    let ada = Uuid::new_v4();

    data.seed(
        "profiles",
        vec![json!({"id": ada, "name": "Ada", "avatar_url": "https://cdn.example/ada.png"})],
    )
    .await;
    data.seed(
        "categories",
        vec![
            json!({"id": rust_cat, "name": "Rust", "slug": "rust"}),
            json!({"id": go_cat, "name": "Go", "slug": "go"}),
        ],
    )
    .await;
    data.seed(
        "posts",
        vec![
            json!({
                "title": "Ownership", "content": "words", "excerpt": "e",
                "status": "published", "slug": "ownership", "reading_time": 4,
                "author_id": ada, "category_id": rust_cat,
                "published_at": "2024-03-01T09:00:01Z",
                "created_at": "2024-03-01T09:00:01Z", "updated_at": "2024-03-01T09:00:01Z",
            }),
            json!({
                "title": "Goroutines", "content": "words", "excerpt": "e",
                "status": "published", "slug": "goroutines", "reading_time": 2,
                "author_id": null, "category_id": go_cat,
                "published_at": "2024-03-02T09:00:02Z",
                "created_at": "2024-03-02T09:00:02Z", "updated_at": "2024-03-02T09:00:02Z",
            }),
        ],
    )
    .await;
    Arc::new(data)
}

#[tokio::test]
async fn list_loads_posts_newest_first_with_category_counts() {
    let data = seeded_blog().await;
    let page = BlogListPage::new(data);
    page.load(None).await;

    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready, got {:?}", page.state());
    };
    assert_eq!(view.posts.len(), 2);
    assert_eq!(view.posts[0].slug, "goroutines");
    assert_eq!(view.posts[0].author.name, mapper::UNKNOWN_AUTHOR);
    assert_eq!(view.posts[1].author.name, "Ada");
    assert!(view.categories.iter().all(|c| c.post_count == 1));
}

#[tokio::test]
async fn unknown_category_slug_drops_the_filter() {
    let data = seeded_blog().await;
    let page = BlogListPage::new(data.clone());
    page.load(Some("no-such-category")).await;
    let FetchState::Ready(filtered) = page.state() else {
        panic!("expected Ready");
    };

    let unfiltered_page = BlogListPage::new(data);
    unfiltered_page.load(None).await;
    let FetchState::Ready(full) = unfiltered_page.state() else {
        panic!("expected Ready");
    };

    assert_eq!(filtered.posts, full.posts);
}

#[tokio::test]
async fn known_category_slug_filters() {
    let data = seeded_blog().await;
    let page = BlogListPage::new(data);
    page.load(Some("rust")).await;

    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready");
    };
    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].slug, "ownership");
    assert_eq!(view.active_category.as_deref(), Some("rust"));
}

/// Data service whose first select stalls until released; used to let an
/// older fetch finish after a newer one.
struct StallFirstSelect {
    inner: Arc<InMemoryDataService>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl DataService for StallFirstSelect {
    async fn select(&self, query: SelectQuery) -> Result<Vec<Value>, DataError> {
        let gate = self.gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.select(query).await
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, DataError> {
        self.inner.count(collection, filters).await
    }

    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<(), DataError> {
        self.inner.insert(collection, rows).await
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), DataError> {
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), DataError> {
        self.inner.delete(collection, id).await
    }
}

#[tokio::test]
async fn switching_category_mid_flight_keeps_only_the_newest_result() {
    let (release, gate) = oneshot::channel();
    let data = Arc::new(StallFirstSelect {
        inner: seeded_blog().await,
        gate: Mutex::new(Some(gate)),
    });
    let page = Arc::new(BlogListPage::new(data));

    // First load stalls on its first collaborator call.
    let stalled = {
        let page = Arc::clone(&page);
        tokio::spawn(async move { page.load(Some("rust")).await })
    };
    // Let the stalled load begin and park on the gate.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    // The user switches category; this newer load runs to completion.
    page.load(None).await;
    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready");
    };
    assert_eq!(view.active_category, None);

    // Now the stale fetch completes - its result must be discarded.
    let _ = release.send(());
    stalled.await.unwrap();
    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready");
    };
    assert_eq!(view.active_category, None);
    assert_eq!(view.posts.len(), 2);
}

#[tokio::test]
async fn unmounted_page_ignores_late_results() {
    let (release, gate) = oneshot::channel();
    let data = Arc::new(StallFirstSelect {
        inner: seeded_blog().await,
        gate: Mutex::new(Some(gate)),
    });
    let page = Arc::new(BlogListPage::new(data));

    let stalled = {
        let page = Arc::clone(&page);
        tokio::spawn(async move { page.load(None).await })
    };
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    page.unmount();
    let _ = release.send(());
    stalled.await.unwrap();
    assert!(page.state().is_loading());
}

#[tokio::test]
async fn detail_renders_post_and_ordered_comments() {
    let data = seeded_blog().await;
    let posts = data
        .select(SelectQuery::new("posts").eq("slug", "ownership"))
        .await
        .unwrap();
    let post_id = posts[0]["id"].as_str().unwrap().to_string();
    // Seeded out of order on purpose; presentation order is by creation time.
    data.seed(
        "comments",
        vec![
            json!({"post_id": post_id, "user_id": null, "content": "second",
                   "created_at": "2024-03-05T10:00:02Z"}),
            json!({"post_id": post_id, "user_id": null, "content": "first",
                   "created_at": "2024-03-05T10:00:01Z"}),
        ],
    )
    .await;

    let page = BlogPostPage::new(data);
    page.load("ownership").await;

    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready, got {:?}", page.state());
    };
    assert_eq!(view.post.slug, "ownership");
    assert_eq!(view.comments.len(), 2);
    assert_eq!(view.comments[0].content, "first");
    assert_eq!(view.comments[1].content, "second");
    assert_eq!(view.comments[0].author.name, mapper::UNKNOWN_USER);
}

#[tokio::test]
async fn missing_slug_is_a_redirect_not_an_error_screen() {
    let data = seeded_blog().await;
    let page = BlogPostPage::new(data);
    page.load("never-written").await;

    assert_eq!(page.state(), FetchState::Failed(FetchError::NotFound));
    assert!(page.should_redirect_to_list());
}

#[tokio::test]
async fn anonymous_comment_is_rejected_and_nothing_is_written() {
    let data = seeded_blog().await;
    let auth = Arc::new(InMemoryAuthService::new());
    let gateway = SessionGateway::anonymous(auth);

    let page = BlogPostPage::new(data.clone());
    page.load("ownership").await;

    let outcome = page.add_comment(&gateway, "drive-by").await;
    assert_eq!(outcome, Err(FetchError::Unauthorized));
    assert_eq!(data.count("comments", &[]).await.unwrap(), 0);

    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready");
    };
    assert!(view.comments.is_empty());
}

#[tokio::test]
async fn authenticated_comment_appends_exactly_one_in_order() {
    let data = seeded_blog().await;
    let auth = Arc::new(InMemoryAuthService::new());
    auth.register("reader@example.com", "pw").await;
    let session = auth.sign_in("reader@example.com", "pw").await.unwrap();
    let gateway = SessionGateway::new(auth, Some(session.access_token));

    let page = BlogPostPage::new(data);
    page.load("ownership").await;
    page.add_comment(&gateway, "great post").await.unwrap();

    let FetchState::Ready(view) = page.state() else {
        panic!("expected Ready, got {:?}", page.state());
    };
    assert_eq!(view.comments.len(), 1);
    assert_eq!(view.comments[0].content, "great post");
    assert!(
        view.comments
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at)
    );
}

/// Data service that starts failing selects once a row has been inserted.
struct FailAfterInsert {
    inner: Arc<InMemoryDataService>,
    poisoned: Mutex<bool>,
}

#[async_trait]
impl DataService for FailAfterInsert {
    async fn select(&self, query: SelectQuery) -> Result<Vec<Value>, DataError> {
        if *self.poisoned.lock().await {
            return Err(DataError::Transport("connection reset".into()));
        }
        self.inner.select(query).await
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, DataError> {
        self.inner.count(collection, filters).await
    }

    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<(), DataError> {
        self.inner.insert(collection, rows).await?;
        *self.poisoned.lock().await = true;
        Ok(())
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), DataError> {
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), DataError> {
        self.inner.delete(collection, id).await
    }
}

#[tokio::test]
async fn failed_comment_refetch_keeps_the_insert_and_reports_failure() {
    let inner = seeded_blog().await;
    let data = Arc::new(FailAfterInsert {
        inner: Arc::clone(&inner),
        poisoned: Mutex::new(false),
    });
    let auth = Arc::new(InMemoryAuthService::new());
    auth.register("reader@example.com", "pw").await;
    let session = auth.sign_in("reader@example.com", "pw").await.unwrap();
    let gateway = SessionGateway::new(auth, Some(session.access_token));

    let page = BlogPostPage::new(data);
    page.load("ownership").await;

    // The insert commits, then the refetch fails: no rollback, and the
    // machine is left Failed for the refetch step.
    let outcome = page.add_comment(&gateway, "kept").await;
    assert_eq!(outcome, Ok(()));
    assert_eq!(inner.count("comments", &[]).await.unwrap(), 1);
    assert!(matches!(
        page.state(),
        FetchState::Failed(FetchError::Fetch(_))
    ));
}

#[tokio::test]
async fn admin_list_includes_drafts_newest_first() {
    let data = seeded_blog().await;
    data.seed(
        "posts",
        vec![json!({
            "title": "WIP", "content": "draft words", "excerpt": "",
            "status": "draft", "slug": "wip", "reading_time": 1,
            "created_at": "2024-04-01T09:00:00Z", "updated_at": "2024-04-01T09:00:00Z",
        })],
    )
    .await;

    let page = AdminPostsPage::new(data);
    page.load().await;

    let FetchState::Ready(posts) = page.state() else {
        panic!("expected Ready");
    };
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].slug, "wip");
    assert_eq!(posts[0].status, PostStatus::Draft);
}

#[tokio::test]
async fn draft_then_publish_roundtrip() {
    let data: Arc<InMemoryDataService> = Arc::new(InMemoryDataService::new());
    let draft = PostDraft {
        title: "Hello, World!".into(),
        excerpt: "greeting".into(),
        content: "body ".repeat(250),
    };

    // New editor: no bound id, so saving inserts.
    let editor = PostEditorPage::compose(data.clone());
    editor.save(&draft, PostStatus::Draft).await.unwrap();
    assert_eq!(data.count("posts", &[]).await.unwrap(), 1);

    let rows = data.select(SelectQuery::new("posts")).await.unwrap();
    assert_eq!(rows[0]["slug"], "hello-world");
    let id: Uuid = serde_json::from_value(rows[0]["id"].clone()).unwrap();

    let editor = PostEditorPage::edit(data.clone(), id);
    editor.load().await;
    let FetchState::Ready(loaded) = editor.state() else {
        panic!("expected Ready, got {:?}", editor.state());
    };
    assert_eq!(loaded.status, PostStatus::Draft);
    assert_eq!(loaded.published_at, None);
    assert_eq!(loaded.reading_time, 2);

    // Bound editor: saving updates the same row, never creates another.
    editor.save(&draft, PostStatus::Published).await.unwrap();
    assert_eq!(data.count("posts", &[]).await.unwrap(), 1);

    let editor = PostEditorPage::edit(data.clone(), id);
    editor.load().await;
    let FetchState::Ready(published) = editor.state() else {
        panic!("expected Ready");
    };
    assert_eq!(published.status, PostStatus::Published);
    let stamp = published.published_at.expect("published posts carry a timestamp");
    assert!(stamp <= chrono::Utc::now());
    assert_eq!(published.slug, "hello-world");

    // And saving as draft again clears the timestamp.
    editor.save(&draft, PostStatus::Draft).await.unwrap();
    let editor = PostEditorPage::edit(data.clone(), id);
    editor.load().await;
    let FetchState::Ready(redrafted) = editor.state() else {
        panic!("expected Ready");
    };
    assert_eq!(redrafted.published_at, None);
}

#[tokio::test]
async fn delete_removes_the_bound_post() {
    let data = seeded_blog().await;
    let rows = data
        .select(SelectQuery::new("posts").eq("slug", "ownership"))
        .await
        .unwrap();
    let id: Uuid = serde_json::from_value(rows[0]["id"].clone()).unwrap();

    let editor = PostEditorPage::edit(data.clone(), id);
    editor.delete().await.unwrap();

    assert_eq!(
        data.count("posts", &[Filter::eq("slug", "ownership")])
            .await
            .unwrap(),
        0
    );

    let unbound = PostEditorPage::compose(data);
    assert!(unbound.delete().await.is_err());
}

#[tokio::test]
async fn editor_load_of_missing_post_fails_with_not_found() {
    let data = seeded_blog().await;
    let editor = PostEditorPage::edit(data, Uuid::new_v4());
    editor.load().await;
    assert_eq!(editor.state(), FetchState::Failed(FetchError::NotFound));
}
