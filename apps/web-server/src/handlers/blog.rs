//! Public blog handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use quill_core::fetch::FetchState;
use quill_core::pages::{BlogListPage, BlogPostPage};
use quill_core::session::SessionGateway;
use quill_shared::dto::CommentForm;

use crate::handlers::redirect_to;
use crate::middleware::auth::session_token;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET / - landing page.
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name": "Quill",
        "blog": "/blog",
        "admin": "/admin/posts",
    }))
}

/// GET /blog
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_list(&state, None).await
}

/// GET /blog/category/{category}
pub async fn list_by_category(
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> AppResult<HttpResponse> {
    render_list(&state, Some(category.into_inner())).await
}

async fn render_list(state: &AppState, category: Option<String>) -> AppResult<HttpResponse> {
    let page = BlogListPage::new(state.data.clone());
    page.load(category.as_deref()).await;
    match page.state() {
        FetchState::Ready(view) => Ok(HttpResponse::Ok().json(view)),
        FetchState::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("list fetch did not settle".into())),
    }
}

/// GET /blog/{slug}
pub async fn detail(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let page = BlogPostPage::new(state.data.clone());
    page.load(&slug).await;
    if page.should_redirect_to_list() {
        return Ok(redirect_to("/blog"));
    }
    match page.state() {
        FetchState::Ready(view) => Ok(HttpResponse::Ok().json(view)),
        FetchState::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("detail fetch did not settle".into())),
    }
}

/// POST /blog/{slug}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    form: web::Json<CommentForm>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let content = form.into_inner().content;
    if content.trim().is_empty() {
        return Err(AppError::BadRequest("comment content is empty".into()));
    }

    let page = BlogPostPage::new(state.data.clone());
    page.load(&slug).await;
    if page.should_redirect_to_list() {
        return Ok(redirect_to("/blog"));
    }
    if let FetchState::Failed(err) = page.state() {
        return Err(err.into());
    }

    let gateway = SessionGateway::new(state.auth.clone(), session_token(&req));
    page.add_comment(&gateway, content.trim()).await?;

    match page.state() {
        FetchState::Ready(view) => Ok(HttpResponse::Created().json(view.comments)),
        FetchState::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("comment refetch did not settle".into())),
    }
}
