//! Admin area handlers. Everything under /admin/posts sits behind the
//! [`AdminAccess`] guard extractor.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, http::header, web};
use serde_json::json;
use uuid::Uuid;

use quill_core::domain::PostStatus;
use quill_core::fetch::FetchState;
use quill_core::pages::{AdminPostsPage, PostDraft, PostEditorPage};
use quill_core::session::SessionGateway;
use quill_shared::dto::{DeleteForm, LoginForm, PostForm};

use crate::handlers::redirect_to;
use crate::middleware::auth::{AdminAccess, LOGIN_PATH, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /admin/login - the sign-in view, described for whatever renders it.
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "title": "Admin Login",
        "method": "POST",
        "fields": ["email", "password"],
    }))
}

/// POST /admin/login
pub async fn login(
    state: web::Data<AppState>,
    form: web::Json<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let gateway = SessionGateway::anonymous(state.auth.clone());
    let session = gateway.sign_in(&form.email, &form.password).await?;
    tracing::info!(user = %session.user.email, "admin signed in");

    let cookie = Cookie::build(SESSION_COOKIE, session.access_token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    Ok(HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header((header::LOCATION, "/admin/posts"))
        .finish())
}

/// POST /admin/logout - destroys the session cookie.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish()
}

/// GET /admin/posts
pub async fn post_list(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let page = AdminPostsPage::new(state.data.clone());
    page.load().await;
    match page.state() {
        FetchState::Ready(posts) => Ok(HttpResponse::Ok().json(posts)),
        FetchState::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("post list fetch did not settle".into())),
    }
}

/// GET /admin/posts/new - an empty draft for the editor.
pub async fn new_post(_admin: AdminAccess) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "title": "",
        "excerpt": "",
        "content": "",
        "status": "draft",
    }))
}

/// GET /admin/posts/{id}
pub async fn edit_post(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let editor = PostEditorPage::edit(state.data.clone(), id.into_inner());
    editor.load().await;
    match editor.state() {
        FetchState::Ready(post) => Ok(HttpResponse::Ok().json(post)),
        FetchState::Failed(err) => Err(err.into()),
        _ => Err(AppError::Internal("editor fetch did not settle".into())),
    }
}

/// POST /admin/posts - save a new post.
pub async fn create_post(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    form: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let status = parse_status(&form.status)?;
    let editor = PostEditorPage::compose(state.data.clone());
    editor.save(&draft_from(&form), status).await?;
    Ok(redirect_to("/admin/posts"))
}

/// POST /admin/posts/{id} - save an existing post.
pub async fn update_post(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    form: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let status = parse_status(&form.status)?;
    let editor = PostEditorPage::edit(state.data.clone(), id.into_inner());
    editor.save(&draft_from(&form), status).await?;
    Ok(redirect_to("/admin/posts"))
}

/// POST /admin/posts/{id}/delete
///
/// Irreversible; the collaborator is only called once the client has
/// confirmed.
pub async fn delete_post(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    form: web::Json<DeleteForm>,
) -> AppResult<HttpResponse> {
    if !form.confirm {
        return Err(AppError::BadRequest("deletion requires confirmation".into()));
    }
    let id = id.into_inner();
    let editor = PostEditorPage::edit(state.data.clone(), id);
    editor.delete().await?;
    tracing::info!(%id, "post deleted");
    Ok(redirect_to("/admin/posts"))
}

fn parse_status(raw: &str) -> Result<PostStatus, AppError> {
    match raw {
        "draft" => Ok(PostStatus::Draft),
        "published" => Ok(PostStatus::Published),
        other => Err(AppError::BadRequest(format!(
            "status must be \"draft\" or \"published\", got {other:?}"
        ))),
    }
}

fn draft_from(form: &PostForm) -> PostDraft {
    PostDraft {
        title: form.title.clone(),
        excerpt: form.excerpt.clone(),
        content: form.content.clone(),
    }
}
