//! Session cookie plumbing and the admin access-guard extractor.

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::header};
use futures::future::LocalBoxFuture;
use std::fmt;

use quill_core::guard::{self, GuardOutcome};
use quill_core::ports::UserIdentity;
use quill_core::session::SessionGateway;

use crate::state::AppState;

/// Cookie carrying the backend access token.
pub const SESSION_COOKIE: &str = "quill_session";

/// Where anonymous navigation to a protected route lands.
pub const LOGIN_PATH: &str = "/admin/login";

/// The access token this request carries, if any.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Extractor gating the admin area.
///
/// Runs the access guard freshly on every request (sessions can end
/// out-of-band); anything short of a granted session answers with a
/// redirect to the sign-in view, so no admin content is ever written to
/// the response, even transiently. The original navigation target is
/// discarded.
#[derive(Debug, Clone)]
pub struct AdminAccess(pub UserIdentity);

/// Error type whose response is the redirect to the sign-in view.
#[derive(Debug)]
pub struct GuardRedirect;

impl fmt::Display for GuardRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirecting to sign-in")
    }
}

impl ResponseError for GuardRedirect {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish()
    }
}

impl FromRequest for AdminAccess {
    type Error = GuardRedirect;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<actix_web::web::Data<AppState>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(GuardRedirect);
            };
            let gateway = SessionGateway::new(state.auth.clone(), token);
            match guard::check(&gateway).await {
                GuardOutcome::Grant(user) => Ok(AdminAccess(user)),
                GuardOutcome::RedirectToLogin => Err(GuardRedirect),
            }
        })
    }
}
