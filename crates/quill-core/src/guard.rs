//! Access guard for protected views.
//!
//! A specialization of the fetch machine where the "fetch" is asking the
//! session gateway for the current user. The check runs fresh on every
//! protected-route entry; a present user grants access, anything else
//! (anonymous, or the auth collaborator failing) resolves to a redirect to
//! the sign-in view. The navigation target is discarded on redirect.

use crate::error::FetchError;
use crate::fetch::{FetchMachine, FetchState};
use crate::ports::UserIdentity;
use crate::session::SessionGateway;

/// Result of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Grant(UserIdentity),
    RedirectToLogin,
}

/// Run the access check for one mount of a protected view.
pub async fn check(gateway: &SessionGateway) -> GuardOutcome {
    let machine = FetchMachine::new();
    let token = machine.begin();
    let looked_up = gateway
        .current_user()
        .await
        .map_err(|e| FetchError::Fetch(e.to_string()));
    machine.resolve(token, looked_up);

    match machine.snapshot() {
        FetchState::Ready(Some(user)) => GuardOutcome::Grant(user),
        // Ready(None) and Failed both resolve to redirect; while the check
        // is in flight nothing of the protected view is rendered.
        _ => GuardOutcome::RedirectToLogin,
    }
}
