//! Data fetch lifecycle shared by every data-bound page.
//!
//! `Idle -> Loading -> Ready | Failed`, with a request-token discipline:
//! each `begin` issues a monotonically increasing token, and only the result
//! carrying the most recently issued token may commit a terminal state. Older
//! in-flight fetches and anything arriving after `unmount` are discarded, so
//! rapid parameter changes can never let a stale response overwrite a newer
//! one. There is no automatic retry; retrying means beginning a new fetch.

use std::sync::Mutex;

use crate::error::FetchError;

/// Lifecycle state of one page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }
}

/// Proof that a fetch was begun; required to commit its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

struct Inner<T> {
    state: FetchState<T>,
    latest: u64,
    mounted: bool,
}

/// One page instance's fetch machine.
pub struct FetchMachine<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> FetchMachine<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: FetchState::Idle,
                latest: 0,
                mounted: true,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("fetch machine lock poisoned")
    }

    /// Enter `Loading` and issue the token for this fetch.
    pub fn begin(&self) -> FetchToken {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state = FetchState::Loading;
        FetchToken(inner.latest)
    }

    /// Commit a terminal state for the fetch identified by `token`.
    ///
    /// Returns whether the result was committed: stale tokens and results
    /// arriving after `unmount` are discarded.
    pub fn resolve(&self, token: FetchToken, outcome: Result<T, FetchError>) -> bool {
        let mut inner = self.lock();
        if !inner.mounted || token.0 != inner.latest {
            return false;
        }
        inner.state = match outcome {
            Ok(data) => FetchState::Ready(data),
            Err(err) => FetchState::Failed(err),
        };
        true
    }

    /// Freeze the machine; no result may mutate state from here on.
    pub fn unmount(&self) {
        self.lock().mounted = false;
    }
}

impl<T: Clone> FetchMachine<T> {
    pub fn snapshot(&self) -> FetchState<T> {
        self.lock().state.clone()
    }
}

impl<T> Default for FetchMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}
