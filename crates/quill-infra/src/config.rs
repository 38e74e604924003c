//! Hosted backend connection settings.

/// Where the hosted backend lives and the publishable key to reach it.
/// The data API is served under `/rest/v1`, the auth API under `/auth/v1`.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}
