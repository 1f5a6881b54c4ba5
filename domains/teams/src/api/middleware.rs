//! Teams domain state and auth backend integration

use crate::TeamsRepositories;
use axum::extract::FromRef;
use huddle_auth::AuthBackend;
use huddle_email::EmailService;
use std::sync::Arc;

pub use huddle_auth::AuthUser;

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub repos: TeamsRepositories,
    pub auth: AuthBackend,
    pub email: Arc<dyn EmailService>,
}

impl FromRef<TeamsState> for AuthBackend {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}
