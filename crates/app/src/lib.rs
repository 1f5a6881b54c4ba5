//! Huddle application composition root
//!
//! Composes the Teams domain router with shared infrastructure routes and
//! runs the background expiry sweep.

use axum::Router;
use huddle_common::Config;
use huddle_email::{EmailConfig, EmailServiceFactory};
use huddle_teams::{AuthBackend, AuthConfig, TeamsRepositories, TeamsState};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let teams_repos = TeamsRepositories::new(pool.clone());

    let mut auth_config = AuthConfig::new(config.jwt_secret.clone(), config.jwt_ttl_secs);
    auth_config.issuer = std::env::var("JWT_ISSUER").ok();

    let auth = AuthBackend::new(pool, auth_config);

    // Create email service from environment
    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;

    let teams_state = TeamsState {
        repos: teams_repos,
        auth,
        email: Arc::from(email_service),
    };

    // Build router — compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Huddle API" }))
        .merge(huddle_teams::routes().with_state(teams_state));

    Ok(app)
}

/// Spawn the background task that periodically marks pending invitations
/// past their expiry as expired.
///
/// The sweep is a bulk conditional update, so running it concurrently
/// with accepts and declines is safe: each row settles exactly once.
pub fn spawn_invitation_sweep(repos: TeamsRepositories, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            match repos.invitations.sweep_expired().await {
                Ok(0) => {}
                Ok(count) => {
                    tracing::info!(count, "Marked expired invitations");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Invitation expiry sweep failed");
                }
            }
        }
    });
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
