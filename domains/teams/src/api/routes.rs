//! Route definitions for the Teams domain API

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{auth, invitations, teams};
use super::middleware::TeamsState;

/// Create authentication routes
fn auth_routes() -> Router<TeamsState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Create team management routes
fn team_routes() -> Router<TeamsState> {
    Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .patch(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/teams/{team_id}/members", get(teams::list_members))
        .route(
            "/teams/{team_id}/members/{user_id}",
            delete(teams::remove_member).patch(teams::update_member_role),
        )
}

/// Create invitation lifecycle routes
fn invitation_routes() -> Router<TeamsState> {
    Router::new()
        .route(
            "/invitations/teams/{team_id}/invite",
            post(invitations::invite_member),
        )
        .route(
            "/invitations/my-invitations",
            get(invitations::my_invitations),
        )
        .route(
            "/invitations/teams/{team_id}",
            get(invitations::team_invitations),
        )
        // Accept/decline address the invitation by token, cancel by id.
        // The path parameter shares a name because the router requires
        // consistent parameter names at the same position.
        .route(
            "/invitations/{id}/accept",
            patch(invitations::accept_invitation),
        )
        .route(
            "/invitations/{id}/decline",
            patch(invitations::decline_invitation),
        )
        .route(
            "/invitations/{id}",
            delete(invitations::cancel_invitation),
        )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .merge(auth_routes())
        .merge(team_routes())
        .merge(invitation_routes())
}
