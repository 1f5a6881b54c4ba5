//! Teams domain: users, teams, memberships, and the invitation lifecycle

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{
    InvitationEvent, InvitationGuardContext, InvitationStateMachine, InvitationStatus, StateError,
};
// Re-export repository types
pub use repository::{
    create_invitation_tx, create_membership_tx, create_team_tx, delete_invitation_tx,
    mark_invitation_accepted_tx, InvitationRepository, InvitationWithTeam, MembershipRepository,
    MembershipWithUser, TeamRepository, TeamWithRole, TeamsRepositories, UserRepository,
};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;

// Re-export auth types from huddle-auth for downstream convenience
pub use huddle_auth::{AuthBackend, AuthConfig, AuthContext, AuthError, AuthUser};
