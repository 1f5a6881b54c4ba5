//! Repository implementations for the Teams domain

pub mod invitations;
pub mod memberships;
pub mod teams;
pub mod transactions;
pub mod users;

use sqlx::{PgPool, Postgres, Transaction};

pub use invitations::{InvitationRepository, InvitationWithTeam};
pub use memberships::{MembershipRepository, MembershipWithUser};
pub use teams::{TeamRepository, TeamWithRole};
pub use transactions::{
    create_invitation_tx, create_membership_tx, create_team_tx, delete_invitation_tx,
    mark_invitation_accepted_tx,
};
pub use users::UserRepository;

/// Combined repository access for the Teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub teams: TeamRepository,
    pub memberships: MembershipRepository,
    pub invitations: InvitationRepository,
}

impl TeamsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            invitations: InvitationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
