//! Invitation repository

use crate::domain::entities::{normalize_email, Invitation, TeamRole};
use crate::domain::state::InvitationStatus;
use huddle_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

const INVITATION_COLUMNS: &str =
    "id, team_id, invited_by, email, role, token, status, expires_at, created_at";

/// Invitation with the inviting team and inviter joined in, backing the
/// listing and creation responses
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct InvitationWithTeam {
    pub id: Uuid,
    pub team_id: Uuid,
    pub invited_by: Uuid,
    pub email: String,
    pub role: TeamRole,
    pub token: String,
    pub status: InvitationStatus,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub team_name: String,
    pub inviter_name: String,
    pub inviter_email: String,
}

#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find invitation by ID
    pub async fn get_by_id(&self, invitation_id: Uuid) -> Result<Option<Invitation>> {
        let row = sqlx::query_as::<_, Invitation>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = $1"
        ))
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find invitation by its accept/decline token
    pub async fn get_by_token(&self, token: &str) -> Result<Option<Invitation>> {
        let row = sqlx::query_as::<_, Invitation>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find the invitation for a team and email, any status.
    ///
    /// At most one row exists per (email, team) pair.
    pub async fn get_by_team_and_email(
        &self,
        team_id: Uuid,
        email: &str,
    ) -> Result<Option<Invitation>> {
        let row = sqlx::query_as::<_, Invitation>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE team_id = $1 AND email = $2"
        ))
        .bind(team_id)
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List pending, unexpired invitations addressed to an email, with
    /// the inviting team and inviter joined in
    pub async fn find_pending_for_email(&self, email: &str) -> Result<Vec<InvitationWithTeam>> {
        let rows = sqlx::query_as::<_, InvitationWithTeam>(
            r#"
            SELECT i.id, i.team_id, i.invited_by, i.email, i.role, i.token,
                   i.status, i.expires_at, i.created_at, t.name as team_name,
                   u.name as inviter_name, u.email as inviter_email
            FROM invitations i
            INNER JOIN teams t ON i.team_id = t.id
            INNER JOIN users u ON i.invited_by = u.id
            WHERE i.email = $1 AND i.status = 'pending' AND i.expires_at > NOW()
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(normalize_email(email))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// List pending invitations for a team, with the team and inviter
    /// joined in
    pub async fn find_pending_by_team(&self, team_id: Uuid) -> Result<Vec<InvitationWithTeam>> {
        let rows = sqlx::query_as::<_, InvitationWithTeam>(
            r#"
            SELECT i.id, i.team_id, i.invited_by, i.email, i.role, i.token,
                   i.status, i.expires_at, i.created_at, t.name as team_name,
                   u.name as inviter_name, u.email as inviter_email
            FROM invitations i
            INNER JOIN teams t ON i.team_id = t.id
            INNER JOIN users u ON i.invited_by = u.id
            WHERE i.team_id = $1 AND i.status = 'pending'
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Decline a pending invitation (invitee-initiated).
    ///
    /// The status update is conditional on the row still being pending, so
    /// a concurrent accept or sweep loses exactly one of the races.
    pub async fn decline(&self, invitation_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'declined'
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }

    /// Cancel an invitation by deleting the row (manager-initiated).
    ///
    /// Cancellation is a hard delete, not a status. A cancelled invitation
    /// leaves no row behind and its token stops resolving.
    pub async fn delete(&self, invitation_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(invitation_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }

    /// Mark all pending invitations past their expiry as expired.
    ///
    /// Idempotent bulk update run by the background sweep. Returns the
    /// number of rows transitioned.
    pub async fn sweep_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'expired'
            WHERE status = 'pending' AND expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count invitations by status, for operational visibility
    pub async fn count_by_status(&self, status: InvitationStatus) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM invitations WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
