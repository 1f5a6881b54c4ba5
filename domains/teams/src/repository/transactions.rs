//! Transactional free functions for the Teams domain
//!
//! Multi-row writes that must commit or roll back together take an open
//! transaction rather than the pool. Callers own the commit; dropping the
//! transaction rolls everything back.

use crate::domain::entities::{Invitation, Membership, Team};
use huddle_common::RepositoryError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Create a team within an existing transaction.
pub async fn create_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> std::result::Result<Team, sqlx::Error> {
    let created = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, owner_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, owner_id, created_at, updated_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(team.owner_id)
    .bind(team.created_at)
    .bind(team.updated_at)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Create a membership within an existing transaction.
pub async fn create_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    membership: &Membership,
) -> std::result::Result<Membership, sqlx::Error> {
    let created = sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO memberships (id, team_id, user_id, role, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, team_id, user_id, role, created_at
        "#,
    )
    .bind(membership.id)
    .bind(membership.team_id)
    .bind(membership.user_id)
    .bind(membership.role)
    .bind(membership.created_at)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Create an invitation within an existing transaction.
pub async fn create_invitation_tx(
    transaction: &mut Transaction<'_, Postgres>,
    invitation: &Invitation,
) -> std::result::Result<Invitation, sqlx::Error> {
    let created = sqlx::query_as::<_, Invitation>(
        r#"
        INSERT INTO invitations (id, team_id, invited_by, email, role, token, status, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, team_id, invited_by, email, role, token, status, expires_at, created_at
        "#,
    )
    .bind(invitation.id)
    .bind(invitation.team_id)
    .bind(invitation.invited_by)
    .bind(&invitation.email)
    .bind(invitation.role)
    .bind(&invitation.token)
    .bind(invitation.status)
    .bind(invitation.expires_at)
    .bind(invitation.created_at)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Delete an invitation row within an existing transaction.
///
/// Used to clear a terminal invitation before re-inviting the same email
/// to the same team, so the delete and the replacement insert land
/// atomically.
pub async fn delete_invitation_tx(
    transaction: &mut Transaction<'_, Postgres>,
    invitation_id: Uuid,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM invitations WHERE id = $1")
        .bind(invitation_id)
        .execute(&mut **transaction)
        .await?;
    Ok(())
}

/// Mark an invitation as accepted within an existing transaction.
///
/// The update is conditional on the row still being pending. Returns
/// `RepositoryError::NotFound` when the row is gone or another actor
/// already moved it out of pending, which makes concurrent accepts settle
/// with exactly one winner.
pub async fn mark_invitation_accepted_tx(
    transaction: &mut Transaction<'_, Postgres>,
    invitation_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query(
        r#"
        UPDATE invitations
        SET status = 'accepted'
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(invitation_id)
    .execute(&mut **transaction)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
