//! Membership repository

use crate::domain::entities::{Membership, TeamRole};
use huddle_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Membership with joined user details for list responses
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct MembershipWithUser {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: TeamRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_email: String,
    pub user_name: String,
}

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get membership by team and user
    pub async fn get_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>> {
        let row = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, team_id, user_id, role, created_at
            FROM memberships
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all memberships for a team with user details
    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<MembershipWithUser>> {
        let memberships = sqlx::query_as::<_, MembershipWithUser>(
            r#"
            SELECT m.id, m.team_id, m.user_id, m.role, m.created_at,
                   u.email as user_email, u.name as user_name
            FROM memberships m
            INNER JOIN users u ON m.user_id = u.id
            WHERE m.team_id = $1
            ORDER BY
                CASE m.role
                    WHEN 'owner' THEN 0
                    WHEN 'admin' THEN 1
                    WHEN 'member' THEN 2
                END ASC,
                u.name ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }

    /// Check whether the user holds an owner or admin role on the team.
    ///
    /// Always hits the database. Roles are never cached on the request
    /// context, so a revocation takes effect on the next call.
    pub async fn has_managerial_role(&self, team_id: Uuid, user_id: Uuid) -> Result<bool> {
        let membership = self.get_by_team_and_user(team_id, user_id).await?;
        Ok(membership.map(|m| m.role.is_managerial()).unwrap_or(false))
    }

    /// Update a member's role
    pub async fn update_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Membership> {
        let updated = sqlx::query_as::<_, Membership>(
            r#"
            UPDATE memberships
            SET role = $3
            WHERE team_id = $1 AND user_id = $2
            RETURNING id, team_id, user_id, role, created_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(updated)
    }

    /// Remove a member from a team
    pub async fn delete(&self, team_id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM memberships WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }
}
