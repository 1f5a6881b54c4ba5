//! Team repository

use crate::domain::entities::{Team, TeamRole};
use huddle_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Team with the calling user's role, for list responses
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TeamWithRole {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub role: TeamRole,
}

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find team by ID
    pub async fn get_by_id(&self, team_id: Uuid) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, owner_id, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all teams the user belongs to, with the user's role in each
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<TeamWithRole>> {
        let teams = sqlx::query_as::<_, TeamWithRole>(
            r#"
            SELECT t.id, t.name, t.owner_id, t.created_at, t.updated_at, m.role
            FROM teams t
            INNER JOIN memberships m ON m.team_id = t.id
            WHERE m.user_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    /// Update team name
    pub async fn update_name(&self, team_id: Uuid, name: &str) -> Result<Team> {
        let updated = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, owner_id, created_at, updated_at
            "#,
        )
        .bind(team_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(updated)
    }

    /// Delete a team. Memberships and invitations cascade.
    pub async fn delete(&self, team_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }
}
