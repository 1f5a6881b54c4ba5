//! Team management API handlers
//!
//! Implements team CRUD and membership administration with role-based
//! authorization. Role checks always hit the database so a role change
//! takes effect on the next request.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use huddle_common::{Error, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::{AuthUser, TeamsState};
use crate::repository::{MembershipWithUser, TeamWithRole};
use crate::{create_membership_tx, create_team_tx, Membership, Team, TeamRole};

/// Request for creating a new team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team display name
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request for renaming a team
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request for updating a member's role
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRoleRequest {
    pub role: TeamRole,
}

/// Team response for API operations
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// The calling user's role in this team, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TeamRole>,
}

impl TeamResponse {
    fn from_team(team: Team, role: Option<TeamRole>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            owner_id: team.owner_id,
            created_at: team.created_at,
            updated_at: team.updated_at,
            role,
        }
    }
}

impl From<TeamWithRole> for TeamResponse {
    fn from(t: TeamWithRole) -> Self {
        Self {
            id: t.id,
            name: t.name,
            owner_id: t.owner_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
            role: Some(t.role),
        }
    }
}

/// Response for membership operations
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: TeamRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_email: String,
    pub user_name: String,
}

impl From<MembershipWithUser> for MembershipResponse {
    fn from(m: MembershipWithUser) -> Self {
        Self {
            id: m.id,
            team_id: m.team_id,
            user_id: m.user_id,
            role: m.role,
            created_at: m.created_at,
            user_email: m.user_email,
            user_name: m.user_name,
        }
    }
}

/// List teams for the current user
///
/// **GET /teams**
pub async fn list_teams(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<Vec<TeamResponse>>> {
    let user = &auth_context.0.user;

    let teams = state.repos.teams.find_by_user(user.id).await?;
    let responses: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();

    Ok(Json(responses))
}

/// Create a new team
///
/// **POST /teams**
///
/// Creates a team with the authenticated user as owner. The team row and
/// the owner membership land in one transaction, so a team never exists
/// without its owner membership.
pub async fn create_team(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    let user = &auth_context.0.user;

    let team = Team::new(request.name, user.id)?;

    let mut tx = state
        .repos
        .begin()
        .await
        .map_err(|e| Error::Internal(format!("Failed to begin transaction: {}", e)))?;

    let created_team = create_team_tx(&mut tx, &team)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create team: {}", e)))?;

    let membership = Membership::new(created_team.id, user.id, TeamRole::Owner);

    create_membership_tx(&mut tx, &membership)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create membership: {}", e)))?;

    // Explicit commit; drop without commit rolls back
    tx.commit()
        .await
        .map_err(|e| Error::Internal(format!("Failed to commit transaction: {}", e)))?;

    Ok((
        StatusCode::CREATED,
        Json(TeamResponse::from_team(created_team, Some(TeamRole::Owner))),
    ))
}

/// Get a team by ID
///
/// **GET /teams/{team_id}**
///
/// Any member of the team can view it.
pub async fn get_team(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamResponse>> {
    let user = &auth_context.0.user;

    let team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    let membership = state
        .repos
        .memberships
        .get_by_team_and_user(team_id, user.id)
        .await?
        .ok_or_else(|| {
            Error::Authorization("Access denied: Not a member of this team".to_string())
        })?;

    Ok(Json(TeamResponse::from_team(team, Some(membership.role))))
}

/// Rename a team
///
/// **PATCH /teams/{team_id}**
///
/// Only owners and admins can rename.
pub async fn update_team(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>> {
    let user = &auth_context.0.user;

    state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !state
        .repos
        .memberships
        .has_managerial_role(team_id, user.id)
        .await?
    {
        return Err(Error::Authorization(
            "Access denied: Must be owner or admin to update the team".to_string(),
        ));
    }

    Team::validate_name(&request.name)?;

    let updated = state.repos.teams.update_name(team_id, &request.name).await?;

    Ok(Json(TeamResponse::from_team(updated, None)))
}

/// Delete a team
///
/// **DELETE /teams/{team_id}**
///
/// Only the owner can delete. Memberships and invitations cascade with
/// the team row.
pub async fn delete_team(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode> {
    let user = &auth_context.0.user;

    state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    let membership = state
        .repos
        .memberships
        .get_by_team_and_user(team_id, user.id)
        .await?
        .ok_or_else(|| {
            Error::Authorization("Access denied: Not a member of this team".to_string())
        })?;

    if !membership.role.is_owner() {
        return Err(Error::Authorization(
            "Access denied: Only the owner can delete the team".to_string(),
        ));
    }

    state.repos.teams.delete(team_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List team members
///
/// **GET /teams/{team_id}/members**
///
/// Any team member can view the list.
pub async fn list_members(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<MembershipResponse>>> {
    let user = &auth_context.0.user;

    let membership = state
        .repos
        .memberships
        .get_by_team_and_user(team_id, user.id)
        .await?;

    if membership.is_none() {
        return Err(Error::Authorization(
            "Access denied: Not a member of this team".to_string(),
        ));
    }

    let members = state.repos.memberships.list_by_team(team_id).await?;
    let responses: Vec<MembershipResponse> =
        members.into_iter().map(MembershipResponse::from).collect();

    Ok(Json(responses))
}

/// Remove a team member
///
/// **DELETE /teams/{team_id}/members/{user_id}**
///
/// Only owners and admins can remove members. The owner cannot be
/// removed.
pub async fn remove_member(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    Path((team_id, member_user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let user = &auth_context.0.user;

    if !state
        .repos
        .memberships
        .has_managerial_role(team_id, user.id)
        .await?
    {
        return Err(Error::Authorization(
            "Access denied: Must be owner or admin to remove members".to_string(),
        ));
    }

    let target = state
        .repos
        .memberships
        .get_by_team_and_user(team_id, member_user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Member not found in this team".to_string()))?;

    if target.role.is_owner() {
        return Err(Error::Conflict(
            "The team owner cannot be removed".to_string(),
        ));
    }

    state
        .repos
        .memberships
        .delete(team_id, member_user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Update a team member's role
///
/// **PATCH /teams/{team_id}/members/{user_id}**
///
/// Only the owner can change roles, and the owner's own role is fixed.
pub async fn update_member_role(
    auth_context: AuthUser,
    State(state): State<TeamsState>,
    Path((team_id, member_user_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRoleRequest>,
) -> Result<Json<MembershipResponse>> {
    let user = &auth_context.0.user;

    let acting = state
        .repos
        .memberships
        .get_by_team_and_user(team_id, user.id)
        .await?
        .ok_or_else(|| {
            Error::Authorization("Access denied: Not a member of this team".to_string())
        })?;

    if !acting.role.is_owner() {
        return Err(Error::Authorization(
            "Access denied: Only the owner can change member roles".to_string(),
        ));
    }

    let target = state
        .repos
        .memberships
        .get_by_team_and_user(team_id, member_user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Member not found in this team".to_string()))?;

    if target.role.is_owner() {
        return Err(Error::Conflict(
            "The owner's role cannot be changed".to_string(),
        ));
    }

    if request.role == TeamRole::Owner {
        return Err(Error::Validation(
            "Ownership cannot be granted through role updates".to_string(),
        ));
    }

    let updated = state
        .repos
        .memberships
        .update_role(team_id, member_user_id, request.role)
        .await?;

    let target_user = state
        .repos
        .users
        .get_by_id(member_user_id)
        .await?
        .ok_or_else(|| Error::Internal("User not found for membership".to_string()))?;

    Ok(Json(MembershipResponse {
        id: updated.id,
        team_id: updated.team_id,
        user_id: updated.user_id,
        role: updated.role,
        created_at: updated.created_at,
        user_email: target_user.email,
        user_name: target_user.name,
    }))
}
