//! Authentication API handlers
//!
//! Implements:
//! - POST /auth/register — Create an account and issue a session token
//! - POST /auth/login — Verify credentials and issue a session token
//! - GET /auth/me — Return the authenticated user's profile

use axum::{extract::State, http::StatusCode, Json};
use huddle_auth::{hash_password, issue_session_token, validate_password_strength,
    verify_password, AuthIdentity};
use huddle_common::{Error, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::{AuthUser, TeamsState};
use crate::domain::entities::User;

/// Request for registering a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Public view of a user for API responses
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

impl From<AuthIdentity> for UserResponse {
    fn from(user: AuthIdentity) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Response for register and login, carrying the session token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

fn identity_from_user(user: &User) -> AuthIdentity {
    AuthIdentity {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Register a new account
///
/// **POST /auth/register**
///
/// Creates a user and returns a session token. The email is normalized
/// to lowercase, so `Alice@Example.com` and `alice@example.com` are the
/// same account.
pub async fn register(
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    validate_password_strength(&request.password).map_err(Error::Validation)?;

    let password_hash = hash_password(&request.password)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

    let user = User::new(request.email, request.name, password_hash)?;

    // The unique index on email backs this up; the repository maps a
    // duplicate insert to a conflict
    let created = state.repos.users.create(&user).await.map_err(|e| match e {
        Error::Conflict(_) => Error::Conflict("Email is already registered".to_string()),
        other => other,
    })?;

    let token = issue_session_token(&identity_from_user(&created), state.auth.config())
        .map_err(|e| Error::Internal(format!("Failed to issue session token: {}", e)))?;

    // Delivery failure must not fail the registration
    if let Err(e) = state
        .email
        .send_registration_email(&created.email, &created.name)
        .await
    {
        tracing::warn!(
            error = %e,
            email = %created.email,
            "Failed to send registration email"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user: UserResponse::from(created),
            token,
        }),
    ))
}

/// Log in with email and password
///
/// **POST /auth/login**
///
/// Verifies credentials and returns a session token. Unknown email and
/// wrong password both report the same error, so the endpoint does not
/// leak which emails are registered.
pub async fn login(
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let user = state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Authentication("Invalid email or password".to_string()))?;

    let valid = verify_password(&request.password, &user.password_hash)
        .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;

    if !valid {
        return Err(Error::Authentication(
            "Invalid email or password".to_string(),
        ));
    }

    let token = issue_session_token(&identity_from_user(&user), state.auth.config())
        .map_err(|e| Error::Internal(format!("Failed to issue session token: {}", e)))?;

    Ok(Json(SessionResponse {
        user: UserResponse::from(user),
        token,
    }))
}

/// Return the authenticated user's profile
///
/// **GET /auth/me**
pub async fn me(auth_context: AuthUser) -> Result<Json<UserResponse>> {
    Ok(Json(UserResponse::from(auth_context.0.user)))
}
