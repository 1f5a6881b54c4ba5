//! Domain entities for the Huddle teams domain
//!
//! Each entity includes construction with validation, serialization, and
//! the business rules the repositories and handlers rely on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use huddle_common::{Error, Result};
use validator::ValidateEmail;

pub use crate::domain::state::InvitationStatus;
use crate::domain::state::{
    InvitationEvent, InvitationGuardContext, InvitationStateMachine, StateError,
};

/// Invitation validity window
pub const INVITATION_TTL_DAYS: i64 = 7;

/// Normalize an email address for storage and comparison.
///
/// Emails are stored lowercase and accept/decline identity checks compare
/// the normalized forms, so mixed-case registrations still match their
/// invitations.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Membership roles within a team, persisted as the `team_role` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "team_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamRole::Owner => write!(f, "owner"),
            TeamRole::Admin => write!(f, "admin"),
            TeamRole::Member => write!(f, "member"),
        }
    }
}

impl TeamRole {
    /// Roles permitted to invite, view, and cancel invitations for a team
    pub fn is_managerial(&self) -> bool {
        matches!(self, TeamRole::Owner | TeamRole::Admin)
    }

    /// Check if this role is owner
    pub fn is_owner(&self) -> bool {
        matches!(self, TeamRole::Owner)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Argon2 PHC string. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation. The email is normalized to
    /// lowercase before storage.
    pub fn new(email: String, name: String, password_hash: String) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Name must be 1-100 characters".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            email: normalize_email(&email),
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with validation
    pub fn new(name: String, owner_id: Uuid) -> Result<Self> {
        Self::validate_name(&name)?;

        let now = Utc::now();
        Ok(Team {
            id: Uuid::new_v4(),
            name,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate team name length
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Membership entity, the association between User and Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(team_id: Uuid, user_id: Uuid, role: TeamRole) -> Self {
        Membership {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Invitation entity, a time-boxed tokenized offer for an email address to
/// join a team at a given role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invitation {
    pub id: Uuid,
    pub team_id: Uuid,
    pub invited_by: Uuid,
    pub email: String,
    pub role: TeamRole,
    pub token: String,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Create a new pending invitation.
    ///
    /// Generates a fresh unguessable token (32 random bytes, URL-safe
    /// base64, 43 chars) and sets the 7-day expiry window. The invitee
    /// email is normalized to lowercase.
    pub fn new(team_id: Uuid, invited_by: Uuid, email: String, role: TeamRole) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        let mut token_bytes = [0u8; 32];
        getrandom::getrandom(&mut token_bytes)
            .map_err(|e| Error::Internal(format!("Failed to generate random bytes: {}", e)))?;
        let token = URL_SAFE_NO_PAD.encode(token_bytes);

        let now = Utc::now();
        Ok(Invitation {
            id: Uuid::new_v4(),
            team_id,
            invited_by,
            email: normalize_email(&email),
            role,
            token,
            status: InvitationStatus::Pending,
            expires_at: now + chrono::Duration::days(INVITATION_TTL_DAYS),
            created_at: now,
        })
    }

    /// Check if invitation is past its expiry window
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Check if invitation can still be acted upon
    pub fn is_actionable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Check whether this invitation is addressed to the given email,
    /// comparing normalized forms.
    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.email == normalize_email(email)
    }

    /// Accept the invitation (state change only; persistence is the
    /// repository's transactional concern)
    pub fn accept(&mut self) -> Result<()> {
        self.status = self.apply_transition(InvitationEvent::Accept)?;
        Ok(())
    }

    /// Decline the invitation
    pub fn decline(&mut self) -> Result<()> {
        self.status = self.apply_transition(InvitationEvent::Decline)?;
        Ok(())
    }

    /// Mark the invitation expired
    pub fn expire(&mut self) -> Result<()> {
        self.status = self.apply_transition(InvitationEvent::Expire)?;
        Ok(())
    }

    /// Apply a state transition using the state machine
    fn apply_transition(&self, event: InvitationEvent) -> Result<InvitationStatus> {
        let context = InvitationGuardContext {
            is_expired: self.is_expired(),
        };
        InvitationStateMachine::transition(self.status, event, Some(&context)).map_err(
            |e| match e {
                StateError::InvalidTransition { from, event } => Error::Conflict(format!(
                    "Invalid invitation transition: cannot apply '{}' event from '{}' state",
                    event, from
                )),
                StateError::TerminalState(state) => Error::Conflict(format!(
                    "Invitation is in terminal state '{}' and cannot transition",
                    state
                )),
                StateError::GuardFailed(msg) => Error::Expired(msg),
            },
        )
    }

    /// Check if a transition is valid without applying it
    pub fn can_transition(&self, event: &InvitationEvent) -> bool {
        let context = InvitationGuardContext {
            is_expired: self.is_expired(),
        };
        InvitationStateMachine::can_transition(self.status, event, Some(&context))
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if !self.email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if self.email != normalize_email(&self.email) {
            return Err(Error::Validation(
                "Invitation email must be stored lowercase".to_string(),
            ));
        }

        if self.created_at >= self.expires_at {
            return Err(Error::Validation(
                "Expiration must be after creation".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("Alice@Example.COM"), "alice@example.com");
        assert_eq!(normalize_email("  bob@x.com "), "bob@x.com");
    }

    #[test]
    fn test_user_creation() {
        let user = User::new(
            "Test@Example.com".to_string(),
            "Test User".to_string(),
            "$argon2id$fake".to_string(),
        )
        .unwrap();

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "Test User");
    }

    #[test]
    fn test_user_validation() {
        // Invalid email
        let result = User::new(
            "invalid-email".to_string(),
            "Name".to_string(),
            "hash".to_string(),
        );
        assert!(result.is_err());

        // Empty name
        let result = User::new(
            "test@example.com".to_string(),
            "".to_string(),
            "hash".to_string(),
        );
        assert!(result.is_err());

        // Name too long
        let result = User::new(
            "test@example.com".to_string(),
            "a".repeat(101),
            "hash".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_password_hash_never_serialized() {
        let user = User::new(
            "test@example.com".to_string(),
            "Test".to_string(),
            "$argon2id$secret-material".to_string(),
        )
        .unwrap();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret-material"));
    }

    #[test]
    fn test_team_creation() {
        let owner_id = Uuid::new_v4();
        let team = Team::new("Test Team".to_string(), owner_id).unwrap();

        assert_eq!(team.name, "Test Team");
        assert_eq!(team.owner_id, owner_id);
    }

    #[test]
    fn test_team_name_validation() {
        assert!(Team::validate_name("My Team").is_ok());
        assert!(Team::validate_name(&"a".repeat(100)).is_ok());

        assert!(Team::validate_name("").is_err());
        assert!(Team::validate_name("   ").is_err());
        assert!(Team::validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_team_role_predicates() {
        assert!(TeamRole::Owner.is_managerial());
        assert!(TeamRole::Admin.is_managerial());
        assert!(!TeamRole::Member.is_managerial());

        assert!(TeamRole::Owner.is_owner());
        assert!(!TeamRole::Admin.is_owner());
        assert!(!TeamRole::Member.is_owner());
    }

    #[test]
    fn test_invitation_creation() {
        let team_id = Uuid::new_v4();
        let invited_by = Uuid::new_v4();

        let invitation = Invitation::new(
            team_id,
            invited_by,
            "Invitee@Example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();

        assert_eq!(invitation.team_id, team_id);
        assert_eq!(invitation.invited_by, invited_by);
        assert_eq!(invitation.email, "invitee@example.com");
        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert!(invitation.is_actionable());
        assert!(!invitation.is_expired());
        assert!(invitation.expires_at > Utc::now());
    }

    #[test]
    fn test_invitation_token_shape() {
        let invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();

        // 32 bytes, URL-safe base64 without padding = 43 chars
        assert_eq!(invitation.token.len(), 43);
        assert!(invitation
            .token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_invitation_tokens_are_unique() {
        let a = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();
        let b = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_invitation_is_addressed_to_normalizes() {
        let invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "invitee@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();

        assert!(invitation.is_addressed_to("invitee@example.com"));
        assert!(invitation.is_addressed_to("Invitee@Example.COM"));
        assert!(!invitation.is_addressed_to("other@example.com"));
    }

    #[test]
    fn test_invitation_accept_flips_status() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();

        invitation.accept().unwrap();
        assert_eq!(invitation.status, InvitationStatus::Accepted);
        assert!(!invitation.is_actionable());

        // Second accept fails
        assert!(invitation.accept().is_err());
    }

    #[test]
    fn test_invitation_accept_expired_fails_with_expired() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();
        invitation.expires_at = Utc::now() - chrono::Duration::seconds(10);

        let result = invitation.accept();
        assert!(matches!(result, Err(Error::Expired(_))));
        assert_eq!(invitation.status, InvitationStatus::Pending);
    }

    #[test]
    fn test_invitation_decline_ignores_expiry() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();
        invitation.expires_at = Utc::now() - chrono::Duration::seconds(10);

        invitation.decline().unwrap();
        assert_eq!(invitation.status, InvitationStatus::Declined);
    }

    #[test]
    fn test_invitation_decline_then_accept_conflicts() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();

        invitation.decline().unwrap();
        let result = invitation.accept();
        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[test]
    fn test_invitation_expire_transition() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();

        invitation.expire().unwrap();
        assert_eq!(invitation.status, InvitationStatus::Expired);
        assert!(invitation.expire().is_err());
    }

    #[test]
    fn test_invitation_validate_time_boundary() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();
        assert!(invitation.validate().is_ok());

        invitation.expires_at = invitation.created_at;
        assert!(invitation.validate().is_err());

        invitation.expires_at = invitation.created_at - chrono::Duration::days(1);
        assert!(invitation.validate().is_err());
    }

    #[test]
    fn test_invitation_validate_rejects_uppercase_email() {
        let mut invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Member,
        )
        .unwrap();
        invitation.email = "Test@Example.com".to_string();
        assert!(invitation.validate().is_err());
    }

    #[test]
    fn test_invitation_empty_email_rejected() {
        let result = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "".to_string(),
            TeamRole::Member,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let invitation = Invitation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test@example.com".to_string(),
            TeamRole::Admin,
        )
        .unwrap();

        let json = serde_json::to_string(&invitation).unwrap();
        assert!(json.contains("\"pending\""));
        assert!(json.contains("\"admin\""));

        let deserialized: Invitation = serde_json::from_str(&json).unwrap();
        assert_eq!(invitation, deserialized);
    }
}
