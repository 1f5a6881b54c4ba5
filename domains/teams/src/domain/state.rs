//! Invitation status state machine
//!
//! Invitation status is stored directly on the row and evolves through a
//! small finite state machine:
//! - Valid states
//! - Events that trigger transitions
//! - Guard conditions for transitions
//! - Terminal states

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} via {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

/// Invitation status, persisted as the `invitation_status` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InvitationStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined | Self::Expired)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [InvitationStatus] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Declined, Self::Expired],
            Self::Accepted => &[],
            Self::Declined => &[],
            Self::Expired => &[],
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Declined => write!(f, "declined"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Events that trigger invitation status transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvitationEvent {
    /// Invited user accepts the invitation
    Accept,
    /// Invited user declines the invitation
    Decline,
    /// Invitation expires (sweep marks pending rows past expires_at)
    Expire,
}

impl std::fmt::Display for InvitationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Decline => write!(f, "decline"),
            Self::Expire => write!(f, "expire"),
        }
    }
}

/// Guard context for invitation transitions
#[derive(Debug, Clone)]
pub struct InvitationGuardContext {
    /// Whether the invitation has expired (expires_at < now)
    pub is_expired: bool,
}

/// Invitation state machine.
///
/// Accept is guarded by non-expiry; Decline deliberately is not, so a user
/// can still decline an expired-but-not-yet-swept invitation.
pub struct InvitationStateMachine;

impl InvitationStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: InvitationStatus,
        event: InvitationEvent,
        context: Option<&InvitationGuardContext>,
    ) -> Result<InvitationStatus, StateError> {
        // Check for terminal state
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (InvitationStatus::Pending, InvitationEvent::Accept) => {
                // Guard: invitation must not be expired
                if let Some(ctx) = context {
                    if ctx.is_expired {
                        return Err(StateError::GuardFailed(
                            "Cannot accept expired invitation".to_string(),
                        ));
                    }
                }
                InvitationStatus::Accepted
            }
            (InvitationStatus::Pending, InvitationEvent::Decline) => InvitationStatus::Declined,
            (InvitationStatus::Pending, InvitationEvent::Expire) => InvitationStatus::Expired,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(
        current: InvitationStatus,
        event: &InvitationEvent,
        context: Option<&InvitationGuardContext>,
    ) -> bool {
        Self::transition(current, *event, context).is_ok()
    }
}
