//! Invitation workflow tests
//!
//! Walks the invitation lifecycle end to end at the domain and email
//! layers: create, deliver, extract the token from the captured email,
//! and settle the invitation through each terminal outcome.

use chrono::Utc;
use uuid::Uuid;

use huddle_common::Error;
use huddle_email::{EmailService, MockEmailService};
use huddle_teams::{Invitation, InvitationStatus, TeamRole};

#[tokio::test]
async fn test_invitation_email_carries_usable_token() {
    let email_service = MockEmailService::new();
    let team_id = Uuid::new_v4();

    let invitation = Invitation::new(
        team_id,
        Uuid::new_v4(),
        "newdev@company.com".to_string(),
        TeamRole::Admin,
    )
    .unwrap();

    email_service
        .send_team_invitation(
            "Awesome Development Team",
            team_id,
            &invitation.token,
            &invitation.email,
            "Sarah Johnson",
            &invitation.role.to_string(),
        )
        .await
        .unwrap();

    assert!(email_service.was_invitation_sent_to("newdev@company.com"));

    let captured = email_service
        .get_latest_invitation_email("newdev@company.com")
        .unwrap();

    // The email names the team, the inviter, and the role
    assert!(captured.message.subject.contains("Awesome Development Team"));
    assert!(captured.message.body_text.contains("Sarah Johnson"));
    assert!(captured.message.body_text.contains("admin"));

    // The embedded accept link resolves back to the original token
    let extracted = captured.extract_invitation_token().unwrap();
    assert_eq!(extracted, invitation.token);
    assert_eq!(captured.extract_team_id(), Some(team_id));
}

#[tokio::test]
async fn test_invitation_accept_path() {
    let mut invitation = Invitation::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Invitee@Company.com".to_string(),
        TeamRole::Member,
    )
    .unwrap();

    // Stored lowercase, matched case-insensitively
    assert_eq!(invitation.email, "invitee@company.com");
    assert!(invitation.is_addressed_to("INVITEE@company.COM"));
    assert!(!invitation.is_addressed_to("other@company.com"));

    invitation.accept().unwrap();
    assert_eq!(invitation.status, InvitationStatus::Accepted);

    // Terminal: no further transitions
    assert!(matches!(invitation.accept(), Err(Error::Conflict(_))));
    assert!(matches!(invitation.decline(), Err(Error::Conflict(_))));
}

#[tokio::test]
async fn test_expired_invitation_cannot_be_accepted_but_can_be_declined() {
    let mut invitation = Invitation::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "invitee@company.com".to_string(),
        TeamRole::Member,
    )
    .unwrap();
    invitation.expires_at = Utc::now() - chrono::Duration::hours(1);

    // Accept is guarded by the expiry window
    assert!(matches!(invitation.accept(), Err(Error::Expired(_))));
    assert_eq!(invitation.status, InvitationStatus::Pending);

    // Decline is not: the invitee can still clear it from their list
    invitation.decline().unwrap();
    assert_eq!(invitation.status, InvitationStatus::Declined);
}

#[tokio::test]
async fn test_welcome_email_after_acceptance() {
    let email_service = MockEmailService::new();
    let team_id = Uuid::new_v4();

    email_service
        .send_welcome_email("Awesome Development Team", team_id, "newdev@company.com", "New Dev")
        .await
        .unwrap();

    let emails = email_service.get_emails_for_recipient("newdev@company.com");
    assert_eq!(emails.len(), 1);
    assert_eq!(
        emails[0].message.metadata.get("email_type"),
        Some(&"welcome".to_string())
    );
    assert!(emails[0].message.body_text.contains("Awesome Development Team"));
}

#[tokio::test]
async fn test_reinvite_flow_generates_fresh_token() {
    let email_service = MockEmailService::new();
    let team_id = Uuid::new_v4();
    let inviter = Uuid::new_v4();

    let first = Invitation::new(
        team_id,
        inviter,
        "invitee@company.com".to_string(),
        TeamRole::Member,
    )
    .unwrap();
    let second = Invitation::new(
        team_id,
        inviter,
        "invitee@company.com".to_string(),
        TeamRole::Member,
    )
    .unwrap();

    assert_ne!(first.token, second.token);

    for invitation in [&first, &second] {
        email_service
            .send_team_invitation(
                "Awesome Development Team",
                team_id,
                &invitation.token,
                &invitation.email,
                "Sarah Johnson",
                "member",
            )
            .await
            .unwrap();
    }

    // The latest captured email carries the replacement token
    let latest_token = email_service
        .get_invitation_token_for_email("invitee@company.com")
        .unwrap();
    assert_eq!(latest_token, second.token);
}
