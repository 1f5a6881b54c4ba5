//! Mock Email Service Implementation
//!
//! Provides in-memory email capture for testing without external
//! dependencies. Captured invitation emails expose the embedded token so
//! workflow tests can follow the accept/decline links.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailError, EmailMessage, EmailReceipt, EmailService};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

impl CapturedEmail {
    /// Extract the invitation token from email content
    pub fn extract_invitation_token(&self) -> Option<String> {
        // First check metadata
        if let Some(token) = self.message.metadata.get("invitation_token") {
            return Some(token.clone());
        }

        // Try to extract from URL patterns in email body
        let text = format!(
            "{} {}",
            self.message.body_text,
            self.message.body_html.as_deref().unwrap_or("")
        );

        // Look for patterns like /invitations/{token}/accept
        let pattern = r"/invitations/([A-Za-z0-9_-]+)/accept";
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(captures) = re.captures(&text) {
                if let Some(token) = captures.get(1) {
                    return Some(token.as_str().to_string());
                }
            }
        }

        None
    }

    /// Extract team ID from email content
    pub fn extract_team_id(&self) -> Option<Uuid> {
        // First check metadata
        if let Some(team_id_str) = self.message.metadata.get("team_id") {
            if let Ok(uuid) = Uuid::parse_str(team_id_str) {
                return Some(uuid);
            }
        }

        // Try to extract from URL patterns
        let text = format!(
            "{} {}",
            self.message.body_text,
            self.message.body_html.as_deref().unwrap_or("")
        );

        let pattern = r"/teams/([0-9a-f-]{36})";
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(captures) = re.captures(&text) {
                if let Some(uuid_str) = captures.get(1) {
                    if let Ok(uuid) = Uuid::parse_str(uuid_str.as_str()) {
                        return Some(uuid);
                    }
                }
            }
        }

        None
    }
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    email_by_recipient: Arc<Mutex<HashMap<String, Vec<CapturedEmail>>>>,
    enabled: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            enabled: true,
        }
    }

    /// Create a disabled mock email service (for testing)
    pub fn new_disabled() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            enabled: false,
        }
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        self.emails.lock().unwrap().clone()
    }

    /// Get emails sent to a specific recipient
    pub fn get_emails_for_recipient(&self, email: &str) -> Vec<CapturedEmail> {
        self.email_by_recipient
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Get the most recent invitation email for a recipient
    pub fn get_latest_invitation_email(&self, email: &str) -> Option<CapturedEmail> {
        self.get_emails_for_recipient(email)
            .into_iter()
            .filter(|e| {
                e.message
                    .metadata
                    .get("email_type")
                    .map(|t| t == "team_invitation")
                    .unwrap_or(false)
                    || e.message.subject.to_lowercase().contains("invitation")
            })
            .max_by_key(|e| e.captured_at)
    }

    /// Get invitation token from the most recent invitation email
    pub fn get_invitation_token_for_email(&self, email: &str) -> Option<String> {
        self.get_latest_invitation_email(email)
            .and_then(|email| email.extract_invitation_token())
    }

    /// Check if an invitation email was sent to a specific email address
    pub fn was_invitation_sent_to(&self, email: &str) -> bool {
        self.get_invitation_token_for_email(email).is_some()
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        self.emails.lock().unwrap().len()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        self.emails.lock().unwrap().clear();
        self.email_by_recipient.lock().unwrap().clear();
    }

    /// Check if email sending is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if !self.enabled {
            tracing::warn!("Mock email service disabled, skipping send");
            return Ok(EmailReceipt {
                message_id: format!("disabled-{}", Uuid::new_v4()),
                sent_at: Utc::now(),
                provider: "mock-disabled".to_string(),
                metadata: message.metadata.clone(),
            });
        }

        tracing::info!("Mock email service capturing email to: {}", message.to);

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message: message.clone(),
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        // Store email in global list
        self.emails.lock().unwrap().push(captured.clone());

        // Store email by recipient for easy lookup
        self.email_by_recipient
            .lock()
            .unwrap()
            .entry(message.to)
            .or_default()
            .push(captured);

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        "invitations@huddle.app".to_string()
    }

    fn app_base_url(&self) -> &str {
        "https://huddle.app"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_email_service() {
        let service = MockEmailService::new();

        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "sender@huddle.app".to_string(),
            "Test Subject".to_string(),
            "Test body".to_string(),
        );

        let receipt = service.send_email(message).await.unwrap();

        assert!(receipt.message_id.starts_with("mock-"));
        assert_eq!(receipt.provider, "mock");
        assert_eq!(service.email_count(), 1);

        let emails = service.get_emails_for_recipient("test@example.com");
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].message.subject, "Test Subject");
    }

    #[tokio::test]
    async fn test_team_invitation_email() {
        let service = MockEmailService::new();
        let team_id = Uuid::new_v4();
        let token = "dGVzdC1pbnZpdGF0aW9uLXRva2Vu";

        let receipt = service
            .send_team_invitation(
                "Test Team",
                team_id,
                token,
                "invitee@example.com",
                "Inviter User",
                "member",
            )
            .await
            .unwrap();

        assert_eq!(receipt.provider, "mock");

        let captured = service
            .get_latest_invitation_email("invitee@example.com")
            .unwrap();
        assert_eq!(
            captured.extract_invitation_token(),
            Some(token.to_string())
        );
        assert_eq!(captured.extract_team_id(), Some(team_id));

        assert!(service.was_invitation_sent_to("invitee@example.com"));
        assert_eq!(
            service.get_invitation_token_for_email("invitee@example.com"),
            Some(token.to_string())
        );
    }

    #[test]
    fn test_invitation_token_extraction_from_body() {
        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "sender@huddle.app".to_string(),
            "Team Invitation".to_string(),
            "Click here: https://huddle.app/invitations/a1B2c3D4e5F6/accept".to_string(),
        );

        let captured = CapturedEmail {
            message,
            receipt: EmailReceipt {
                message_id: "test".to_string(),
                sent_at: Utc::now(),
                provider: "test".to_string(),
                metadata: HashMap::new(),
            },
            captured_at: Utc::now(),
        };

        assert_eq!(
            captured.extract_invitation_token(),
            Some("a1B2c3D4e5F6".to_string())
        );
    }

    #[tokio::test]
    async fn test_welcome_email() {
        let service = MockEmailService::new();
        let team_id = Uuid::new_v4();

        let receipt = service
            .send_welcome_email("Test Team", team_id, "member@example.com", "New Member")
            .await
            .unwrap();

        assert_eq!(receipt.provider, "mock");

        let emails = service.get_emails_for_recipient("member@example.com");
        assert_eq!(emails.len(), 1);
        assert_eq!(
            emails[0].message.metadata.get("email_type"),
            Some(&"welcome".to_string())
        );
        assert_eq!(emails[0].extract_team_id(), Some(team_id));
    }

    #[tokio::test]
    async fn test_disabled_mock_service() {
        let service = MockEmailService::new_disabled();

        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "sender@huddle.app".to_string(),
            "Test Subject".to_string(),
            "Test body".to_string(),
        );

        let receipt = service.send_email(message).await.unwrap();

        assert!(receipt.message_id.starts_with("disabled-"));
        assert_eq!(receipt.provider, "mock-disabled");
        assert_eq!(service.email_count(), 0); // Email not captured when disabled
    }
}
