use std::sync::Arc;

use secrecy::ExposeSecret;
use timetable_core::{Email, EmailClient, EmailClientError};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that keeps every message in memory instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    pub async fn last_email_to(&self, recipient: &str) -> Option<SentEmail> {
        let sent = self.sent.read().await;
        sent.iter().rev().find(|m| m.recipient == recipient).cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
