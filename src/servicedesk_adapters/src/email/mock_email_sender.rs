use std::sync::Arc;

use servicedesk_core::{EmailMessage, EmailSender, EmailSenderError};
use tokio::sync::RwLock;

/// Keeps every message instead of delivering it. Used for local runs and the
/// API tests, which read confirmation links back out of the outbox.
#[derive(Debug, Clone, Default)]
pub struct MockEmailSender {
    outbox: Arc<RwLock<Vec<EmailMessage>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.outbox.read().await.clone()
    }

    pub async fn last(&self) -> Option<EmailMessage> {
        self.outbox.read().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSenderError> {
        tracing::debug!(subject = message.subject(), "Recording outbound email");
        self.outbox.write().await.push(message.clone());
        Ok(())
    }
}
