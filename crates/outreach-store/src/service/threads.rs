//! Email thread service

use chrono::Utc;
use outreach_common::types::{CampaignId, EmailThreadId, MessageDirection, ThreadStatus};
use outreach_common::Result;
use serde::Deserialize;

use crate::models::{EmailThread, Message};
use crate::store::Store;

/// Input for creating a thread
#[derive(Debug, Clone, Deserialize)]
pub struct NewThread {
    pub subject: String,
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    pub lead_email: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Email thread service
#[derive(Clone)]
pub struct EmailThreadService {
    store: Store<EmailThread>,
}

impl EmailThreadService {
    /// Create a new email thread service
    pub fn new(store: Store<EmailThread>) -> Self {
        Self { store }
    }

    /// All threads, newest first
    pub async fn get_all(&self) -> Vec<EmailThread> {
        self.store.list().await
    }

    /// Get a thread by id
    pub async fn get(&self, id: EmailThreadId) -> Result<EmailThread> {
        self.store.get(id).await
    }

    /// Create a thread. New threads start open.
    pub async fn create(&self, input: NewThread) -> EmailThread {
        let now = Utc::now();
        let thread = EmailThread {
            id: 0,
            subject: input.subject,
            campaign_id: input.campaign_id,
            lead_email: input.lead_email,
            messages: input.messages,
            status: ThreadStatus::Open,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(thread).await
    }

    /// Append a message. An inbound message flips the thread to replied.
    pub async fn append_message(
        &self,
        id: EmailThreadId,
        message: Message,
    ) -> Result<EmailThread> {
        self.store
            .update_with(id, |t| {
                if message.direction == MessageDirection::Received {
                    t.status = ThreadStatus::Replied;
                }
                t.messages.push(message);
            })
            .await
    }

    /// Set the thread status
    pub async fn set_status(&self, id: EmailThreadId, status: ThreadStatus) -> Result<EmailThread> {
        self.store.update_with(id, |t| t.status = status).await
    }

    /// Delete a thread
    pub async fn delete(&self, id: EmailThreadId) -> Result<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;

    fn service() -> EmailThreadService {
        EmailThreadService::new(Store::new(Latency::none()))
    }

    fn message(direction: MessageDirection) -> Message {
        Message {
            from: "a@example.com".into(),
            to: "b@example.com".into(),
            body: "hello".into(),
            timestamp: Utc::now(),
            direction,
        }
    }

    #[tokio::test]
    async fn test_received_message_marks_thread_replied() {
        let svc = service();
        let thread = svc
            .create(NewThread {
                subject: "Intro".into(),
                campaign_id: None,
                lead_email: "b@example.com".into(),
                messages: vec![message(MessageDirection::Sent)],
            })
            .await;
        assert_eq!(thread.status, ThreadStatus::Open);

        let updated = svc
            .append_message(thread.id, message(MessageDirection::Received))
            .await
            .unwrap();
        assert_eq!(updated.status, ThreadStatus::Replied);
        assert_eq!(updated.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_outbound_message_keeps_thread_open() {
        let svc = service();
        let thread = svc
            .create(NewThread {
                subject: "Intro".into(),
                campaign_id: None,
                lead_email: "b@example.com".into(),
                messages: vec![],
            })
            .await;

        let updated = svc
            .append_message(thread.id, message(MessageDirection::Sent))
            .await
            .unwrap();
        assert_eq!(updated.status, ThreadStatus::Open);
    }
}
