//! Email account service

use chrono::Utc;
use outreach_common::types::EmailAccountId;
use outreach_common::Result;
use serde::Deserialize;

use crate::models::{AccountActivity, EmailAccount, Reputation};
use crate::store::Store;

/// Input for creating an email account
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmailAccount {
    pub email: String,
    pub provider: String,
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default)]
    pub smtp_port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    #[serde(default = "default_warmup_enabled")]
    pub warmup_enabled: bool,
}

fn default_daily_limit() -> u32 {
    50
}

fn default_warmup_enabled() -> bool {
    true
}

/// Input for updating an email account; unset fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmailAccount {
    pub provider: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub daily_limit: Option<u32>,
    pub sent_today: Option<u32>,
    pub warmup_enabled: Option<bool>,
    pub warmup_progress: Option<u8>,
    pub reputation: Option<Reputation>,
}

/// Email account service
#[derive(Clone)]
pub struct EmailAccountService {
    store: Store<EmailAccount>,
}

impl EmailAccountService {
    /// Create a new email account service
    pub fn new(store: Store<EmailAccount>) -> Self {
        Self { store }
    }

    /// All accounts, newest first
    pub async fn get_all(&self) -> Vec<EmailAccount> {
        self.store.list().await
    }

    /// Get an account by id
    pub async fn get(&self, id: EmailAccountId) -> Result<EmailAccount> {
        self.store.get(id).await
    }

    /// Create an account. Warmup-enabled accounts start at progress 0,
    /// others are considered fully warmed up.
    pub async fn create(&self, input: NewEmailAccount) -> EmailAccount {
        let now = Utc::now();
        let account = EmailAccount {
            id: 0,
            email: input.email,
            provider: input.provider,
            smtp_host: input.smtp_host,
            smtp_port: input.smtp_port,
            username: input.username,
            password: input.password,
            daily_limit: input.daily_limit,
            sent_today: 0,
            warmup_enabled: input.warmup_enabled,
            warmup_progress: if input.warmup_enabled { 0 } else { 100 },
            reputation: Reputation::default(),
            activity: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.insert(account).await
    }

    /// Merge an update into an account
    pub async fn update(
        &self,
        id: EmailAccountId,
        input: UpdateEmailAccount,
    ) -> Result<EmailAccount> {
        self.store
            .update_with(id, |a| {
                if let Some(provider) = input.provider {
                    a.provider = provider;
                }
                if let Some(smtp_host) = input.smtp_host {
                    a.smtp_host = Some(smtp_host);
                }
                if let Some(smtp_port) = input.smtp_port {
                    a.smtp_port = Some(smtp_port);
                }
                if let Some(username) = input.username {
                    a.username = Some(username);
                }
                if let Some(password) = input.password {
                    a.password = Some(password);
                }
                if let Some(daily_limit) = input.daily_limit {
                    a.daily_limit = daily_limit;
                }
                if let Some(sent_today) = input.sent_today {
                    a.sent_today = sent_today;
                }
                if let Some(warmup_enabled) = input.warmup_enabled {
                    a.warmup_enabled = warmup_enabled;
                }
                if let Some(warmup_progress) = input.warmup_progress {
                    a.warmup_progress = warmup_progress;
                }
                if let Some(reputation) = input.reputation {
                    a.reputation = reputation;
                }
            })
            .await
    }

    /// Append an activity log entry
    pub async fn push_activity(
        &self,
        id: EmailAccountId,
        activity: AccountActivity,
    ) -> Result<EmailAccount> {
        self.store
            .update_with(id, |a| a.activity.push(activity))
            .await
    }

    /// Delete an account
    pub async fn delete(&self, id: EmailAccountId) -> Result<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;

    fn service() -> EmailAccountService {
        EmailAccountService::new(Store::new(Latency::none()))
    }

    fn new_account(warmup_enabled: bool) -> NewEmailAccount {
        NewEmailAccount {
            email: "sales@example.com".into(),
            provider: "gmail".into(),
            smtp_host: None,
            smtp_port: None,
            username: None,
            password: None,
            daily_limit: 50,
            warmup_enabled,
        }
    }

    #[tokio::test]
    async fn test_warmup_enabled_starts_at_zero_progress() {
        let svc = service();
        let account = svc.create(new_account(true)).await;
        assert_eq!(account.warmup_progress, 0);
        assert_eq!(account.sent_today, 0);
    }

    #[tokio::test]
    async fn test_warmup_disabled_counts_as_warmed_up() {
        let svc = service();
        let account = svc.create(new_account(false)).await;
        assert_eq!(account.warmup_progress, 100);
    }

    #[tokio::test]
    async fn test_missing_account_error_message() {
        let svc = service();
        let err = svc.get(5).await.unwrap_err();
        assert_eq!(err.to_string(), "Email account not found");
    }
}
