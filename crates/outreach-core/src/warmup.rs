//! Warmup simulation
//!
//! Gradually ramps an account's allowed daily volume as warmup progresses.
//! Entirely simulated; there is no real sender reputation behind it.

use chrono::Utc;
use outreach_common::types::EmailAccountId;
use outreach_common::Result;
use outreach_store::models::{AccountActivity, ActivityKind, EmailAccount};
use outreach_store::service::{EmailAccountService, UpdateEmailAccount};
use serde::Serialize;
use tracing::info;

/// Minimum daily sends, even at zero warmup progress
const WARMUP_FLOOR: u32 = 5;

/// Progress gained per warmup advance
const WARMUP_STEP: u8 = 5;

/// Reputation score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationBand {
    Good,
    Fair,
    Poor,
}

/// Classify a 0-100 reputation score
pub fn reputation_band(score: u8) -> ReputationBand {
    match score {
        90..=100 => ReputationBand::Good,
        70..=89 => ReputationBand::Fair,
        _ => ReputationBand::Poor,
    }
}

/// Computed sending allowance for an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarmupPlan {
    /// Emails the account may send today
    pub daily_allowance: u32,
    /// Allowance minus what was already sent today, floored at zero
    pub remaining_today: u32,
    pub warmup_progress: u8,
}

impl WarmupPlan {
    /// Build the plan for an account.
    ///
    /// The allowance ramps linearly from [`WARMUP_FLOOR`] at progress 0 to the
    /// full daily limit at progress 100. Accounts without warmup get the full
    /// limit.
    pub fn for_account(account: &EmailAccount) -> Self {
        let daily_allowance = if !account.warmup_enabled || account.warmup_progress >= 100 {
            account.daily_limit
        } else {
            let floor = WARMUP_FLOOR.min(account.daily_limit);
            let span = account.daily_limit.saturating_sub(floor);
            floor + span * u32::from(account.warmup_progress) / 100
        };

        Self {
            daily_allowance,
            remaining_today: daily_allowance.saturating_sub(account.sent_today),
            warmup_progress: account.warmup_progress,
        }
    }
}

/// Warmup engine over the account service
#[derive(Clone)]
pub struct WarmupEngine {
    accounts: EmailAccountService,
}

impl WarmupEngine {
    /// Create a new warmup engine
    pub fn new(accounts: EmailAccountService) -> Self {
        Self { accounts }
    }

    /// Sending plan for an account
    pub async fn plan(&self, id: EmailAccountId) -> Result<WarmupPlan> {
        let account = self.accounts.get(id).await?;
        Ok(WarmupPlan::for_account(&account))
    }

    /// Flip warmup on or off. Enabling logs a warmup-start activity entry.
    pub async fn toggle(&self, id: EmailAccountId) -> Result<EmailAccount> {
        let account = self.accounts.get(id).await?;
        let enabled = !account.warmup_enabled;

        let updated = self
            .accounts
            .update(
                id,
                UpdateEmailAccount {
                    warmup_enabled: Some(enabled),
                    ..Default::default()
                },
            )
            .await?;

        if enabled {
            self.accounts
                .push_activity(
                    id,
                    AccountActivity {
                        kind: ActivityKind::WarmupStart,
                        detail: "Warmup started".to_string(),
                        at: Utc::now(),
                    },
                )
                .await?;
        }

        info!("Warmup {} for account {}", if enabled { "enabled" } else { "disabled" }, id);
        Ok(updated)
    }

    /// Advance warmup by one step, logging progress and completion.
    pub async fn advance(&self, id: EmailAccountId) -> Result<EmailAccount> {
        let account = self.accounts.get(id).await?;
        if !account.warmup_enabled || account.warmup_progress >= 100 {
            return Ok(account);
        }

        let progress = account.warmup_progress.saturating_add(WARMUP_STEP).min(100);
        let updated = self
            .accounts
            .update(
                id,
                UpdateEmailAccount {
                    warmup_progress: Some(progress),
                    ..Default::default()
                },
            )
            .await?;

        let (kind, detail) = if progress >= 100 {
            (ActivityKind::WarmupComplete, "Warmup completed".to_string())
        } else {
            (
                ActivityKind::WarmupProgress,
                format!("Warmup progress reached {}%", progress),
            )
        };
        self.accounts
            .push_activity(
                id,
                AccountActivity {
                    kind,
                    detail,
                    at: Utc::now(),
                },
            )
            .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_store::service::NewEmailAccount;
    use outreach_store::store::{Latency, Store};

    fn account(daily_limit: u32, warmup_enabled: bool, progress: u8, sent: u32) -> EmailAccount {
        EmailAccount {
            id: 1,
            email: "a@example.com".into(),
            provider: "smtp".into(),
            smtp_host: None,
            smtp_port: None,
            username: None,
            password: None,
            daily_limit,
            sent_today: sent,
            warmup_enabled,
            warmup_progress: progress,
            reputation: Default::default(),
            activity: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_allowance_ramp_endpoints() {
        let plan = WarmupPlan::for_account(&account(100, true, 0, 0));
        assert_eq!(plan.daily_allowance, WARMUP_FLOOR);

        let plan = WarmupPlan::for_account(&account(100, true, 100, 0));
        assert_eq!(plan.daily_allowance, 100);
    }

    #[test]
    fn test_allowance_midpoint() {
        // floor 5 + (100 - 5) * 50 / 100 = 52
        let plan = WarmupPlan::for_account(&account(100, true, 50, 0));
        assert_eq!(plan.daily_allowance, 52);
    }

    #[test]
    fn test_allowance_without_warmup_is_full_limit() {
        let plan = WarmupPlan::for_account(&account(80, false, 0, 0));
        assert_eq!(plan.daily_allowance, 80);
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        let plan = WarmupPlan::for_account(&account(100, false, 0, 150));
        assert_eq!(plan.remaining_today, 0);
    }

    #[test]
    fn test_reputation_bands() {
        assert_eq!(reputation_band(95), ReputationBand::Good);
        assert_eq!(reputation_band(75), ReputationBand::Fair);
        assert_eq!(reputation_band(40), ReputationBand::Poor);
    }

    async fn engine_with_account(warmup_enabled: bool) -> (WarmupEngine, EmailAccountId) {
        let svc = EmailAccountService::new(Store::new(Latency::none()));
        let created = svc
            .create(NewEmailAccount {
                email: "a@example.com".into(),
                provider: "smtp".into(),
                smtp_host: None,
                smtp_port: None,
                username: None,
                password: None,
                daily_limit: 50,
                warmup_enabled,
            })
            .await;
        (WarmupEngine::new(svc.clone()), created.id)
    }

    #[tokio::test]
    async fn test_toggle_logs_start_activity() {
        let (engine, id) = engine_with_account(false).await;
        let updated = engine.toggle(id).await.unwrap();
        assert!(updated.warmup_enabled);

        let plan = engine.plan(id).await.unwrap();
        // Disabled accounts were created at progress 100, so toggling on
        // leaves them fully warmed until progress is reset by the caller.
        assert_eq!(plan.warmup_progress, 100);
    }

    #[tokio::test]
    async fn test_advance_steps_and_completes() {
        let (engine, id) = engine_with_account(true).await;
        let updated = engine.advance(id).await.unwrap();
        assert_eq!(updated.warmup_progress, WARMUP_STEP);

        // Drive it to completion
        let mut account = updated;
        while account.warmup_progress < 100 {
            account = engine.advance(id).await.unwrap();
        }
        assert_eq!(account.warmup_progress, 100);

        // Advancing a completed warmup is a no-op
        let again = engine.advance(id).await.unwrap();
        assert_eq!(again.warmup_progress, 100);
    }
}
