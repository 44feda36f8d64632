//! Campaign lifecycle engine
//!
//! Validates status transitions and sending-window rules on top of the
//! campaign service.

use chrono::{DateTime, Datelike, Timelike, Utc};
use outreach_common::types::{CampaignId, CampaignStatus};
use outreach_store::models::{Campaign, SendDay};
use outreach_store::service::CampaignService;
use thiserror::Error;
use tracing::info;

/// Campaign lifecycle errors
#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Campaign not found")]
    NotFound,

    #[error("Campaign cannot move from {from} to {to}")]
    InvalidTransition {
        from: CampaignStatus,
        to: CampaignStatus,
    },

    #[error("Campaign has no sequence steps")]
    NoSteps,
}

impl CampaignError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CampaignError::NotFound => 404,
            CampaignError::InvalidTransition { .. } => 400,
            CampaignError::NoSteps => 400,
        }
    }
}

/// Campaign lifecycle engine
#[derive(Clone)]
pub struct CampaignEngine {
    campaigns: CampaignService,
}

impl CampaignEngine {
    /// Create a new campaign engine
    pub fn new(campaigns: CampaignService) -> Self {
        Self { campaigns }
    }

    async fn get(&self, id: CampaignId) -> Result<Campaign, CampaignError> {
        self.campaigns
            .get(id)
            .await
            .map_err(|_| CampaignError::NotFound)
    }

    /// Move a campaign to the requested status, enforcing legal transitions.
    pub async fn transition(
        &self,
        id: CampaignId,
        to: CampaignStatus,
    ) -> Result<Campaign, CampaignError> {
        let campaign = self.get(id).await?;
        let from = campaign.status;

        let allowed = matches!(
            (from, to),
            (CampaignStatus::Draft, CampaignStatus::Active)
                | (CampaignStatus::Paused, CampaignStatus::Active)
                | (CampaignStatus::Active, CampaignStatus::Paused)
                | (CampaignStatus::Active, CampaignStatus::Completed)
                | (CampaignStatus::Paused, CampaignStatus::Completed)
        );

        if !allowed {
            return Err(CampaignError::InvalidTransition { from, to });
        }

        // Launching requires a sequence to send
        if from == CampaignStatus::Draft && to == CampaignStatus::Active && campaign.steps.is_empty()
        {
            return Err(CampaignError::NoSteps);
        }

        let updated = self
            .campaigns
            .set_status(id, to)
            .await
            .map_err(|_| CampaignError::NotFound)?;

        info!("Campaign {} moved from {} to {}", id, from, to);
        Ok(updated)
    }

    /// Whether the campaign may send at the given instant.
    ///
    /// The instant is interpreted as already being in the campaign's local
    /// timezone; the schedule carries the zone name for display only.
    pub fn within_sending_window(campaign: &Campaign, at: DateTime<Utc>) -> bool {
        if campaign.status != CampaignStatus::Active {
            return false;
        }

        let day: SendDay = at.weekday().into();
        if !campaign.schedule.send_days.contains(&day) {
            return false;
        }

        let hour = at.hour() as u8;
        campaign.schedule.start_hour <= hour && hour < campaign.schedule.end_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use outreach_store::models::{EmailStep, Schedule};
    use outreach_store::service::NewCampaign;
    use outreach_store::store::{Latency, Store};

    fn step() -> EmailStep {
        EmailStep {
            subject: "s".into(),
            body: "b".into(),
            delay_amount: 0,
            delay_unit: outreach_common::types::DelayUnit::Days,
            ab_test: None,
        }
    }

    async fn engine_with_campaign(steps: Vec<EmailStep>) -> (CampaignEngine, CampaignId) {
        let svc = CampaignService::new(Store::new(Latency::none()));
        let created = svc
            .create(NewCampaign {
                name: "c".into(),
                steps,
                schedule: Schedule::default(),
                settings: Default::default(),
                lead_ids: vec![],
            })
            .await;
        (CampaignEngine::new(svc), created.id)
    }

    #[tokio::test]
    async fn test_draft_to_active_to_paused() {
        let (engine, id) = engine_with_campaign(vec![step()]).await;

        let active = engine.transition(id, CampaignStatus::Active).await.unwrap();
        assert_eq!(active.status, CampaignStatus::Active);

        let paused = engine.transition(id, CampaignStatus::Paused).await.unwrap();
        assert_eq!(paused.status, CampaignStatus::Paused);

        let resumed = engine.transition(id, CampaignStatus::Active).await.unwrap();
        assert_eq!(resumed.status, CampaignStatus::Active);
    }

    #[tokio::test]
    async fn test_draft_cannot_pause() {
        let (engine, id) = engine_with_campaign(vec![step()]).await;
        let err = engine
            .transition(id, CampaignStatus::Paused)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_launch_requires_steps() {
        let (engine, id) = engine_with_campaign(vec![]).await;
        let err = engine
            .transition(id, CampaignStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::NoSteps));
    }

    #[tokio::test]
    async fn test_completed_is_terminal() {
        let (engine, id) = engine_with_campaign(vec![step()]).await;
        engine.transition(id, CampaignStatus::Active).await.unwrap();
        engine
            .transition(id, CampaignStatus::Completed)
            .await
            .unwrap();
        let err = engine
            .transition(id, CampaignStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_missing_campaign() {
        let svc = CampaignService::new(Store::new(Latency::none()));
        let engine = CampaignEngine::new(svc);
        let err = engine
            .transition(7, CampaignStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::NotFound));
    }

    #[tokio::test]
    async fn test_sending_window() {
        let (engine, id) = engine_with_campaign(vec![step()]).await;
        let campaign = engine.transition(id, CampaignStatus::Active).await.unwrap();

        // Wednesday 2026-08-05 10:00 — inside the default Mon-Fri 9-17 window
        let wednesday_morning = Utc.with_ymd_and_hms(2026, 8, 5, 10, 0, 0).unwrap();
        assert!(CampaignEngine::within_sending_window(
            &campaign,
            wednesday_morning
        ));

        // Same day at 17:00 — end hour is exclusive
        let at_close = Utc.with_ymd_and_hms(2026, 8, 5, 17, 0, 0).unwrap();
        assert!(!CampaignEngine::within_sending_window(&campaign, at_close));

        // Saturday — not a send day
        let saturday = Utc.with_ymd_and_hms(2026, 8, 8, 10, 0, 0).unwrap();
        assert!(!CampaignEngine::within_sending_window(&campaign, saturday));
    }

    #[tokio::test]
    async fn test_sending_window_requires_active_status() {
        let (engine, id) = engine_with_campaign(vec![step()]).await;
        let draft = engine.get(id).await.unwrap();
        let wednesday_morning = Utc.with_ymd_and_hms(2026, 8, 5, 10, 0, 0).unwrap();
        assert!(!CampaignEngine::within_sending_window(
            &draft,
            wednesday_morning
        ));
    }
}
