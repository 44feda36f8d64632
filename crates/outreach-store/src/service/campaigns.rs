//! Campaign service

use chrono::Utc;
use outreach_common::types::{CampaignId, CampaignStatus, LeadId};
use outreach_common::Result;
use serde::Deserialize;

use crate::models::{Campaign, CampaignMetrics, CampaignSettings, EmailStep, Schedule};
use crate::store::Store;

/// Input for creating a campaign
#[derive(Debug, Clone, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<EmailStep>,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub settings: CampaignSettings,
    #[serde(default)]
    pub lead_ids: Vec<LeadId>,
}

/// Input for updating a campaign; unset fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub steps: Option<Vec<EmailStep>>,
    pub schedule: Option<Schedule>,
    pub settings: Option<CampaignSettings>,
    pub lead_ids: Option<Vec<LeadId>>,
    pub metrics: Option<CampaignMetrics>,
}

/// Campaign service
#[derive(Clone)]
pub struct CampaignService {
    store: Store<Campaign>,
}

impl CampaignService {
    /// Create a new campaign service
    pub fn new(store: Store<Campaign>) -> Self {
        Self { store }
    }

    /// All campaigns, newest first
    pub async fn get_all(&self) -> Vec<Campaign> {
        self.store.list().await
    }

    /// Get a campaign by id
    pub async fn get(&self, id: CampaignId) -> Result<Campaign> {
        self.store.get(id).await
    }

    /// Create a campaign. New campaigns start as drafts with zeroed metrics.
    pub async fn create(&self, input: NewCampaign) -> Campaign {
        let now = Utc::now();
        let campaign = Campaign {
            id: 0,
            name: input.name,
            status: CampaignStatus::Draft,
            steps: input.steps,
            schedule: input.schedule,
            settings: input.settings,
            metrics: CampaignMetrics::default(),
            lead_ids: input.lead_ids,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(campaign).await
    }

    /// Merge an update into a campaign
    pub async fn update(&self, id: CampaignId, input: UpdateCampaign) -> Result<Campaign> {
        self.store
            .update_with(id, |c| {
                if let Some(name) = input.name {
                    c.name = name;
                }
                if let Some(steps) = input.steps {
                    c.steps = steps;
                }
                if let Some(schedule) = input.schedule {
                    c.schedule = schedule;
                }
                if let Some(settings) = input.settings {
                    c.settings = settings;
                }
                if let Some(lead_ids) = input.lead_ids {
                    c.lead_ids = lead_ids;
                }
                if let Some(metrics) = input.metrics {
                    c.metrics = metrics;
                }
            })
            .await
    }

    /// Set the campaign status
    pub async fn set_status(&self, id: CampaignId, status: CampaignStatus) -> Result<Campaign> {
        self.store.update_with(id, |c| c.status = status).await
    }

    /// Delete a campaign
    pub async fn delete(&self, id: CampaignId) -> Result<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;

    fn service() -> CampaignService {
        CampaignService::new(Store::new(Latency::none()))
    }

    fn new_campaign(name: &str) -> NewCampaign {
        NewCampaign {
            name: name.to_string(),
            steps: vec![],
            schedule: Schedule::default(),
            settings: CampaignSettings::default(),
            lead_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_starts_as_draft_with_zero_metrics() {
        let svc = service();
        let campaign = svc.create(new_campaign("Q3 launch")).await;
        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert_eq!(campaign.metrics, CampaignMetrics::default());
        assert_eq!(campaign.id, 1);
    }

    #[tokio::test]
    async fn test_update_merges_only_set_fields() {
        let svc = service();
        let created = svc.create(new_campaign("Original")).await;

        let updated = svc
            .update(
                created.id,
                UpdateCampaign {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, CampaignStatus::Draft);
        assert_eq!(updated.schedule, created.schedule);
    }

    #[tokio::test]
    async fn test_missing_campaign_errors() {
        let svc = service();
        let err = svc.get(99).await.unwrap_err();
        assert_eq!(err.to_string(), "Campaign not found");
        assert!(svc.delete(99).await.is_err());
    }
}
