//! Static fixtures and store wiring
//!
//! Fixtures are embedded JSON seeded into the stores once at startup. The
//! [`Stores`] aggregate is the single injection point handed to the API and
//! web layers.

use outreach_common::config::StoreConfig;
use outreach_common::Result;
use tracing::info;

use crate::service::{
    CampaignService, EmailAccountService, EmailTemplateService, EmailThreadService, LeadService,
    UserService, ValidationRunService,
};
use crate::store::{Latency, Store};

/// Campaign fixture data
pub const CAMPAIGNS: &str = include_str!("../fixtures/campaigns.json");

/// Lead fixture data
pub const LEADS: &str = include_str!("../fixtures/leads.json");

/// Email account fixture data
pub const EMAIL_ACCOUNTS: &str = include_str!("../fixtures/email_accounts.json");

/// Email thread fixture data
pub const EMAIL_THREADS: &str = include_str!("../fixtures/email_threads.json");

/// Email template fixture data
pub const EMAIL_TEMPLATES: &str = include_str!("../fixtures/email_templates.json");

/// User fixture data
pub const USERS: &str = include_str!("../fixtures/users.json");

/// All entity services, seeded and ready to inject
#[derive(Clone)]
pub struct Stores {
    pub campaigns: CampaignService,
    pub leads: LeadService,
    pub accounts: EmailAccountService,
    pub threads: EmailThreadService,
    pub templates: EmailTemplateService,
    pub users: UserService,
    pub validation_runs: ValidationRunService,
}

impl Stores {
    /// Seed all stores from the embedded fixtures using the configured latency
    pub fn seed(config: &StoreConfig) -> Result<Self> {
        Self::seed_with(Latency::range(config.latency_min_ms, config.latency_max_ms))
    }

    /// Seed all stores from the embedded fixtures with an explicit latency.
    /// Tests use [`Latency::none`].
    pub fn seed_with(latency: Latency) -> Result<Self> {
        let stores = Self {
            campaigns: CampaignService::new(Store::from_fixture(CAMPAIGNS, latency)?),
            leads: LeadService::new(Store::from_fixture(LEADS, latency)?),
            accounts: EmailAccountService::new(Store::from_fixture(EMAIL_ACCOUNTS, latency)?),
            threads: EmailThreadService::new(Store::from_fixture(EMAIL_THREADS, latency)?),
            templates: EmailTemplateService::new(Store::from_fixture(EMAIL_TEMPLATES, latency)?),
            users: UserService::new(Store::from_fixture(USERS, latency)?),
            // Validation history starts empty; runs accumulate at runtime
            validation_runs: ValidationRunService::new(Store::new(latency)),
        };
        info!("Mock stores seeded from fixtures");
        Ok(stores)
    }

    /// Empty stores, mainly for tests that build their own data
    pub fn empty(latency: Latency) -> Self {
        Self {
            campaigns: CampaignService::new(Store::new(latency)),
            leads: LeadService::new(Store::new(latency)),
            accounts: EmailAccountService::new(Store::new(latency)),
            threads: EmailThreadService::new(Store::new(latency)),
            templates: EmailTemplateService::new(Store::new(latency)),
            users: UserService::new(Store::new(latency)),
            validation_runs: ValidationRunService::new(Store::new(latency)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixtures_parse_and_seed() {
        let stores = Stores::seed_with(Latency::none()).unwrap();
        assert!(!stores.campaigns.get_all().await.is_empty());
        assert!(!stores.leads.get_all().await.is_empty());
        assert!(!stores.accounts.get_all().await.is_empty());
        assert!(!stores.threads.get_all().await.is_empty());
        assert!(!stores.templates.get_all().await.is_empty());
        assert!(stores.users.find_by_email("demo@outreach.dev").await.is_some());
        assert!(stores.validation_runs.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_fixture_campaign_has_ab_test() {
        let stores = Stores::seed_with(Latency::none()).unwrap();
        let campaigns = stores.campaigns.get_all().await;
        assert!(campaigns.iter().any(|c| c.ab_test().is_some()));
    }
}
