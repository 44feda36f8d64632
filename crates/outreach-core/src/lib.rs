//! Outreach Core - Campaign analytics and business logic
//!
//! This crate provides the decision logic of Outreach: metrics aggregation
//! and A/B winner selection, the email validation pipeline, CSV lead import,
//! warmup simulation, campaign lifecycle rules, and the mock auth layer.

pub mod analytics;
pub mod auth;
pub mod export;
pub mod import;
pub mod lifecycle;
pub mod validation;
pub mod warmup;

pub use analytics::{
    aggregate_metrics, generate_recommendations, rate, select_winner, variant_totals,
    AnalyticsOverview, CampaignOverview, CampaignTotals, Recommendation, RecommendationKind,
    VariantTotals,
};
pub use auth::{AuthOutcome, AuthService, PublicUser, VerificationService};
pub use export::{analytics_csv, invalid_emails_csv, valid_emails_text};
pub use import::{parse_csv_preview, parse_leads, CsvPreview, FieldMapping, LeadField};
pub use lifecycle::{CampaignEngine, CampaignError};
pub use validation::{extract_emails, BulkValidation, EmailCheck, EmailValidator, Verdict};
pub use warmup::{reputation_band, ReputationBand, WarmupEngine, WarmupPlan};
