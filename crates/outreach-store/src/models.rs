//! Entity models

use chrono::{DateTime, Utc};
use outreach_common::types::{
    CampaignId, CampaignStatus, DelayUnit, LeadId, LeadStatus, MessageDirection, ThreadStatus,
    WinnerCriteria,
};
use serde::{Deserialize, Serialize};

/// Per-campaign delivery counters. Missing fields default to zero so that
/// partially-populated fixtures and fresh campaigns aggregate cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMetrics {
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub opened: u64,
    #[serde(default)]
    pub clicked: u64,
    #[serde(default)]
    pub replied: u64,
    #[serde(default)]
    pub bounced: u64,
    #[serde(default)]
    pub unsubscribed: u64,
}

/// Day of week a campaign is allowed to send on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for SendDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => SendDay::Monday,
            chrono::Weekday::Tue => SendDay::Tuesday,
            chrono::Weekday::Wed => SendDay::Wednesday,
            chrono::Weekday::Thu => SendDay::Thursday,
            chrono::Weekday::Fri => SendDay::Friday,
            chrono::Weekday::Sat => SendDay::Saturday,
            chrono::Weekday::Sun => SendDay::Sunday,
        }
    }
}

/// Sending schedule for a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Days of week sending is allowed
    #[serde(default = "default_send_days")]
    pub send_days: Vec<SendDay>,

    /// First hour of the sending window (inclusive, 0-23)
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,

    /// Last hour of the sending window (exclusive, 0-23)
    #[serde(default = "default_end_hour")]
    pub end_hour: u8,

    /// Maximum emails per day for this campaign
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            send_days: default_send_days(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            daily_limit: default_daily_limit(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_send_days() -> Vec<SendDay> {
    vec![
        SendDay::Monday,
        SendDay::Tuesday,
        SendDay::Wednesday,
        SendDay::Thursday,
        SendDay::Friday,
    ]
}

fn default_start_hour() -> u8 {
    9
}

fn default_end_hour() -> u8 {
    17
}

fn default_daily_limit() -> u32 {
    50
}

/// Campaign behaviour flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSettings {
    #[serde(default = "default_true")]
    pub stop_on_reply: bool,
    #[serde(default = "default_true")]
    pub track_opens: bool,
    #[serde(default = "default_true")]
    pub track_clicks: bool,
    #[serde(default = "default_true")]
    pub track_replies: bool,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            stop_on_reply: true,
            track_opens: true,
            track_clicks: true,
            track_replies: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-variant counters and derived rates.
///
/// Rates are fractions (0.0-1.0), counters are raw counts. Fixtures may omit
/// any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantMetrics {
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub opened: u64,
    #[serde(default)]
    pub clicked: u64,
    #[serde(default)]
    pub replied: u64,
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub click_rate: f64,
    #[serde(default)]
    pub conversion_rate: f64,
}

/// One alternative version of an email within an A/B test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub subject: String,
    pub body: String,

    /// Share of traffic routed to this variant, in percent
    #[serde(default)]
    pub traffic_percentage: u32,

    #[serde(default)]
    pub metrics: VariantMetrics,
}

/// A/B test attached to a sequence step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbTest {
    #[serde(default)]
    pub enabled: bool,

    pub variants: Vec<Variant>,

    #[serde(default = "default_test_duration")]
    pub test_duration_days: u32,

    pub winner_criteria: WinnerCriteria,
}

fn default_test_duration() -> u32 {
    7
}

/// One step of an email sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailStep {
    pub subject: String,
    pub body: String,

    /// Delay before this step, relative to the previous one
    #[serde(default)]
    pub delay_amount: u32,
    #[serde(default = "default_delay_unit")]
    pub delay_unit: DelayUnit,

    #[serde(default)]
    pub ab_test: Option<AbTest>,
}

fn default_delay_unit() -> DelayUnit {
    DelayUnit::Days
}

/// Campaign model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,

    #[serde(default)]
    pub steps: Vec<EmailStep>,

    #[serde(default)]
    pub schedule: Schedule,

    #[serde(default)]
    pub settings: CampaignSettings,

    #[serde(default)]
    pub metrics: CampaignMetrics,

    /// Leads attached to this campaign. No referential integrity is enforced
    /// against the lead store.
    #[serde(default)]
    pub lead_ids: Vec<LeadId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// First step carrying an enabled A/B test, if any
    pub fn ab_test(&self) -> Option<&AbTest> {
        self.steps
            .iter()
            .filter_map(|s| s.ab_test.as_ref())
            .find(|t| t.enabled)
    }
}

/// Lead model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub email: String,

    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub status: LeadStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sender reputation scores, 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reputation {
    #[serde(default = "default_score")]
    pub deliverability: u8,
    #[serde(default = "default_score")]
    pub sender_reputation: u8,
    #[serde(default = "default_score")]
    pub domain_health: u8,
}

impl Default for Reputation {
    fn default() -> Self {
        Self {
            deliverability: default_score(),
            sender_reputation: default_score(),
            domain_health: default_score(),
        }
    }
}

fn default_score() -> u8 {
    100
}

/// Kinds of account activity log entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    WarmupStart,
    WarmupProgress,
    WarmupComplete,
    ReputationImprove,
    ReputationDecline,
}

/// One account activity log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountActivity {
    pub kind: ActivityKind,
    pub detail: String,
    pub at: DateTime<Utc>,
}

/// Sender email account model. Credentials are plaintext: this is a mock
/// layer with no real SMTP connection behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAccount {
    pub id: outreach_common::types::EmailAccountId,
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
    #[serde(default)]
    pub sent_today: u32,

    #[serde(default)]
    pub warmup_enabled: bool,
    /// 0-100; 100 means fully warmed up
    #[serde(default)]
    pub warmup_progress: u8,

    #[serde(default)]
    pub reputation: Reputation,

    #[serde(default)]
    pub activity: Vec<AccountActivity>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One message within a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub direction: MessageDirection,
}

/// Conversation thread tied to a campaign reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailThread {
    pub id: outreach_common::types::EmailThreadId,
    pub subject: String,

    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    pub lead_email: String,

    #[serde(default)]
    pub messages: Vec<Message>,

    pub status: ThreadStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reusable email template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: outreach_common::types::EmailTemplateId,
    pub name: String,
    pub category: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dashboard user. Password is plaintext by design: authentication here is
/// an in-memory mock, not a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: outreach_common::types::UserId,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An email rejected by bulk validation, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidEmail {
    pub email: String,
    pub reason: String,
}

/// Stored outcome of one bulk validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRun {
    pub id: outreach_common::types::ValidationRunId,
    pub file_name: String,
    pub total: usize,
    pub valid: Vec<String>,
    pub risky: Vec<String>,
    pub invalid: Vec<InvalidEmail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
