//! Common types for Outreach

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for campaigns
pub type CampaignId = i64;

/// Unique identifier for leads
pub type LeadId = i64;

/// Unique identifier for email accounts
pub type EmailAccountId = i64;

/// Unique identifier for email threads
pub type EmailThreadId = i64;

/// Unique identifier for email templates
pub type EmailTemplateId = i64;

/// Unique identifier for users
pub type UserId = i64;

/// Unique identifier for validation runs
pub type ValidationRunId = i64;

/// Timestamp wrapper
pub type Timestamp = DateTime<Utc>;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Paused => write!(f, "paused"),
            CampaignStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            other => Err(crate::Error::Validation(format!(
                "Unknown campaign status: {}",
                other
            ))),
        }
    }
}

/// Lead status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Active,
    Contacted,
    Replied,
    Bounced,
    Unsubscribed,
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::Active
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::Active => write!(f, "active"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Replied => write!(f, "replied"),
            LeadStatus::Bounced => write!(f, "bounced"),
            LeadStatus::Unsubscribed => write!(f, "unsubscribed"),
        }
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LeadStatus::Active),
            "contacted" => Ok(LeadStatus::Contacted),
            "replied" => Ok(LeadStatus::Replied),
            "bounced" => Ok(LeadStatus::Bounced),
            "unsubscribed" => Ok(LeadStatus::Unsubscribed),
            other => Err(crate::Error::Validation(format!(
                "Unknown lead status: {}",
                other
            ))),
        }
    }
}

/// Thread status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Open,
    Replied,
    Closed,
}

/// Message direction within a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Sent,
    Received,
}

/// Delay unit for sequence steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayUnit {
    Minutes,
    Hours,
    Days,
}

/// Winner criteria for A/B tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinnerCriteria {
    OpenRate,
    ClickRate,
    ReplyRate,
    ConversionRate,
}

impl std::fmt::Display for WinnerCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinnerCriteria::OpenRate => write!(f, "open_rate"),
            WinnerCriteria::ClickRate => write!(f, "click_rate"),
            WinnerCriteria::ReplyRate => write!(f, "reply_rate"),
            WinnerCriteria::ConversionRate => write!(f, "conversion_rate"),
        }
    }
}

/// Email address with a validated local and domain part
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    pub local: String,
    pub domain: String,
}

impl EmailAddress {
    /// Create a new email address
    pub fn new(local: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            domain: domain.into(),
        }
    }

    /// Parse an email address from a string
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.splitn(2, '@').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            Some(Self::new(parts[0], parts[1]))
        } else {
            None
        }
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::Validation("Invalid email address".to_string()))
    }
}
