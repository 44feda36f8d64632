//! Chart data and validation result exports
//!
//! Client-local conveniences with no compatibility contract; the CSV output
//! is a plain comma join, matching the import side.

use crate::analytics::AnalyticsOverview;
use outreach_store::models::InvalidEmail;

/// Serialize the analytics overview to CSV: a header plus one row per
/// campaign with counts and derived rates.
pub fn analytics_csv(overview: &AnalyticsOverview) -> String {
    let mut out = String::from(
        "campaign,status,sent,opened,clicked,replied,bounced,open_rate,click_rate,reply_rate\n",
    );

    for c in &overview.campaigns {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{:.1},{:.1},{:.1}\n",
            c.name,
            c.status,
            c.sent,
            c.opened,
            c.clicked,
            c.replied,
            c.bounced,
            c.open_rate,
            c.click_rate,
            c.reply_rate
        ));
    }

    out
}

/// One valid address per line
pub fn valid_emails_text(emails: &[String]) -> String {
    emails.join("\n")
}

/// `email,reason` CSV lines for rejected addresses
pub fn invalid_emails_csv(invalid: &[InvalidEmail]) -> String {
    invalid
        .iter()
        .map(|i| format!("{},{}", i.email, i.reason))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_common::types::CampaignStatus;
    use outreach_store::models::{Campaign, CampaignMetrics};

    fn campaign() -> Campaign {
        Campaign {
            id: 1,
            name: "Launch".into(),
            status: CampaignStatus::Active,
            steps: vec![],
            schedule: Default::default(),
            settings: Default::default(),
            metrics: CampaignMetrics {
                sent: 200,
                opened: 50,
                clicked: 10,
                replied: 4,
                bounced: 2,
                unsubscribed: 0,
            },
            lead_ids: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_analytics_csv_shape() {
        let overview = AnalyticsOverview::build(&[campaign()]);
        let csv = analytics_csv(&overview);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("campaign,status,sent"));
        assert_eq!(lines.next().unwrap(), "Launch,active,200,50,10,4,2,25.0,5.0,2.0");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_validation_exports() {
        assert_eq!(
            valid_emails_text(&["a@x.com".into(), "b@x.com".into()]),
            "a@x.com\nb@x.com"
        );
        assert_eq!(
            invalid_emails_csv(&[InvalidEmail {
                email: "bad@x".into(),
                reason: "Invalid email syntax".into(),
            }]),
            "bad@x,Invalid email syntax"
        );
    }
}
