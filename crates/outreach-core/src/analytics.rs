//! Metrics aggregation and A/B winner selection
//!
//! Pure functions over already-fetched campaign data. Nothing in here talks
//! to the stores.

use outreach_common::types::{CampaignStatus, WinnerCriteria};
use outreach_store::models::{AbTest, Campaign, Variant};
use serde::Serialize;

/// Totals across a set of campaigns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CampaignTotals {
    pub sent: u64,
    pub opened: u64,
    pub clicked: u64,
    pub replied: u64,
    pub bounced: u64,
}

/// Totals across a set of A/B variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VariantTotals {
    pub sent: u64,
    pub opened: u64,
    pub clicked: u64,
    pub replied: u64,
}

/// Sum delivery counters across campaigns. Missing metrics count as zero.
pub fn aggregate_metrics(campaigns: &[Campaign]) -> CampaignTotals {
    campaigns.iter().fold(CampaignTotals::default(), |acc, c| {
        CampaignTotals {
            sent: acc.sent + c.metrics.sent,
            opened: acc.opened + c.metrics.opened,
            clicked: acc.clicked + c.metrics.clicked,
            replied: acc.replied + c.metrics.replied,
            bounced: acc.bounced + c.metrics.bounced,
        }
    })
}

/// Sum counters across variants
pub fn variant_totals(variants: &[Variant]) -> VariantTotals {
    variants.iter().fold(VariantTotals::default(), |acc, v| {
        VariantTotals {
            sent: acc.sent + v.metrics.sent,
            opened: acc.opened + v.metrics.opened,
            clicked: acc.clicked + v.metrics.clicked,
            replied: acc.replied + v.metrics.replied,
        }
    })
}

/// Percentage of `numerator` over `denominator`; 0 when the denominator is 0,
/// never NaN.
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// The metric value a variant competes with under the given criteria.
///
/// `reply_rate` intentionally maps to the raw replied count rather than a
/// normalized rate; see DESIGN.md before changing this.
fn criteria_value(variant: &Variant, criteria: WinnerCriteria) -> f64 {
    match criteria {
        WinnerCriteria::OpenRate => variant.metrics.open_rate,
        WinnerCriteria::ClickRate => variant.metrics.click_rate,
        WinnerCriteria::ReplyRate => variant.metrics.replied as f64,
        WinnerCriteria::ConversionRate => variant.metrics.conversion_rate,
    }
}

/// Pick the leading variant of an A/B test.
///
/// Strictly-greater fold: ties keep the first-seen variant. Returns `None`
/// when the variant list is empty or no variant scores above zero.
pub fn select_winner(ab_test: &AbTest) -> Option<&Variant> {
    ab_test.variants.iter().fold(None, |winner, variant| {
        let current = winner
            .map(|w: &Variant| criteria_value(w, ab_test.winner_criteria))
            .unwrap_or(0.0);
        if criteria_value(variant, ab_test.winner_criteria) > current {
            Some(variant)
        } else {
            winner
        }
    })
}

/// Kind of a recommendation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Warning,
    Tip,
}

/// One actionable recommendation for an A/B test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
}

/// Recommendations for an A/B test, in fixed order: sample-size check first,
/// then subject-line tip, then call-to-action tip.
pub fn generate_recommendations(ab_test: &AbTest) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let totals = variant_totals(&ab_test.variants);
    if totals.sent < 100 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Warning,
            title: "Low sample size".to_string(),
            message: format!(
                "Only {} emails sent across all variants. Results are not statistically reliable below 100 sends.",
                totals.sent
            ),
        });
    }

    if let Some(winner) = select_winner(ab_test) {
        if winner.metrics.open_rate < 0.2 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Tip,
                title: "Improve subject lines".to_string(),
                message: "The leading variant opens below 20%. Try shorter, more personal subject lines.".to_string(),
            });
        }
        if winner.metrics.click_rate < 0.05 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Tip,
                title: "Strengthen the call to action".to_string(),
                message: "The leading variant clicks below 5%. Make the ask clearer and move it earlier in the body.".to_string(),
            });
        }
    }

    recommendations
}

/// Per-campaign row for the analytics overview
#[derive(Debug, Clone, Serialize)]
pub struct CampaignOverview {
    pub id: i64,
    pub name: String,
    pub status: CampaignStatus,
    pub sent: u64,
    pub opened: u64,
    pub clicked: u64,
    pub replied: u64,
    pub bounced: u64,
    pub open_rate: f64,
    pub click_rate: f64,
    pub reply_rate: f64,
}

impl CampaignOverview {
    fn from_campaign(c: &Campaign) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            status: c.status,
            sent: c.metrics.sent,
            opened: c.metrics.opened,
            clicked: c.metrics.clicked,
            replied: c.metrics.replied,
            bounced: c.metrics.bounced,
            open_rate: rate(c.metrics.opened, c.metrics.sent),
            click_rate: rate(c.metrics.clicked, c.metrics.sent),
            reply_rate: rate(c.metrics.replied, c.metrics.sent),
        }
    }
}

/// Aggregated dashboard view over all campaigns
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsOverview {
    pub totals: CampaignTotals,
    pub open_rate: f64,
    pub click_rate: f64,
    pub reply_rate: f64,
    pub bounce_rate: f64,
    pub campaigns: Vec<CampaignOverview>,
}

impl AnalyticsOverview {
    /// Build the overview from a campaign list
    pub fn build(campaigns: &[Campaign]) -> Self {
        let totals = aggregate_metrics(campaigns);
        Self {
            totals,
            open_rate: rate(totals.opened, totals.sent),
            click_rate: rate(totals.clicked, totals.sent),
            reply_rate: rate(totals.replied, totals.sent),
            bounce_rate: rate(totals.bounced, totals.sent),
            campaigns: campaigns.iter().map(CampaignOverview::from_campaign).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use outreach_store::models::{
        CampaignMetrics, CampaignSettings, Schedule, VariantMetrics,
    };
    use pretty_assertions::assert_eq;

    fn campaign(metrics: CampaignMetrics) -> Campaign {
        Campaign {
            id: 1,
            name: "c".into(),
            status: CampaignStatus::Active,
            steps: vec![],
            schedule: Schedule::default(),
            settings: CampaignSettings::default(),
            metrics,
            lead_ids: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn variant(name: &str, metrics: VariantMetrics) -> Variant {
        Variant {
            name: name.into(),
            subject: "s".into(),
            body: "b".into(),
            traffic_percentage: 50,
            metrics,
        }
    }

    fn ab_test(criteria: WinnerCriteria, variants: Vec<Variant>) -> AbTest {
        AbTest {
            enabled: true,
            variants,
            test_duration_days: 7,
            winner_criteria: criteria,
        }
    }

    #[test]
    fn test_rate_zero_denominator() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(5, 0), 0.0);
    }

    #[test]
    fn test_rate_basic() {
        assert_eq!(rate(5, 10), 50.0);
        assert_eq!(rate(1, 4), 25.0);
    }

    #[test]
    fn test_aggregate_empty_is_all_zero() {
        assert_eq!(aggregate_metrics(&[]), CampaignTotals::default());
    }

    #[test]
    fn test_aggregate_missing_metrics_count_as_zero() {
        let campaigns = vec![
            campaign(CampaignMetrics {
                sent: 10,
                ..Default::default()
            }),
            campaign(CampaignMetrics::default()),
        ];
        let totals = aggregate_metrics(&campaigns);
        assert_eq!(totals.sent, 10);
        assert_eq!(totals.opened, 0);
        assert_eq!(totals.replied, 0);
    }

    #[test]
    fn test_aggregate_sums_each_field() {
        let campaigns = vec![
            campaign(CampaignMetrics {
                sent: 100,
                opened: 40,
                clicked: 8,
                replied: 3,
                bounced: 2,
                unsubscribed: 1,
            }),
            campaign(CampaignMetrics {
                sent: 50,
                opened: 10,
                clicked: 2,
                replied: 1,
                bounced: 0,
                unsubscribed: 0,
            }),
        ];
        assert_eq!(
            aggregate_metrics(&campaigns),
            CampaignTotals {
                sent: 150,
                opened: 50,
                clicked: 10,
                replied: 4,
                bounced: 2,
            }
        );
    }

    #[test]
    fn test_select_winner_empty_variants() {
        let test = ab_test(WinnerCriteria::OpenRate, vec![]);
        assert!(select_winner(&test).is_none());
    }

    #[test]
    fn test_select_winner_highest_open_rate() {
        let test = ab_test(
            WinnerCriteria::OpenRate,
            vec![
                variant(
                    "A",
                    VariantMetrics {
                        open_rate: 0.3,
                        ..Default::default()
                    },
                ),
                variant(
                    "B",
                    VariantMetrics {
                        open_rate: 0.5,
                        ..Default::default()
                    },
                ),
            ],
        );
        assert_eq!(select_winner(&test).unwrap().name, "B");
    }

    #[test]
    fn test_select_winner_tie_keeps_first() {
        let test = ab_test(
            WinnerCriteria::OpenRate,
            vec![
                variant(
                    "A",
                    VariantMetrics {
                        open_rate: 0.4,
                        ..Default::default()
                    },
                ),
                variant(
                    "B",
                    VariantMetrics {
                        open_rate: 0.4,
                        ..Default::default()
                    },
                ),
            ],
        );
        assert_eq!(select_winner(&test).unwrap().name, "A");
    }

    #[test]
    fn test_select_winner_reply_rate_uses_raw_count() {
        // reply_rate competes on the replied count, not a normalized rate.
        let test = ab_test(
            WinnerCriteria::ReplyRate,
            vec![
                variant(
                    "A",
                    VariantMetrics {
                        sent: 10,
                        replied: 3,
                        ..Default::default()
                    },
                ),
                variant(
                    "B",
                    VariantMetrics {
                        sent: 1000,
                        replied: 5,
                        ..Default::default()
                    },
                ),
            ],
        );
        assert_eq!(select_winner(&test).unwrap().name, "B");
    }

    #[test]
    fn test_recommendations_low_sample_size() {
        let test = ab_test(
            WinnerCriteria::OpenRate,
            vec![variant(
                "A",
                VariantMetrics {
                    sent: 50,
                    open_rate: 0.5,
                    click_rate: 0.1,
                    ..Default::default()
                },
            )],
        );
        let recs = generate_recommendations(&test);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Warning);
        assert_eq!(recs[0].title, "Low sample size");
    }

    #[test]
    fn test_recommendations_absent_with_enough_sends() {
        let test = ab_test(
            WinnerCriteria::OpenRate,
            vec![variant(
                "A",
                VariantMetrics {
                    sent: 500,
                    open_rate: 0.5,
                    click_rate: 0.1,
                    ..Default::default()
                },
            )],
        );
        assert!(generate_recommendations(&test).is_empty());
    }

    #[test]
    fn test_recommendations_fixed_order() {
        // Low sample + weak opens + weak clicks: warning first, then the two
        // tips in subject-then-cta order.
        let test = ab_test(
            WinnerCriteria::OpenRate,
            vec![variant(
                "A",
                VariantMetrics {
                    sent: 40,
                    open_rate: 0.1,
                    click_rate: 0.01,
                    ..Default::default()
                },
            )],
        );
        let recs = generate_recommendations(&test);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].kind, RecommendationKind::Warning);
        assert_eq!(recs[1].title, "Improve subject lines");
        assert_eq!(recs[2].title, "Strengthen the call to action");
    }

    #[test]
    fn test_overview_rates() {
        let overview = AnalyticsOverview::build(&[campaign(CampaignMetrics {
            sent: 200,
            opened: 50,
            clicked: 10,
            replied: 4,
            bounced: 2,
            unsubscribed: 0,
        })]);
        assert_eq!(overview.open_rate, 25.0);
        assert_eq!(overview.click_rate, 5.0);
        assert_eq!(overview.reply_rate, 2.0);
        assert_eq!(overview.bounce_rate, 1.0);
        assert_eq!(overview.campaigns.len(), 1);
        assert_eq!(overview.campaigns[0].open_rate, 25.0);
    }
}
