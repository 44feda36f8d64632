//! Bulk email validation pipeline
//!
//! Classification runs a fixed pipeline per address: syntax check,
//! disposable-domain lookup, role-based-prefix detection, then simulated
//! domain/provider checks. The provider checks are deliberately randomized —
//! there is no real resolver behind them — so the validator takes a seedable
//! RNG to keep tests deterministic.

use once_cell::sync::Lazy;
use outreach_common::types::EmailAddress;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::Serialize;

use outreach_store::models::InvalidEmail;

static EMAIL_SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email syntax regex"));

static EMAIL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s@,;]+@[^\s@,;]+\.[^\s@,;]+)").expect("email token regex"));

const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "yopmail.com",
    "temp-mail.org",
];

const ROLE_PREFIXES: &[&str] = &[
    "admin",
    "support",
    "info",
    "contact",
    "sales",
    "marketing",
    "noreply",
    "no-reply",
    "help",
    "service",
];

const SIMULATED_FAILURES: &[&str] = &[
    "Domain does not exist",
    "Mailbox does not exist",
    "Domain not configured for email",
    "Blocked by provider",
];

/// Classification outcome for one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Risky,
    Invalid,
}

/// Result of checking one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailCheck {
    pub email: String,
    pub verdict: Verdict,
    pub reason: String,
}

/// Bucketed outcome of a bulk validation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkValidation {
    pub total: usize,
    pub valid: Vec<String>,
    pub risky: Vec<String>,
    pub invalid: Vec<InvalidEmail>,
}

/// Email validator with simulated provider checks
pub struct EmailValidator {
    rng: StdRng,
}

impl EmailValidator {
    /// Validator with entropy-seeded randomness
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Validator with a fixed seed; used in tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether the address passes the syntax check
    pub fn has_valid_syntax(email: &str) -> bool {
        EMAIL_SYNTAX.is_match(email)
    }

    /// Whether the address domain is on the disposable list
    pub fn is_disposable(email: &str) -> bool {
        EmailAddress::parse(email)
            .map(|addr| DISPOSABLE_DOMAINS.contains(&addr.domain.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Whether the address local part looks role-based (info@, support@, ...)
    pub fn is_role_based(email: &str) -> bool {
        EmailAddress::parse(email)
            .map(|addr| {
                let local = addr.local.to_lowercase();
                ROLE_PREFIXES.iter().any(|prefix| local.contains(prefix))
            })
            .unwrap_or(false)
    }

    /// Run the full pipeline on one address.
    ///
    /// The deterministic stages run first; only addresses that survive them
    /// hit the randomized provider check (90% pass rate).
    pub fn check(&mut self, email: &str) -> EmailCheck {
        if !Self::has_valid_syntax(email) {
            return EmailCheck {
                email: email.to_string(),
                verdict: Verdict::Invalid,
                reason: "Invalid email syntax".to_string(),
            };
        }

        if Self::is_disposable(email) {
            return EmailCheck {
                email: email.to_string(),
                verdict: Verdict::Invalid,
                reason: "Disposable email address".to_string(),
            };
        }

        if Self::is_role_based(email) {
            return EmailCheck {
                email: email.to_string(),
                verdict: Verdict::Risky,
                reason: "Role-based email address".to_string(),
            };
        }

        if self.rng.gen::<f64>() < 0.1 {
            let reason = SIMULATED_FAILURES[self.rng.gen_range(0..SIMULATED_FAILURES.len())];
            return EmailCheck {
                email: email.to_string(),
                verdict: Verdict::Invalid,
                reason: reason.to_string(),
            };
        }

        EmailCheck {
            email: email.to_string(),
            verdict: Verdict::Valid,
            reason: "Valid email address".to_string(),
        }
    }

    /// Validate every address extracted from `text`, reporting progress as a
    /// 0-100 percentage after each one.
    pub fn validate_bulk<F>(&mut self, text: &str, mut progress: F) -> BulkValidation
    where
        F: FnMut(u8),
    {
        let emails = extract_emails(text);
        let mut result = BulkValidation {
            total: emails.len(),
            ..Default::default()
        };

        for (i, email) in emails.iter().enumerate() {
            let check = self.check(email);
            match check.verdict {
                Verdict::Valid => result.valid.push(check.email),
                Verdict::Risky => result.risky.push(check.email),
                Verdict::Invalid => result.invalid.push(InvalidEmail {
                    email: check.email,
                    reason: check.reason,
                }),
            }

            let pct = ((i + 1) as f64 / emails.len() as f64 * 100.0).round() as u8;
            progress(pct);
        }

        result
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull email-looking tokens out of arbitrary text, one per line, deduplicated
/// in first-seen order.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut emails = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            continue;
        }
        if let Some(m) = EMAIL_TOKEN.find(trimmed) {
            let email = m.as_str().to_string();
            if seen.insert(email.clone()) {
                emails.push(email);
            }
        }
    }

    emails
}
