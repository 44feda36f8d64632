//! Validation run history service

use chrono::Utc;
use outreach_common::types::ValidationRunId;
use outreach_common::Result;

use crate::models::{InvalidEmail, ValidationRun};
use crate::store::Store;

/// Validation run history service. Starts empty; runs accumulate in memory.
#[derive(Clone)]
pub struct ValidationRunService {
    store: Store<ValidationRun>,
}

impl ValidationRunService {
    /// Create a new validation run service
    pub fn new(store: Store<ValidationRun>) -> Self {
        Self { store }
    }

    /// All recorded runs, newest first
    pub async fn history(&self) -> Vec<ValidationRun> {
        self.store.list().await
    }

    /// Get a run by id
    pub async fn get(&self, id: ValidationRunId) -> Result<ValidationRun> {
        self.store.get(id).await
    }

    /// Record the outcome of a bulk validation run
    pub async fn record(
        &self,
        file_name: String,
        valid: Vec<String>,
        risky: Vec<String>,
        invalid: Vec<InvalidEmail>,
    ) -> ValidationRun {
        let now = Utc::now();
        let run = ValidationRun {
            id: 0,
            file_name,
            total: valid.len() + risky.len() + invalid.len(),
            valid,
            risky,
            invalid,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(run).await
    }

    /// Delete a recorded run
    pub async fn delete(&self, id: ValidationRunId) -> Result<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;

    #[tokio::test]
    async fn test_record_computes_total() {
        let svc = ValidationRunService::new(Store::new(Latency::none()));
        let run = svc
            .record(
                "list.csv".into(),
                vec!["a@example.com".into()],
                vec!["info@example.com".into()],
                vec![InvalidEmail {
                    email: "bad".into(),
                    reason: "Invalid email syntax".into(),
                }],
            )
            .await;
        assert_eq!(run.total, 3);
        assert_eq!(svc.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_run() {
        let svc = ValidationRunService::new(Store::new(Latency::none()));
        let err = svc.delete(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation result not found");
    }
}
