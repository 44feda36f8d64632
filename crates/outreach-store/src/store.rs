//! Generic in-memory store
//!
//! Every entity lives in a `Store<T>`: a `Vec` behind an `RwLock`, seeded
//! once from a static fixture. The store is an injected dependency, never a
//! module-level singleton, so tests can construct isolated instances.

use chrono::{DateTime, Utc};
use outreach_common::{Error, Result};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// A record that can live in a [`Store`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name, used in "not found" errors
    const ENTITY: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Simulated backend latency, drawn uniformly per operation.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    /// Latency in the given millisecond range
    pub fn range(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    /// No artificial delay; used in tests
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    async fn wait(&self) {
        if self.max_ms == 0 {
            return;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::range(200, 500)
    }
}

/// In-memory store for one entity type.
///
/// All accessors return clones; mutating a returned value never touches the
/// stored one. Writes are serialized behind the lock, which is what makes the
/// max+1 id assignment acceptable.
#[derive(Clone)]
pub struct Store<T: Record> {
    records: Arc<RwLock<Vec<T>>>,
    latency: Latency,
}

impl<T: Record> Store<T> {
    /// Create an empty store
    pub fn new(latency: Latency) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            latency,
        }
    }

    /// Create a store seeded with the given records
    pub fn with_records(records: Vec<T>, latency: Latency) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            latency,
        }
    }

    /// Create a store seeded from a JSON fixture
    pub fn from_fixture(json: &str, latency: Latency) -> Result<Self>
    where
        T: serde::de::DeserializeOwned,
    {
        let records: Vec<T> = serde_json::from_str(json).map_err(|e| {
            Error::Config(format!("Failed to parse {} fixture: {}", T::ENTITY, e))
        })?;
        debug!("Seeded {} store with {} records", T::ENTITY, records.len());
        Ok(Self::with_records(records, latency))
    }

    /// Clone of every record, in store order (newest first)
    pub async fn list(&self) -> Vec<T> {
        self.latency.wait().await;
        self.records.read().await.clone()
    }

    /// Clone of the record with the given id
    pub async fn get(&self, id: i64) -> Result<T> {
        self.latency.wait().await;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Error::not_found(T::ENTITY))
    }

    /// Insert a record, assigning max existing id + 1 and stamping timestamps.
    /// New records go to the front of the list.
    pub async fn insert(&self, mut record: T) -> T {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        record.set_id(next_id);
        record.set_created_at(now);
        record.set_updated_at(now);
        records.insert(0, record.clone());
        record
    }

    /// Apply a mutation to the record with the given id and bump `updated_at`
    pub async fn update_with<F>(&self, id: i64, f: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(T::ENTITY))?;
        f(record);
        record.set_updated_at(Utc::now());
        Ok(record.clone())
    }

    /// Remove the record with the given id
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(T::ENTITY))?;
        records.remove(index);
        Ok(())
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Implement [`Record`] for an entity with the standard id/timestamp fields.
macro_rules! impl_record {
    ($ty:ty, $entity:expr) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }

            fn set_created_at(&mut self, at: DateTime<Utc>) {
                self.created_at = at;
            }

            fn set_updated_at(&mut self, at: DateTime<Utc>) {
                self.updated_at = at;
            }
        }
    };
}

impl_record!(crate::models::Campaign, "Campaign");
impl_record!(crate::models::Lead, "Lead");
impl_record!(crate::models::EmailAccount, "Email account");
impl_record!(crate::models::EmailThread, "Email thread");
impl_record!(crate::models::EmailTemplate, "Template");
impl_record!(crate::models::User, "User");
impl_record!(crate::models::ValidationRun, "Validation result");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lead;
    use outreach_common::types::LeadStatus;

    fn lead(id: i64, email: &str) -> Lead {
        Lead {
            id,
            email: email.to_string(),
            first_name: None,
            last_name: None,
            company: None,
            title: None,
            phone: None,
            website: None,
            linkedin: None,
            status: LeadStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_store(records: Vec<Lead>) -> Store<Lead> {
        Store::with_records(records, Latency::none())
    }

    #[tokio::test]
    async fn test_insert_assigns_max_plus_one() {
        let store = test_store(vec![lead(3, "a@x.com"), lead(7, "b@x.com")]);
        let created = store.insert(lead(0, "c@x.com")).await;
        assert_eq!(created.id, 8);
    }

    #[tokio::test]
    async fn test_insert_into_empty_store_starts_at_one() {
        let store = test_store(vec![]);
        let created = store.insert(lead(0, "a@x.com")).await;
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_insert_goes_to_front() {
        let store = test_store(vec![lead(1, "a@x.com")]);
        store.insert(lead(0, "b@x.com")).await;
        let all = store.list().await;
        assert_eq!(all[0].email, "b@x.com");
        assert_eq!(all[1].email, "a@x.com");
    }

    #[tokio::test]
    async fn test_id_reuse_after_delete() {
        // Deleting the max id frees it for the next insert; acceptable with a
        // single in-memory writer.
        let store = test_store(vec![lead(1, "a@x.com"), lead(2, "b@x.com")]);
        store.remove(2).await.unwrap();
        let created = store.insert(lead(0, "c@x.com")).await;
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = test_store(vec![]);
        let err = store.get(42).await.unwrap_err();
        assert_eq!(err.to_string(), "Lead not found");
    }

    #[tokio::test]
    async fn test_returned_clone_does_not_alias_store() {
        let store = test_store(vec![lead(1, "a@x.com")]);
        let mut fetched = store.get(1).await.unwrap();
        fetched.email = "mutated@x.com".to_string();
        assert_eq!(store.get(1).await.unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_with_bumps_updated_at() {
        let store = test_store(vec![lead(1, "a@x.com")]);
        let before = store.get(1).await.unwrap().updated_at;
        let updated = store
            .update_with(1, |l| l.status = LeadStatus::Replied)
            .await
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Replied);
        assert!(updated.updated_at >= before);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let store = test_store(vec![lead(1, "a@x.com")]);
        assert!(store.remove(9).await.is_err());
        assert_eq!(store.len().await, 1);
    }
}
