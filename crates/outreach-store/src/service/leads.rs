//! Lead service

use chrono::Utc;
use outreach_common::types::{LeadId, LeadStatus};
use outreach_common::Result;
use serde::Deserialize;

use crate::models::Lead;
use crate::store::Store;

/// Input for creating a lead
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLead {
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
    pub status: Option<LeadStatus>,
}

/// Input for updating a lead; unset fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLead {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub status: Option<LeadStatus>,
}

/// Lead service
#[derive(Clone)]
pub struct LeadService {
    store: Store<Lead>,
}

impl LeadService {
    /// Create a new lead service
    pub fn new(store: Store<Lead>) -> Self {
        Self { store }
    }

    /// All leads, newest first
    pub async fn get_all(&self) -> Vec<Lead> {
        self.store.list().await
    }

    /// Get a lead by id
    pub async fn get(&self, id: LeadId) -> Result<Lead> {
        self.store.get(id).await
    }

    /// Create a lead. Status defaults to `active`.
    pub async fn create(&self, input: NewLead) -> Lead {
        let now = Utc::now();
        let lead = Lead {
            id: 0,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            company: input.company,
            title: input.title,
            phone: input.phone,
            website: input.website,
            linkedin: input.linkedin,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.store.insert(lead).await
    }

    /// Create many leads in order, returning the created records
    pub async fn create_many(&self, inputs: Vec<NewLead>) -> Vec<Lead> {
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(self.create(input).await);
        }
        created
    }

    /// Merge an update into a lead
    pub async fn update(&self, id: LeadId, input: UpdateLead) -> Result<Lead> {
        self.store
            .update_with(id, |l| {
                if let Some(email) = input.email {
                    l.email = email;
                }
                if let Some(first_name) = input.first_name {
                    l.first_name = Some(first_name);
                }
                if let Some(last_name) = input.last_name {
                    l.last_name = Some(last_name);
                }
                if let Some(company) = input.company {
                    l.company = Some(company);
                }
                if let Some(title) = input.title {
                    l.title = Some(title);
                }
                if let Some(phone) = input.phone {
                    l.phone = Some(phone);
                }
                if let Some(website) = input.website {
                    l.website = Some(website);
                }
                if let Some(linkedin) = input.linkedin {
                    l.linkedin = Some(linkedin);
                }
                if let Some(status) = input.status {
                    l.status = status;
                }
            })
            .await
    }

    /// Delete a lead
    pub async fn delete(&self, id: LeadId) -> Result<()> {
        self.store.remove(id).await
    }
}
