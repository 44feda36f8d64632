//! Email template service

use chrono::Utc;
use outreach_common::types::EmailTemplateId;
use outreach_common::Result;
use serde::Deserialize;

use crate::models::EmailTemplate;
use crate::store::Store;

/// Input for creating a template
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub category: String,
    pub subject: String,
    pub body: String,
}

/// Input for updating a template; unset fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Email template service
#[derive(Clone)]
pub struct EmailTemplateService {
    store: Store<EmailTemplate>,
}

impl EmailTemplateService {
    /// Create a new email template service
    pub fn new(store: Store<EmailTemplate>) -> Self {
        Self { store }
    }

    /// All templates, newest first
    pub async fn get_all(&self) -> Vec<EmailTemplate> {
        self.store.list().await
    }

    /// Get a template by id
    pub async fn get(&self, id: EmailTemplateId) -> Result<EmailTemplate> {
        self.store.get(id).await
    }

    /// Templates in the given category
    pub async fn get_by_category(&self, category: &str) -> Vec<EmailTemplate> {
        self.store
            .list()
            .await
            .into_iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, subject and body
    pub async fn search(&self, term: &str) -> Vec<EmailTemplate> {
        let term = term.to_lowercase();
        self.store
            .list()
            .await
            .into_iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&term)
                    || t.subject.to_lowercase().contains(&term)
                    || t.body.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Create a template
    pub async fn create(&self, input: NewTemplate) -> EmailTemplate {
        let now = Utc::now();
        let template = EmailTemplate {
            id: 0,
            name: input.name,
            category: input.category,
            subject: input.subject,
            body: input.body,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(template).await
    }

    /// Merge an update into a template
    pub async fn update(&self, id: EmailTemplateId, input: UpdateTemplate) -> Result<EmailTemplate> {
        self.store
            .update_with(id, |t| {
                if let Some(name) = input.name {
                    t.name = name;
                }
                if let Some(category) = input.category {
                    t.category = category;
                }
                if let Some(subject) = input.subject {
                    t.subject = subject;
                }
                if let Some(body) = input.body {
                    t.body = body;
                }
            })
            .await
    }

    /// Delete a template
    pub async fn delete(&self, id: EmailTemplateId) -> Result<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;

    async fn seeded() -> EmailTemplateService {
        let svc = EmailTemplateService::new(Store::new(Latency::none()));
        svc.create(NewTemplate {
            name: "Cold intro".into(),
            category: "outreach".into(),
            subject: "Quick question".into(),
            body: "Hi {{first_name}}".into(),
        })
        .await;
        svc.create(NewTemplate {
            name: "Follow-up".into(),
            category: "follow_up".into(),
            subject: "Bumping this".into(),
            body: "Just floating this up".into(),
        })
        .await;
        svc
    }

    #[tokio::test]
    async fn test_get_by_category() {
        let svc = seeded().await;
        let outreach = svc.get_by_category("outreach").await;
        assert_eq!(outreach.len(), 1);
        assert_eq!(outreach[0].name, "Cold intro");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let svc = seeded().await;
        let hits = svc.search("BUMPING").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Follow-up");
    }

    #[tokio::test]
    async fn test_search_matches_body() {
        let svc = seeded().await;
        let hits = svc.search("floating").await;
        assert_eq!(hits.len(), 1);
    }
}
