//! User service

use chrono::Utc;
use outreach_common::types::UserId;
use outreach_common::Result;
use serde::Deserialize;

use crate::models::User;
use crate::store::Store;

/// Input for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// User service
#[derive(Clone)]
pub struct UserService {
    store: Store<User>,
}

impl UserService {
    /// Create a new user service
    pub fn new(store: Store<User>) -> Self {
        Self { store }
    }

    /// Get a user by id
    pub async fn get(&self, id: UserId) -> Result<User> {
        self.store.get(id).await
    }

    /// Case-insensitive lookup by email
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = email.to_lowercase();
        self.store
            .list()
            .await
            .into_iter()
            .find(|u| u.email.to_lowercase() == email)
    }

    /// Create a user. Emails are normalized to lowercase.
    pub async fn create(&self, input: NewUser) -> User {
        let now = Utc::now();
        let user = User {
            id: 0,
            email: input.email.to_lowercase(),
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(user).await
    }

    /// Replace a user's password
    pub async fn set_password(&self, id: UserId, password: String) -> Result<User> {
        self.store.update_with(id, |u| u.password = password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let svc = UserService::new(Store::new(Latency::none()));
        svc.create(NewUser {
            email: "Demo@Example.com".into(),
            password: "password123".into(),
            first_name: "Demo".into(),
            last_name: "User".into(),
        })
        .await;

        let found = svc.find_by_email("demo@EXAMPLE.com").await;
        assert!(found.is_some());
        assert_eq!(found.unwrap().email, "demo@example.com");
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let svc = UserService::new(Store::new(Latency::none()));
        assert!(svc.find_by_email("ghost@example.com").await.is_none());
    }
}
