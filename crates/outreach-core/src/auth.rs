//! Mock authentication and email verification
//!
//! In-memory sessions with opaque random tokens and plaintext password
//! comparison. This is a simulated auth layer by specification, not a
//! security boundary.

use chrono::{DateTime, Duration, Utc};
use outreach_common::types::UserId;
use outreach_common::{Error, Result};
use outreach_store::models::User;
use outreach_store::service::{NewUser, UserService};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Verification codes expire after this long
const CODE_TTL_MINUTES: i64 = 10;

/// Session token length
const TOKEN_LEN: usize = 32;

/// User representation with the password stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// Successful login or registration
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    pub user: PublicUser,
    pub token: String,
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Mock auth service over the user store
#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    sessions: Arc<RwLock<HashMap<String, UserId>>>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(users: UserService) -> Self {
        Self {
            users,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Log a user in. Plaintext comparison, by design of the mock layer.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or_else(|| Error::Auth("User not found".to_string()))?;

        if user.password != password {
            return Err(Error::Auth("Invalid password".to_string()));
        }

        let token = generate_token();
        self.sessions.write().await.insert(token.clone(), user.id);

        info!("User {} logged in", user.email);
        Ok(AuthOutcome {
            user: user.into(),
            token,
        })
    }

    /// Register a new user and log them in
    pub async fn register(&self, input: NewUser) -> Result<AuthOutcome> {
        if self.users.find_by_email(&input.email).await.is_some() {
            return Err(Error::Validation(
                "User already exists with this email".to_string(),
            ));
        }

        let user = self.users.create(input).await;
        let token = generate_token();
        self.sessions.write().await.insert(token.clone(), user.id);

        info!("User {} registered", user.email);
        Ok(AuthOutcome {
            user: user.into(),
            token,
        })
    }

    /// Drop the session for a token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Resolve a session token to its user
    pub async fn authenticate(&self, token: &str) -> Option<PublicUser> {
        let user_id = *self.sessions.read().await.get(token)?;
        self.users.get(user_id).await.ok().map(PublicUser::from)
    }

    /// Pretend to send a password reset email
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        self.users
            .find_by_email(email)
            .await
            .ok_or_else(|| Error::not_found("User"))?;
        info!("Password reset email sent to {}", email);
        Ok(())
    }

    /// Reset a user's password
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<()> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or_else(|| Error::not_found("User"))?;
        self.users.set_password(user.id, new_password.to_string()).await?;
        info!("Password reset for {}", email);
        Ok(())
    }
}

/// In-memory email verification codes
#[derive(Clone, Default)]
pub struct VerificationService {
    codes: Arc<RwLock<HashMap<String, (String, DateTime<Utc>)>>>,
}

impl VerificationService {
    /// Create a new verification service
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a 6-digit code for an email, replacing any outstanding one.
    /// Returns the code; a real system would email it instead.
    pub async fn send_code(&self, email: &str) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(100_000..1_000_000));
        let expiry = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);
        self.codes
            .write()
            .await
            .insert(email.to_lowercase(), (code.clone(), expiry));

        info!("Verification code for {}: {}", email, code);
        code
    }

    /// Check a code. Codes are single-use and expire after ten minutes.
    pub async fn verify(&self, email: &str, code: &str) -> bool {
        let key = email.to_lowercase();
        let mut codes = self.codes.write().await;

        let Some((stored, expiry)) = codes.get(&key).cloned() else {
            return false;
        };

        if Utc::now() > expiry {
            codes.remove(&key);
            return false;
        }

        if stored != code {
            return false;
        }

        codes.remove(&key);
        true
    }
}
