//! Auth handlers

use axum::{extract::State, http::StatusCode, Json};
use outreach_core::AuthOutcome;
use outreach_store::service::NewUser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::auth::AppState;
use crate::handlers::{service_error, ErrorResponse};

/// Request body for logging in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for registering
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for logging out
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

/// Request body carrying just an email
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Request body for resetting a password
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Request body for confirming a verification code
#[derive(Debug, Deserialize)]
pub struct ConfirmCodeRequest {
    pub email: String,
    pub code: String,
}

/// Simple message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Verification outcome response
#[derive(Debug, Serialize)]
pub struct VerifiedResponse {
    pub verified: bool,
}

/// Log in with email and password
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthOutcome>, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state
        .auth
        .login(&input.email, &input.password)
        .await
        .map_err(service_error)?;
    Ok(Json(outcome))
}

/// Register a new user
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthOutcome>), (StatusCode, Json<ErrorResponse>)> {
    let outcome = state
        .auth
        .register(NewUser {
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
        })
        .await
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Drop a session
///
/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LogoutRequest>,
) -> StatusCode {
    state.auth.logout(&input.token).await;
    StatusCode::NO_CONTENT
}

/// Pretend to send a password reset email
///
/// POST /api/v1/auth/forgot-password
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmailRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth
        .forgot_password(&input.email)
        .await
        .map_err(service_error)?;
    Ok(Json(MessageResponse {
        message: "Password reset email sent successfully".to_string(),
    }))
}

/// Reset a password
///
/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth
        .reset_password(&input.email, &input.new_password)
        .await
        .map_err(|e| {
            error!("Failed to reset password: {}", e);
            service_error(e)
        })?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}

/// Issue a verification code
///
/// POST /api/v1/auth/verification/send
pub async fn send_verification(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmailRequest>,
) -> Json<MessageResponse> {
    state.verification.send_code(&input.email).await;
    Json(MessageResponse {
        message: "Verification email sent successfully".to_string(),
    })
}

/// Confirm a verification code
///
/// POST /api/v1/auth/verification/confirm
pub async fn confirm_verification(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ConfirmCodeRequest>,
) -> Json<VerifiedResponse> {
    let verified = state.verification.verify(&input.email, &input.code).await;
    Json(VerifiedResponse { verified })
}
