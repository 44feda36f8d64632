//! Error types for Outreach

use thiserror::Error;

/// Main error type for Outreach
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Outreach
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a not-found error for an entity kind ("Campaign", "Lead", ...)
    pub fn not_found(entity: &str) -> Self {
        Error::NotFound(entity.to_string())
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config(_) => 500,
            Error::Validation(_) => 422,
            Error::NotFound(_) => 404,
            Error::Auth(_) => 401,
            Error::Import(_) => 400,
            Error::Internal(_) => 500,
            Error::Other(_) => 500,
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Auth(_) => "UNAUTHORIZED",
            Error::Import(_) => "IMPORT_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
            Error::Other(_) => "INTERNAL_ERROR",
        }
    }
}
