use crate::domain::model::Accuracy;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocoderError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{0}")]
    InvalidServerResponse(String),

    #[error("provider {provider} doesn't support \"{requested}\" accuracy (max accuracy is \"{max}\")")]
    UnsupportedAccuracy {
        provider: String,
        requested: Accuracy,
        max: Accuracy,
    },

    #[error("provider {provider} doesn't support {operation}")]
    NotImplemented {
        provider: String,
        operation: &'static str,
    },

    #[error("place {place_id} was not found")]
    PlaceNotFound { place_id: String },

    #[error("Validation error: {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credentials,
    Quota,
    Server,
    Query,
    Configuration,
    Transport,
}

impl GeocoderError {
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidServerResponse(message.into())
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCredentials(_) => ErrorCategory::Credentials,
            Self::QuotaExceeded(_) => ErrorCategory::Quota,
            Self::InvalidServerResponse(_) | Self::PlaceNotFound { .. } => ErrorCategory::Server,
            Self::UnsupportedAccuracy { .. }
            | Self::NotImplemented { .. }
            | Self::ValidationError { .. } => ErrorCategory::Query,
            Self::ConfigError { .. } | Self::IoError(_) | Self::UrlError(_) => {
                ErrorCategory::Configuration
            }
            Self::Transport(_) => ErrorCategory::Transport,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Credentials => "Check the provider credentials in the configuration file",
            ErrorCategory::Quota => "Wait for the provider quota to reset or use a signed/paid plan",
            ErrorCategory::Server => "The provider returned an unexpected response; try again later",
            ErrorCategory::Query => "Adjust the query parameters or pick another provider",
            ErrorCategory::Configuration => "Fix the configuration file and environment variables",
            ErrorCategory::Transport => "Check network connectivity and the configured timeout",
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Query => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Credentials | ErrorCategory::Quota => 4,
            ErrorCategory::Server | ErrorCategory::Transport => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeocoderError>;
