use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsignError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Remote service rejected the request ({status}): {message}")]
    RemoteError {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl EsignError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        EsignError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors caused by what the caller supplied rather than by the remote side.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EsignError::InvalidInput { .. }
                | EsignError::ConfigError { .. }
                | EsignError::InvalidConfigValueError { .. }
                | EsignError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EsignError::InvalidInput { field, reason } => {
                format!("The envelope could not be built: {} ({})", reason, field)
            }
            EsignError::ApiError(e) if e.is_timeout() => {
                "The signing service did not answer in time".to_string()
            }
            EsignError::ApiError(_) => "Could not reach the signing service".to_string(),
            EsignError::RemoteError {
                status,
                error_code: Some(code),
                message,
            } => format!("Signing service error {} [{}]: {}", status, code, message),
            EsignError::RemoteError {
                status, message, ..
            } => format!("Signing service error {}: {}", status, message),
            EsignError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EsignError::InvalidInput { .. } => {
                "Check the signer and cc names and emails, and that every document is non-empty"
            }
            EsignError::ApiError(_) => "Check the base path and your network connection",
            EsignError::RemoteError { status: 401, .. } => {
                "The access token is missing or expired; obtain a new one"
            }
            EsignError::RemoteError { .. } => {
                "Inspect the error code returned by the signing service"
            }
            EsignError::IoError(_) => "Check that the document and template paths exist",
            EsignError::SerializationError(_) => "The request or response body was malformed",
            EsignError::ConfigError { .. }
            | EsignError::InvalidConfigValueError { .. }
            | EsignError::MissingConfigError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EsignError>;
