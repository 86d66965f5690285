use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConciergeError {
    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("invalid value for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("{service} request failed: {message}")]
    UpstreamError { service: String, message: String },

    #[error("recommendation generation failed: {message}")]
    GenerationError { message: String },
}

impl ConciergeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn upstream(service: &str, message: impl ToString) -> Self {
        Self::UpstreamError {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationError {
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigError { message } => {
                format!("Missing or invalid configuration: {}", message)
            }
            Self::ValidationError { field, reason } => {
                format!("Invalid input for {}: {}", field, reason)
            }
            Self::UpstreamError { service, .. } => format!(
                "Could not reach the {} service. Please try again in a moment.",
                service
            ),
            Self::GenerationError { .. } => {
                "The recommendation service did not return a result. Please try again.".to_string()
            }
        }
    }

    /// Exit code for the CLI: configuration and validation problems are the
    /// caller's to fix (2), upstream and generation failures are transient (1).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError { .. } | Self::ValidationError { .. } => 2,
            Self::UpstreamError { .. } | Self::GenerationError { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConciergeError>;
