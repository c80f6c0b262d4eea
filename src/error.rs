use thiserror::Error;
use uuid::Uuid;

use crate::models::EmergencyType;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The shared pool cannot cover the cost of a new incident
    #[error(
        "Insufficient resources to register a {emergency_type} emergency: requires {required}, {available} available"
    )]
    InsufficientResources {
        emergency_type: EmergencyType,
        required: i64,
        available: i64,
    },

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid state transition
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn incident_not_found(id: &Uuid) -> Self {
        AppError::NotFound(format!("Incident {} not found", id))
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::InsufficientResources { .. } => "INSUFFICIENT_RESOURCES",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the operator should be shown a blocking notification for this error.
    ///
    /// Lookups of unknown incidents stay silent on the dashboard.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::InsufficientResources { .. } | AppError::Validation(_)
        )
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            AppError::Validation("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::InsufficientResources {
                emergency_type: EmergencyType::Fire,
                required: 25,
                available: 10,
            }
            .error_code(),
            "INSUFFICIENT_RESOURCES"
        );
    }

    #[test]
    fn test_insufficient_resources_message() {
        let err = AppError::InsufficientResources {
            emergency_type: EmergencyType::Natural,
            required: 30,
            available: 20,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient resources to register a natural emergency: requires 30, 20 available"
        );
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_not_found_is_silent() {
        let err = AppError::incident_not_found(&Uuid::nil());
        assert!(!err.is_user_facing());
        assert!(err.to_string().contains("not found"));
    }
}
