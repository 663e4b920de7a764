use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request to {url} returned status {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Could not extract course id from URL: {url}")]
    CourseIdError { url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    System,
}

impl EtlError {
    /// Failures that only abandon the current unit of work (one combination,
    /// one registry, one module). Everything else stops the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EtlError::ApiError(_)
                | EtlError::HttpStatusError { .. }
                | EtlError::MalformedResponse { .. }
                | EtlError::CourseIdError { .. }
                | EtlError::UrlError(_)
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::MalformedResponse { .. }
            | EtlError::CourseIdError { .. }
            | EtlError::SerializationError(_)
            | EtlError::UrlError(_) => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Config,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Data => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            EtlError::HttpStatusError { status: 401, .. } => {
                "Canvas rejected the access token".to_string()
            }
            EtlError::IoError(e) => format!("Could not write output: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingConfigError { .. } => {
                "Set CANVAS_ACCESS_TOKEN or pass --access-token"
            }
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigValidationError { .. } => {
                "Check the command line flags or the TOML configuration file"
            }
            EtlError::ConfigError { .. } => "Check that the configuration file exists and is readable",
            EtlError::HttpStatusError { status: 401, .. } => {
                "Generate a new Canvas access token and try again"
            }
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => {
                "Check network connectivity and the Canvas base URL"
            }
            EtlError::IoError(_) => "Check that the output directory is writable",
            _ => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_unit_failures_are_recoverable() {
        let status = EtlError::HttpStatusError {
            url: "https://canvas.test/api/v1/courses/1/modules".to_string(),
            status: 500,
        };
        assert!(status.is_recoverable());
        assert_eq!(status.category(), ErrorCategory::Network);

        let course = EtlError::CourseIdError {
            url: "https://canvas.test/files/9".to_string(),
        };
        assert!(course.is_recoverable());
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let missing = EtlError::MissingConfigError {
            field: "access_token".to_string(),
        };
        assert!(!missing.is_recoverable());
        assert_eq!(missing.exit_code(), 1);
        assert!(missing.user_friendly_message().contains("access_token"));
    }
}
