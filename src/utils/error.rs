use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Stripe returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Unexpected response from {endpoint}: missing '{field}'")]
    UnexpectedResponse { endpoint: String, field: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("No payment links were created ({attempted} rows processed)")]
    NoLinksCreated { attempted: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
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
    Input,
    Validation,
    Remote,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LinkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LinkError::FileNotFound { .. } | LinkError::CsvError(_) | LinkError::IoError(_) => {
                ErrorCategory::Input
            }
            LinkError::InvalidAmount { .. } | LinkError::MissingField { .. } => {
                ErrorCategory::Validation
            }
            LinkError::ApiError(_)
            | LinkError::RemoteError { .. }
            | LinkError::UnexpectedResponse { .. }
            | LinkError::SerializationError(_) => ErrorCategory::Remote,
            LinkError::OutputWriteError { .. } | LinkError::NoLinksCreated { .. } => {
                ErrorCategory::Output
            }
            LinkError::ConfigError { .. }
            | LinkError::MissingConfigError { .. }
            | LinkError::InvalidConfigValueError { .. }
            | LinkError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Remote => ErrorSeverity::Low,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => match self {
                LinkError::NoLinksCreated { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    /// Errors that only cost the current row; the run carries on without it.
    pub fn is_row_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Remote
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LinkError::FileNotFound { path } => {
                format!("The file '{}' was not found.", path)
            }
            LinkError::NoLinksCreated { .. } => {
                "No payment links were created. Check your input CSV and API key.".to_string()
            }
            LinkError::OutputWriteError { path, source } => {
                format!("Error writing to file '{}': {}", path, source)
            }
            LinkError::RemoteError { message, .. } => format!("Stripe error: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LinkError::FileNotFound { .. } => "Check the --input path or run from the directory holding products.csv",
            LinkError::InvalidAmount { .. } => "amount_usd must be a non-negative decimal such as 15.99",
            LinkError::MissingField { .. } => "Every row needs a non-empty 'name' and an 'amount_usd' column",
            LinkError::ApiError(_) => "Check network connectivity and the --api-base URL",
            LinkError::RemoteError { status: 401, .. } => "Check that STRIPE_API_KEY holds a valid secret key",
            LinkError::RemoteError { .. } | LinkError::UnexpectedResponse { .. } => {
                "Inspect the row's data and the Stripe dashboard logs"
            }
            LinkError::NoLinksCreated { .. } => "Run with --verbose to see why each row was skipped",
            LinkError::OutputWriteError { .. } => "Check that the output directory exists and is writable",
            LinkError::MissingConfigError { .. } => "Set STRIPE_API_KEY or pass --api-key",
            LinkError::ConfigError { .. }
            | LinkError::InvalidConfigValueError { .. }
            | LinkError::ConfigValidationError { .. } => "Fix the configuration value and try again",
            LinkError::CsvError(_) => "Make sure the input is a valid CSV file with a header row",
            LinkError::IoError(_) => "Check file permissions",
            LinkError::SerializationError(_) => "Stripe returned a body that is not valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_failure_class() {
        let missing = LinkError::FileNotFound {
            path: "products.csv".to_string(),
        };
        let none = LinkError::NoLinksCreated { attempted: 3 };
        let write = LinkError::OutputWriteError {
            path: "out.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(missing.exit_code(), 1);
        assert_eq!(none.exit_code(), 2);
        assert_eq!(write.exit_code(), 3);
    }

    #[test]
    fn test_row_errors_are_recoverable() {
        let bad_amount = LinkError::InvalidAmount {
            value: "N/A".to_string(),
            reason: "not a number".to_string(),
        };
        let remote = LinkError::RemoteError {
            status: 400,
            message: "No such price".to_string(),
        };

        assert!(bad_amount.is_row_recoverable());
        assert!(remote.is_row_recoverable());
        assert!(!LinkError::NoLinksCreated { attempted: 0 }.is_row_recoverable());
    }
}
