//! Error types for feeportal-core
//!
//! Every failure talking to the payments backend, and every rejected
//! form submission, ends up as a `CoreError`. Handlers turn it into the
//! single line of text shown to the user.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend unreachable or the connection broke
    RequestFailed,
    /// Backend did not answer in time
    Timeout,
    /// Backend answered with a non-2xx status
    BackendError,
    /// Backend body could not be decoded
    InvalidResponse,
    /// User input rejected before any request was made
    ValidationError,
    /// HTTP client could not be constructed
    ClientSetup,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::RequestFailed => write!(f, "REQUEST_FAILED"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::BackendError => write!(f, "BACKEND_ERROR"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::ClientSetup => write!(f, "CLIENT_SETUP"),
        }
    }
}

/// Detailed error information for JSON responses and logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " {}", details)?;
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for feeportal-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Request to payments API failed: {message}")]
    Request { message: String },

    #[error("Payments API timed out")]
    Timeout,

    #[error("Payments API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from payments API: {message}")]
    InvalidResponse { message: String },

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Could not build HTTP client: {message}")]
    ClientSetup { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Request { .. } => ErrorCode::RequestFailed,
            CoreError::Timeout => ErrorCode::Timeout,
            CoreError::Api { .. } => ErrorCode::BackendError,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::ClientSetup { .. } => ErrorCode::ClientSetup,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Request { .. } => ErrorSeverity::Error,
            CoreError::Timeout => ErrorSeverity::Warning,
            CoreError::Api { status, .. } if *status >= 500 => ErrorSeverity::Error,
            CoreError::Api { .. } => ErrorSeverity::Warning,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::Validation { .. } => ErrorSeverity::Info,
            CoreError::ClientSetup { .. } => ErrorSeverity::Critical,
        }
    }

    /// Message from the backend, if it sent one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            CoreError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text shown to the user: the backend's own message when present,
    /// otherwise the given fallback
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            CoreError::Validation { message, .. } => message.clone(),
            _ => self
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Request { .. } | CoreError::Timeout => {
                details = details.with_suggestion(
                    "Check that the payments API is running and payments_api.base_url is correct."
                        .to_string(),
                );
            }
            CoreError::Api { status, .. } => {
                details = details.with_detail(serde_json::json!({ "status": status }));
            }
            CoreError::Validation { field, .. } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<reqwest::Error> for CoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return CoreError::Timeout;
        }
        if error.is_decode() {
            return CoreError::InvalidResponse {
                message: error.to_string(),
            };
        }
        CoreError::Request {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::InvalidResponse {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::info!(
                target: "feeportal::error",
                "{} - Operation: {} - {}",
                error.to_details(),
                context.operation,
                context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "feeportal::error",
                "{} - Operation: {} - {}",
                error.to_details(),
                context.operation,
                context.data
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
                target: "feeportal::error",
                "{} - Operation: {} - {}",
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::RequestFailed.to_string(), "REQUEST_FAILED");
        assert_eq!(ErrorCode::BackendError.to_string(), "BACKEND_ERROR");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_api_error_severity_by_status() {
        let server = CoreError::Api { status: 502, message: String::new() };
        assert_eq!(server.severity(), ErrorSeverity::Error);

        let client = CoreError::Api { status: 400, message: "bad".to_string() };
        assert_eq!(client.severity(), ErrorSeverity::Warning);

        assert_eq!(CoreError::Timeout.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_display_message_prefers_backend_text() {
        let error = CoreError::Api {
            status: 400,
            message: "Invalid trustee".to_string(),
        };
        assert_eq!(error.display_message("Payment creation failed"), "Invalid trustee");

        let error = CoreError::Api { status: 500, message: String::new() };
        assert_eq!(error.display_message("Payment creation failed"), "Payment creation failed");

        let error = CoreError::Request { message: "connection refused".to_string() };
        assert_eq!(error.display_message("Payment creation failed"), "Payment creation failed");
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let error = CoreError::Validation {
            field: "amount".to_string(),
            message: "Amount must be a positive number".to_string(),
        };
        assert_eq!(error.to_string(), "Amount must be a positive number");
        assert_eq!(error.display_message("ignored"), "Amount must be a positive number");

        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::ValidationError);
        assert_eq!(details.details, Some(serde_json::json!({ "field": "amount" })));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("list_transactions")
            .with_data("page", serde_json::json!(2));
        assert_eq!(context.operation, "list_transactions");
        assert_eq!(context.data["page"], serde_json::json!(2));
    }

    #[test]
    fn test_request_details_have_suggestion() {
        let details = CoreError::Timeout.to_details();
        assert_eq!(details.code, ErrorCode::Timeout);
        assert_eq!(details.suggestions.len(), 1);
    }
}
