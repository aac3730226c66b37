use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Address id is required")]
    MissingId,

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Operation '{operation}' is not supported by the {backend} backend")]
    Unsupported {
        operation: &'static str,
        backend: &'static str,
    },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API returned an unexpected payload, expected {expected}: {body}")]
    UnexpectedPayload { expected: &'static str, body: String },

    #[error("Offline store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error on {field}: {message}")]
    Config { field: String, message: String },

    #[error("Lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, AddressError>;

/// 錯誤分類，讓呼叫端能區分失敗原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Unauthorized,
    Remote,
    Transport,
    Storage,
    Config,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AddressError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingId | Self::Validation { .. } => ErrorCategory::Validation,
            Self::Unsupported { .. } => ErrorCategory::Unsupported,
            Self::Status { status: 404, .. } => ErrorCategory::NotFound,
            Self::Status {
                status: 401 | 403, ..
            } => ErrorCategory::Unauthorized,
            Self::Status { .. } | Self::UnexpectedPayload { .. } => ErrorCategory::Remote,
            Self::Transport(_) | Self::Serialization(_) => ErrorCategory::Transport,
            Self::Store(_) | Self::Io(_) | Self::LockPoisoned => ErrorCategory::Storage,
            Self::Config { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Transport | ErrorCategory::Remote | ErrorCategory::Unauthorized => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Unsupported | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::NotFound => "The requested address was not found".to_string(),
            ErrorCategory::Unauthorized => "You are not authorized to access addresses".to_string(),
            ErrorCategory::Remote => format!("The address service rejected the request: {}", self),
            ErrorCategory::Transport => "Could not reach the address service".to_string(),
            ErrorCategory::Storage => format!("The offline address store failed: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Unsupported => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Check the address fields and try again",
            ErrorCategory::NotFound => "Verify the address id",
            ErrorCategory::Unauthorized => "Log in again to refresh the session token",
            ErrorCategory::Remote => "Retry later or contact the service administrator",
            ErrorCategory::Transport => "Check the network connection or switch to offline mode",
            ErrorCategory::Storage => "Check that the offline database file is readable and writable",
            ErrorCategory::Config => "Fix the configuration file and run again",
            ErrorCategory::Unsupported => "Switch to online mode for this operation",
        }
    }
}

/// 將錯誤降級為 `None` 的相容介面
///
/// `AddressAccess` 已在失敗時記錄過日誌，它的結果用 `or_none`；
/// 直接呼叫後端（未經 facade）時才用 `or_log`，避免同一個錯誤記錄兩次。
pub trait Sentinel<T> {
    fn or_log(self, operation: &str) -> Option<T>;

    fn or_none(self) -> Option<T>;
}

impl<T> Sentinel<T> for Result<T> {
    fn or_none(self) -> Option<T> {
        self.ok()
    }

    fn or_log(self, operation: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            // 缺少 id 屬於本地驗證，不記錄
            Err(AddressError::MissingId) => None,
            Err(e) => {
                tracing::warn!(
                    operation,
                    category = ?e.category(),
                    "address operation failed: {}",
                    e
                );
                None
            }
        }
    }
}
