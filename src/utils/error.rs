use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server returned status {status}: {reason}")]
    ServiceError { status: u16, reason: String },

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Service,
    Transport,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl From<reqwest::Error> for CardError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("could not connect to generation service: {}", err)
        } else {
            err.to_string()
        };
        CardError::TransportError { message }
    }
}

impl From<zip::result::ZipError> for CardError {
    fn from(err: zip::result::ZipError) -> Self {
        CardError::TransportError {
            message: format!("response is not a readable 3MF archive: {}", err),
        }
    }
}

impl CardError {
    pub fn config(message: impl Into<String>) -> Self {
        CardError::ConfigError {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        CardError::TransportError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CardError::ConfigError { .. } | CardError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CardError::ServiceError { .. } => ErrorCategory::Service,
            CardError::TransportError { .. } => ErrorCategory::Transport,
            CardError::IoError(_) | CardError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 服務端錯誤通常重新產生即可
            CardError::ServiceError { .. } | CardError::TransportError { .. } => {
                ErrorSeverity::Medium
            }
            CardError::ConfigError { .. } | CardError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            CardError::IoError(_) | CardError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CardError::ConfigError { message } => {
                format!("Configuration Error: {}", message)
            }
            CardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration Error: {} ({})", reason, field)
            }
            CardError::ServiceError { status, reason } => {
                format!("Generation Failed. Server returned status {}: {}", status, reason)
            }
            CardError::TransportError { message } => {
                format!("Generation Failed. Details: {}", message)
            }
            CardError::IoError(e) => format!("Could not save the card file: {}", e),
            CardError::SerializationError(e) => format!("Could not encode the card: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Set service.endpoint in the config file or pass --endpoint"
            }
            ErrorCategory::Service => "Check the generation service logs, then generate again",
            ErrorCategory::Transport => {
                "Check that the generation service is reachable, then generate again"
            }
            ErrorCategory::System => "Check that the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
