use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Error logging in: {reason}")]
    AuthenticationError { reason: String },

    #[error("Error requesting transfer: {reason}")]
    TransferRejected { reason: String },

    #[error("Couldn't find player: {element}")]
    PlayerNotFound { element: u32 },

    #[error("Unexpected response from {endpoint} (status {status})")]
    UnexpectedResponse { endpoint: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Configuration,
    Validation,
    Rejection,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that stopped on an error of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl TransferError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TransferError::ApiError(_) | TransferError::UnexpectedResponse { .. } => {
                ErrorCategory::Network
            }
            TransferError::AuthenticationError { .. } => ErrorCategory::Authentication,
            TransferError::ConfigError { .. }
            | TransferError::MissingConfigError { .. }
            | TransferError::InvalidConfigValueError { .. }
            | TransferError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            TransferError::ValidationError { .. } | TransferError::PlayerNotFound { .. } => {
                ErrorCategory::Validation
            }
            TransferError::TransferRejected { .. } => ErrorCategory::Rejection,
            TransferError::SerializationError(_) => ErrorCategory::Data,
            TransferError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Authentication
            | ErrorCategory::Configuration
            | ErrorCategory::Validation
            | ErrorCategory::Rejection
            | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TransferError::ApiError(_) | TransferError::UnexpectedResponse { .. } => {
                "Check your network connection and that the FPL site is reachable, then try again"
            }
            TransferError::AuthenticationError { .. } => {
                "Verify the login and password in [auth]; the account may also need a browser login first"
            }
            TransferError::ConfigError { .. }
            | TransferError::MissingConfigError { .. }
            | TransferError::InvalidConfigValueError { .. }
            | TransferError::ConfigValidationError { .. } => {
                "Fix the configuration file or the command line arguments"
            }
            TransferError::ValidationError { .. } => {
                "Review the transfers: players, prices, chips and gameweek"
            }
            TransferError::PlayerNotFound { .. } => {
                "Check the player id against bootstrap-static, or give the prices explicitly"
            }
            TransferError::TransferRejected { .. } => {
                "Read the server reason; the deadline may have passed or the squad rules were broken"
            }
            TransferError::SerializationError(_) => "The server returned data in an unexpected shape",
            TransferError::IoError(_) => "Check file permissions and that the config path exists",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TransferError::ApiError(e) if e.is_timeout() => {
                "The FPL site did not answer in time".to_string()
            }
            TransferError::ApiError(_) => "Could not talk to the FPL site".to_string(),
            TransferError::AuthenticationError { reason } => format!("Login failed: {}", reason),
            TransferError::TransferRejected { reason } => {
                format!("Transfer was rejected: {}", reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
