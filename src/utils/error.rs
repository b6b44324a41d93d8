use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Staging directory not found: {path}")]
    StagingNotFound { path: String },

    #[error("Failed to copy '{from}' to '{to}': {source}")]
    CopyError {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    FileSystem,
    Serialization,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OrganizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OrganizerError::IoError(_)
            | OrganizerError::DirectoryNotFound { .. }
            | OrganizerError::StagingNotFound { .. }
            | OrganizerError::CopyError { .. } => ErrorCategory::FileSystem,
            OrganizerError::SerializationError(_) => ErrorCategory::Serialization,
            OrganizerError::ConfigError { .. }
            | OrganizerError::ConfigValidationError { .. }
            | OrganizerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            OrganizerError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 暫存目錄不存在：通常是下載尚未完成，重跑即可
            OrganizerError::StagingNotFound { .. } => ErrorSeverity::Medium,
            OrganizerError::SerializationError(_) | OrganizerError::ProcessingError { .. } => {
                ErrorSeverity::High
            }
            OrganizerError::ConfigError { .. }
            | OrganizerError::ConfigValidationError { .. }
            | OrganizerError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            OrganizerError::IoError(_)
            | OrganizerError::DirectoryNotFound { .. }
            | OrganizerError::CopyError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::FileSystem => match self {
                OrganizerError::StagingNotFound { .. } => {
                    "Make sure the content was downloaded into temp<identifier> under the base directory"
                }
                _ => "Check that the directories exist and that you have read/write permission",
            },
            ErrorCategory::Serialization => "Check that the manifest data is valid JSON",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::Processing => "Inspect the logs with --verbose for more details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OrganizerError::StagingNotFound { path } => {
                format!("Nothing to organize: staging directory '{}' does not exist", path)
            }
            OrganizerError::DirectoryNotFound { path } => {
                format!("Directory '{}' does not exist", path)
            }
            OrganizerError::CopyError { from, to, .. } => {
                format!("Could not copy '{}' to '{}'", from, to)
            }
            other => match other.category() {
                ErrorCategory::Configuration => format!("Invalid configuration: {}", other),
                _ => other.to_string(),
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.severity().exit_code()
    }
}

impl ErrorSeverity {
    /// CLI 結束碼；批次執行時先取最嚴重的等級再轉換
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
