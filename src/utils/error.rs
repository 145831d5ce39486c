use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to decode document '{document}': {message}")]
    DecodeError { document: String, message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Parsing '{document}' timed out after {seconds}s")]
    TimeoutError { document: String, seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Document,
    Io,
    Output,
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

impl EtlError {
    pub fn decode(document: impl Into<String>, message: impl ToString) -> Self {
        Self::DecodeError {
            document: document.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DecodeError { .. } | Self::TimeoutError { .. } => ErrorCategory::Document,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ZipError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一文件失敗不影響其他文件
            ErrorCategory::Document => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DecodeError { .. } => {
                "Check that the file is a valid, unencrypted PDF report card"
            }
            Self::TimeoutError { .. } => "Increase --document-timeout-secs or retry the document",
            Self::IoError(_) => "Check that the input files exist and the output path is writable",
            Self::ZipError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                "Check free disk space and permissions of the output path"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the command line arguments or TOML file",
            Self::ProcessingError { .. } => {
                "Make sure the selected files are report cards with a course table"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DecodeError { document, .. } => format!("Could not read '{}'", document),
            Self::TimeoutError { document, .. } => format!("'{}' took too long to parse", document),
            Self::ProcessingError { message } => message.clone(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing setting '{}'", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
