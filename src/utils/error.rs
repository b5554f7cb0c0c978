use thiserror::Error;

#[derive(Error, Debug)]
pub enum UfcError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "Unclassified case: direct={direct}, 10 ml={filtrate_10ml}, 100 ml={filtrate_100ml}"
    )]
    UnclassifiedCase {
        direct: String,
        filtrate_10ml: String,
        filtrate_100ml: String,
    },

    #[error("Type {sample}: {source}")]
    SampleError {
        sample: String,
        #[source]
        source: Box<UfcError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Rules,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl UfcError {
    pub fn validation(message: impl Into<String>) -> Self {
        UfcError::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        UfcError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            UfcError::ValidationError { .. } | UfcError::InvalidValueError { .. } => {
                ErrorCategory::Input
            }
            UfcError::UnclassifiedCase { .. } => ErrorCategory::Rules,
            UfcError::SampleError { source, .. } => source.category(),
            UfcError::ConfigError { .. } | UfcError::TomlError(_) | UfcError::CsvError(_) => {
                ErrorCategory::Configuration
            }
            UfcError::IoError(_) | UfcError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Rules => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            UfcError::ValidationError { .. } | UfcError::InvalidValueError { .. } => {
                "Counts must be non-negative numbers; mark unusable channels as interfered instead of entering negative values"
            }
            UfcError::UnclassifiedCase { .. } => {
                "This combination of counts is not covered by the interpretation rules; review the plate readings manually"
            }
            UfcError::SampleError { source, .. } => source.recovery_suggestion(),
            UfcError::ConfigError { .. } => "Check the command line options and input file path",
            UfcError::TomlError(_) => "Check the batch file for TOML syntax errors",
            UfcError::CsvError(_) => {
                "The CSV header must be: type,direct,filtrate_10ml,filtrate_100ml"
            }
            UfcError::IoError(_) => "Check that the file exists and is readable/writable",
            UfcError::SerializationError(_) => "Retry with another output format",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            UfcError::UnclassifiedCase { .. } => {
                "The readings do not match any interpretation rule".to_string()
            }
            UfcError::SampleError { sample, source } => {
                format!("Type {}: {}", sample, source.user_friendly_message())
            }
            UfcError::InvalidValueError { field, value, .. } => {
                format!("Invalid value '{}' for {}", value, field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UfcError>;
