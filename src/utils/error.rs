use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Target file not found: {path}")]
    TargetNotFound { path: String },

    #[error("Invalid pattern in patch '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("No patch matched in {path}")]
    NoPatternMatched { path: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Io,
    Pattern,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // warning only
            ErrorSeverity::Medium => 2,   // nothing to patch
            ErrorSeverity::High => 1,     // bad input
            ErrorSeverity::Critical => 3, // filesystem
        }
    }
}

impl PatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatchError::IoError(_)
            | PatchError::SerializationError(_)
            | PatchError::TargetNotFound { .. } => ErrorCategory::Io,
            PatchError::InvalidPattern { .. } | PatchError::NoPatternMatched { .. } => {
                ErrorCategory::Pattern
            }
            PatchError::ConfigValidationError { .. }
            | PatchError::InvalidConfigValueError { .. }
            | PatchError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PatchError::NoPatternMatched { .. } => ErrorSeverity::Medium,
            PatchError::IoError(_) | PatchError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PatchError::TargetNotFound { .. } => {
                "Run from the project root or pass --root / --target pointing at the page file"
            }
            PatchError::IoError(_) => "Check that the target file is readable and writable",
            PatchError::SerializationError(_) => "Report output could not be encoded; retry without --json",
            PatchError::InvalidPattern { .. } => "Fix the regular expression in the patch set file",
            PatchError::NoPatternMatched { .. } => {
                "The file may already be patched; drop --strict to accept a no-op run"
            }
            PatchError::ConfigValidationError { .. }
            | PatchError::InvalidConfigValueError { .. }
            | PatchError::MissingConfigError { .. } => "Review the command line arguments and the patch set TOML",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PatchError::TargetNotFound { path } => format!("Cannot find file to patch: {}", path),
            PatchError::NoPatternMatched { path } => {
                format!("None of the patches matched anything in {}", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
