//! CLI-specific error types and exit code mapping

use qualgate_admission::QualifyError;
use qualgate_core::error::{ImageError, QualgateError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure, including an invalid domain.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The admission chain rejected the request.
    #[error("admission rejected: {0}")]
    Rejected(String),

    /// JSON (de)serialisation failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from qualgate-core.
    #[error("{0}")]
    Core(#[from] QualgateError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | General / command error                  |
    /// | 2    | Configuration error (incl. bad domain)   |
    /// | 5    | Admission rejected                       |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Rejected(_) => 5,
            Self::Io(_) => 10,
            Self::Core(core) => match core {
                QualgateError::Config(_) => 2,
                QualgateError::Image(ImageError::InvalidDomain { .. }) => 2,
                QualgateError::Admission(_) => 5,
                QualgateError::Io(_) => 10,
                _ => 1,
            },
            Self::Json(_) | Self::Command(_) => 1,
        }
    }
}

impl From<QualifyError> for CliError {
    fn from(e: QualifyError) -> Self {
        match e {
            QualifyError::InvalidDomain { .. } | QualifyError::Config { .. } => {
                Self::Config(e.to_string())
            }
            QualifyError::QualificationFailure { .. } | QualifyError::ObjectTypeMismatch { .. } => {
                Self::Command(e.to_string())
            }
        }
    }
}
