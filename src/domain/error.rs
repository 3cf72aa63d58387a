use thiserror::Error;

use crate::io::IoError;

/// Rejected rule policy from the config file or command line.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config value `{key}` must not be empty")]
    EmptyValue { key: &'static str },

    #[error("config value `frameworks[{index}]` must not be blank")]
    BlankFramework { index: usize },
}

/// First violation found while walking the registration sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Registered field is absent from the report.
    #[error("Missing {field}")]
    MissingField { field: String },

    /// Field value has the wrong JSON shape.
    #[error("{field} should be {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Field value has the right shape but breaks a content rule.
    #[error("{field} is invalid; {message}")]
    FormatViolation { field: String, message: String },

    /// Rule could not be compiled from its configuration.
    #[error("rule for {field} is unusable: {message}")]
    InvalidRule { field: String, message: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::FormatViolation { field, .. }
            | Self::InvalidRule { field, .. } => field,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::FormatViolation { .. } => "format_violation",
            Self::InvalidRule { .. } => "invalid_rule",
        }
    }
}

/// Errors produced by the `check` command boundary.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Report or config file could not be located, read or parsed.
    #[error(transparent)]
    Input(#[from] IoError),

    /// Rule policy was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report failed a field rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Progress output could not be written.
    #[error("failed to write progress output: {0}")]
    Output(#[source] std::io::Error),
}

impl CheckError {
    /// Exit code and machine-readable error label for this failure.
    pub fn exit_code_and_kind(&self) -> (i32, &'static str) {
        match self {
            Self::Input(_) | Self::Config(_) => (3, "input_usage_error"),
            Self::Validation(ValidationError::InvalidRule { .. }) | Self::Output(_) => {
                (1, "internal_error")
            }
            Self::Validation(_) => (2, "validation_error"),
        }
    }
}
