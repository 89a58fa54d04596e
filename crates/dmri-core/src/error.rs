//! Error types for diffusion MRI utility operations.
//!
//! Degenerate numeric inputs (zero denominators, constant arrays, zero
//! noise) are not errors; they produce documented sentinel values. The
//! variants below cover usage errors and I/O failures only.

use thiserror::Error;

/// Errors that can occur in the utility layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DmriError {
    /// Normalization method name is not recognized.
    #[error("Unknown normalization method: {method}")]
    UnsupportedMethod {
        /// The method name that was requested
        method: String,
    },

    /// Array shapes are incompatible.
    ///
    /// Raised when an operand cannot be broadcast onto the shape of the
    /// primary array.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape
        expected: String,
        /// Actual shape
        actual: String,
    },

    /// A reduction was requested over zero elements.
    #[error("Empty input to {operation}")]
    EmptyInput {
        /// Name of the operation that received no data
        operation: String,
    },

    /// A parameter is outside its valid domain.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the violated constraint
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("I/O error at {path}: {reason}")]
    Io {
        /// Path involved in the failed operation
        path: String,
        /// Underlying error message
        reason: String,
    },

    /// Configuration text could not be parsed.
    #[error("Configuration parse error at line {line}: {reason}")]
    ConfigParse {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Requested section does not exist.
    #[error("No section: '{section}'")]
    MissingSection {
        /// Section name
        section: String,
    },

    /// Requested option does not exist in the section or the defaults.
    #[error("No option '{option}' in section: '{section}'")]
    MissingOption {
        /// Section name
        section: String,
        /// Option name
        option: String,
    },

    /// Option value could not be converted to the requested type.
    #[error("Invalid value for [{section}] {option} = '{value}': {reason}")]
    InvalidValue {
        /// Section name
        section: String,
        /// Option name
        option: String,
        /// Raw value
        value: String,
        /// Why the conversion failed
        reason: String,
    },

    /// Value interpolation failed.
    #[error("Interpolation error in [{section}] {option}: {reason}")]
    Interpolation {
        /// Section name
        section: String,
        /// Option name
        option: String,
        /// Description of the failure
        reason: String,
    },
}

impl DmriError {
    /// Create an UnsupportedMethod error.
    pub fn unsupported_method<S: Into<String>>(method: S) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an EmptyInput error for the named operation.
    pub fn empty_input<S: Into<String>>(operation: S) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S: Into<String>>(reason: S) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Create an Io error from a path and an underlying error.
    pub fn io<P, E>(path: P, err: E) -> Self
    where
        P: AsRef<std::path::Path>,
        E: std::fmt::Display,
    {
        Self::Io {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Create a ConfigParse error.
    pub fn config_parse<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::ConfigParse {
            line,
            reason: reason.into(),
        }
    }

    /// Create a MissingSection error.
    pub fn missing_section<S: Into<String>>(section: S) -> Self {
        Self::MissingSection {
            section: section.into(),
        }
    }

    /// Create a MissingOption error.
    pub fn missing_option<S1: Into<String>, S2: Into<String>>(section: S1, option: S2) -> Self {
        Self::MissingOption {
            section: section.into(),
            option: option.into(),
        }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value<S1, S2, S3, S4>(section: S1, option: S2, value: S3, reason: S4) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self::InvalidValue {
            section: section.into(),
            option: option.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Interpolation error.
    pub fn interpolation<S1, S2, S3>(section: S1, option: S2, reason: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::Interpolation {
            section: section.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for utility operations.
pub type Result<T> = std::result::Result<T, DmriError>;
