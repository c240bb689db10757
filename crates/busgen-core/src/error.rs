//! Error types for the generation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// An annotation target expression that does not name an existing node
///
/// Every variant carries the literal expression given by the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("annotation target `{expression}`: no interface {interface}")]
    NoInterface {
        expression: String,
        interface: String,
    },

    #[error("annotation target `{expression}`: no method {method} on interface {interface}")]
    NoMethod {
        expression: String,
        interface: String,
        method: String,
    },

    #[error("annotation target `{expression}`: no signal {signal} on interface {interface}")]
    NoSignal {
        expression: String,
        interface: String,
        signal: String,
    },

    #[error("annotation target `{expression}`: no property {property} on interface {interface}")]
    NoProperty {
        expression: String,
        interface: String,
        property: String,
    },

    #[error(
        "annotation target `{expression}`: no arg {arg} on method {method} on interface {interface}"
    )]
    NoMethodArg {
        expression: String,
        interface: String,
        method: String,
        arg: String,
    },

    #[error(
        "annotation target `{expression}`: no arg {arg} on signal {signal} on interface {interface}"
    )]
    NoSignalArg {
        expression: String,
        interface: String,
        signal: String,
        arg: String,
    },
}

impl ResolveError {
    /// The target expression that failed to resolve
    pub fn expression(&self) -> &str {
        match self {
            ResolveError::NoInterface { expression, .. }
            | ResolveError::NoMethod { expression, .. }
            | ResolveError::NoSignal { expression, .. }
            | ResolveError::NoProperty { expression, .. }
            | ResolveError::NoMethodArg { expression, .. }
            | ResolveError::NoSignalArg { expression, .. } => expression,
        }
    }
}

/// Error type for the generation pipeline
#[derive(Error, Debug)]
pub enum CodegenError {
    /// An interface description could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An interface description is malformed
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// An annotation target did not resolve
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A generated artifact could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An emitter failed for a reason other than I/O
    #[error("{emitter} emitter failed: {message}")]
    Emit { emitter: String, message: String },

    /// The pipeline was driven out of order
    #[error("invalid pipeline stage: expected {expected}, got {actual}")]
    InvalidStage { expected: String, actual: String },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl CodegenError {
    /// Whether this error stems from the interface descriptions themselves
    pub fn is_input_error(&self) -> bool {
        matches!(self, CodegenError::Read { .. } | CodegenError::Parse { .. })
    }

    /// Whether this error happened while writing artifacts
    pub fn is_emission_error(&self) -> bool {
        matches!(self, CodegenError::Write { .. } | CodegenError::Emit { .. })
    }
}

impl From<toml::de::Error> for CodegenError {
    fn from(err: toml::de::Error) -> Self {
        CodegenError::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
