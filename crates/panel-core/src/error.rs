// File: crates/panel-core/src/error.rs
// Summary: Error type shared by unit conversion, layout, configuration and panel building.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    /// Unrecognized dimension, direction or position name, or an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("unexpected field '{0}'")]
    UnexpectedField(String),

    #[error("invalid value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("cannot override non-existent key: {0}")]
    UnknownKey(String),

    #[error("invalid override format: {0}")]
    InvalidOverrideFormat(String),

    #[error("cannot modify read-only config: '{0}'")]
    ImmutableViolation(String),

    #[error("object has no attribute '{0}'")]
    AttributeNotFound(String),

    #[error("{0} is not available before the panel has been built")]
    NotYetBuilt(&'static str),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl PanelError {
    pub(crate) fn invalid_value(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T, E = PanelError> = std::result::Result<T, E>;
