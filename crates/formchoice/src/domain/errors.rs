//! Domain-specific errors.

use std::fmt;

use thiserror::Error;

/// Which renderer value was being computed when evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Display,
    Id,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Display => f.write_str("display"),
            ValueKind::Id => f.write_str("id"),
        }
    }
}

/// Failure raised by a property accessor while applying a path to an object.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("invalid property path '{0}'")]
    InvalidPath(String),
    #[error("no property '{segment}' on {target}")]
    UnknownProperty { segment: String, target: String },
    #[error("cannot read '{segment}' from a {kind} value")]
    NotTraversable { segment: String, kind: &'static str },
    #[error("failed to serialize object for property access")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by choice rendering and submission handling.
#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("error getting {kind} value of: {object} for property: {expression}")]
    Evaluation {
        kind: ValueKind,
        object: String,
        expression: String,
        #[source]
        source: AccessError,
    },
    #[error("no-selection value '{value}' collides with the id of choice {index}")]
    SentinelCollision { value: String, index: usize },
    #[error("no-selection value must not be empty")]
    EmptySentinel,
    #[error("a selection is required for '{component}'")]
    Required { component: String },
    #[error("failed to render option markup")]
    Markup(#[from] minijinja::Error),
}
