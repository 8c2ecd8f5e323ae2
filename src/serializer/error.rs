//! Error type for payload serialization.

use std::error::Error;
use std::fmt;

/// Error raised when the active strategy cannot render a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializationError {
    /// A map key could not be represented as a JSON object key.
    KeyMustBeString,
    /// NaN and infinities have no JSON encoding.
    NonFiniteNumber(f64),
    /// Nesting exceeded the depth limit (usually a self-referential graph).
    DepthLimitExceeded(usize),
    /// A map of unknown length (e.g. a `#[serde(flatten)]` struct) under a
    /// renaming policy; its struct fields cannot be told apart from map keys.
    UnsizedMap,
    /// Raised by the value's own `Serialize` implementation.
    Custom(String),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::KeyMustBeString => write!(f, "map key must be a string"),
            SerializationError::NonFiniteNumber(n) => {
                write!(f, "{} is not a valid JSON number", n)
            }
            SerializationError::DepthLimitExceeded(limit) => {
                write!(f, "payload nesting exceeds {} levels", limit)
            }
            SerializationError::UnsizedMap => write!(
                f,
                "maps of unknown length (#[serde(flatten)]) cannot be renamed; use FieldNamingPolicy::Identity"
            ),
            SerializationError::Custom(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

impl Error for SerializationError {}

impl serde::ser::Error for SerializationError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        SerializationError::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::Custom(err.to_string())
    }
}
