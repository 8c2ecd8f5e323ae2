//! Error type for transport operations.

use std::error::Error;
use std::fmt;

/// Failure delivering a request to the REST endpoint.
#[derive(Debug)]
pub enum TransportError {
    /// Could not reach the endpoint.
    Connection(String),
    /// The endpoint did not answer in time.
    Timeout,
    /// The endpoint answered with a non-2xx status.
    Status { status: u16, body: String },
    /// A shared buffer lock was poisoned.
    Poisoned,
    /// Other error
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connection(msg) => write!(f, "connection failed: {}", msg),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Status { status, body } => {
                write!(f, "unexpected status {}: {}", status, body)
            }
            TransportError::Poisoned => write!(f, "transport buffer poisoned"),
            TransportError::Other(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransportError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
