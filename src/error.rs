use std::error::Error;
use std::fmt;

use crate::serializer::SerializationError;
use crate::transport::TransportError;

/// Error returned by [`Pusher::trigger`](crate::Pusher::trigger).
#[derive(Debug)]
pub enum TriggerError {
    /// Channel name is empty, too long or uses characters outside `[-a-zA-Z0-9_=@,.;]`.
    InvalidChannel(String),
    /// Event name is empty or too long.
    InvalidEvent(String),
    /// Socket id is not of the form `123.456`.
    InvalidSocketId(String),
    /// The configured host/port do not form a valid base URL.
    InvalidEndpoint(String),
    /// The payload could not be serialized.
    Serialization(SerializationError),
    /// The request could not be delivered, or was refused.
    Transport(TransportError),
}

impl fmt::Display for TriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerError::InvalidChannel(name) => write!(f, "invalid channel name: {:?}", name),
            TriggerError::InvalidEvent(name) => write!(f, "invalid event name: {:?}", name),
            TriggerError::InvalidSocketId(id) => write!(f, "invalid socket id: {:?}", id),
            TriggerError::InvalidEndpoint(msg) => write!(f, "invalid endpoint: {}", msg),
            TriggerError::Serialization(e) => write!(f, "serialization error: {}", e),
            TriggerError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl Error for TriggerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TriggerError::Serialization(e) => Some(e),
            TriggerError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SerializationError> for TriggerError {
    fn from(err: SerializationError) -> Self {
        TriggerError::Serialization(err)
    }
}

impl From<TransportError> for TriggerError {
    fn from(err: TransportError) -> Self {
        TriggerError::Transport(err)
    }
}

/// Error building a client from a URL or the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidUrl(String),
    MissingEnv(&'static str),
    /// The HTTP client could not be constructed.
    Client(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidUrl(msg) => write!(f, "invalid pusher url: {}", msg),
            ConfigError::MissingEnv(var) => write!(f, "environment variable {} is not set", var),
            ConfigError::Client(msg) => write!(f, "could not build http client: {}", msg),
        }
    }
}

impl Error for ConfigError {}
