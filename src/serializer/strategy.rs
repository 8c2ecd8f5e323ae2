use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::error::SerializationError;
use super::naming::FieldNamingPolicy;
use super::value::to_json;

/// Type-erased payload handed to an override closure.
///
/// It implements `serde::Serialize`, so the closure can feed it to any serde
/// format it likes, or ignore it.
pub type RawPayload<'a> = dyn erased_serde::Serialize + 'a;

/// Closure that replaces serialization entirely.
pub type SerializeOverride = Arc<dyn Fn(&RawPayload<'_>) -> String + Send + Sync>;

/// The single active way a client turns payloads into request bodies.
///
/// Replacing the strategy swaps it wholesale; policies never stack.
#[derive(Clone)]
pub enum SerializationStrategy {
    /// Walk the payload with serde, renaming struct fields with the policy.
    Fields(FieldNamingPolicy),
    /// Hand the payload to a caller closure and send whatever it returns.
    ///
    /// The output is not validated; producing JSON is the caller's job.
    Override(SerializeOverride),
}

impl Default for SerializationStrategy {
    fn default() -> Self {
        SerializationStrategy::Fields(FieldNamingPolicy::Identity)
    }
}

impl SerializationStrategy {
    pub fn with_policy(policy: FieldNamingPolicy) -> Self {
        SerializationStrategy::Fields(policy)
    }

    pub fn with_override<F>(render: F) -> Self
    where
        F: Fn(&RawPayload<'_>) -> String + Send + Sync + 'static,
    {
        SerializationStrategy::Override(Arc::new(render))
    }

    /// Render `data` with the active strategy. `data` is only borrowed.
    pub fn render<T>(&self, data: &T) -> Result<String, SerializationError>
    where
        T: Serialize,
    {
        match self {
            SerializationStrategy::Fields(policy) => to_json(data, policy),
            SerializationStrategy::Override(render) => Ok(render(data as &RawPayload<'_>)),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, SerializationStrategy::Override(_))
    }
}

impl fmt::Debug for SerializationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationStrategy::Fields(policy) => f.debug_tuple("Fields").field(policy).finish(),
            SerializationStrategy::Override(_) => write!(f, "Override(..)"),
        }
    }
}
