//! Payload serialization.
//!
//! A client holds exactly one [`SerializationStrategy`]:
//!
//! - `Fields(policy)` walks any `serde::Serialize` value into compact JSON,
//!   renaming struct fields with a [`FieldNamingPolicy`] and keeping
//!   declaration/insertion order.
//! - `Override(closure)` hands the raw value to the caller as a type-erased
//!   [`RawPayload`] and sends back whatever string it returns, valid JSON or
//!   not. Borrowed payloads work with either strategy.
//!
//! ```ignore
//! use pusher_rest::{FieldNamingPolicy, SerializationStrategy};
//!
//! let strategy = SerializationStrategy::with_policy(FieldNamingPolicy::LowerCaseWithDashes);
//! let body = strategy.render(&my_payload)?;
//! ```

mod error;
mod naming;
mod strategy;
mod value;

pub use error::SerializationError;
pub use naming::FieldNamingPolicy;
pub use strategy::{RawPayload, SerializationStrategy, SerializeOverride};
pub use value::{to_json, to_value, MAX_DEPTH};
