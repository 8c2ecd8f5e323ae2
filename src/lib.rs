//! Client for triggering events on the Pusher REST API.
//!
//! ```text
//!   trigger(channel, event, &data)
//!        │
//!        ├─ validate channel / event / socket id
//!        ├─ SerializationStrategy::render(&data)  ──► JSON body
//!        ├─ build_request  ──► POST /apps/{id}/channels/{channel}/events?name={event}
//!        └─ Transport::execute(request)  ──► HttpResponse
//! ```
//!
//! The transport is injected: [`ReqwestTransport`] (feature `http`, on by
//! default) talks to the network, [`RecordingTransport`] keeps requests in
//! memory for inspection.

mod config;
mod error;
mod pusher;
mod validation;

pub mod serializer;
pub mod transport;

pub use config::{Config, Credentials, DEFAULT_HOST, DEFAULT_TIMEOUT, URL_ENV_VAR};
pub use error::{ConfigError, TriggerError};
pub use pusher::Pusher;
pub use serializer::{
    FieldNamingPolicy, RawPayload, SerializationError, SerializationStrategy, MAX_DEPTH,
};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, RecordingTransport, Transport, TransportError,
};
pub use validation::{MAX_CHANNEL_LENGTH, MAX_EVENT_LENGTH};
