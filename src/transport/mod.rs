//! HTTP transport abstraction.
//!
//! The client never talks to the network itself: it builds an
//! [`HttpRequest`] and hands it to whatever [`Transport`] it was given.
//!
//! ```text
//!   Pusher::trigger ──► build_request ──► Transport::execute
//!                                              │
//!                      ┌───────────────────────┴──────────────┐
//!                      ▼                                      ▼
//!            ReqwestTransport (feature `http`)       RecordingTransport
//!               real network I/O                   keeps requests in memory
//! ```

mod error;
#[cfg(feature = "http")]
mod http;
mod recording;
mod request;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::ReqwestTransport;
pub use recording::RecordingTransport;
pub use request::{HttpMethod, HttpRequest, HttpResponse};

/// Submits one request and returns what came back.
///
/// Implementations report network failures as errors but return non-2xx
/// responses as ordinary responses; the caller decides what a bad status
/// means.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
