//! Trigger integration tests.
//!
//! Most tests swap the HTTP client for a `RecordingTransport` and assert on
//! the request that would have been sent.

mod support;
mod serialisation;

#[cfg(feature = "http")]
mod http;
