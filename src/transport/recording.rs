use std::sync::{Arc, Mutex};

use super::{HttpRequest, HttpResponse, Transport, TransportError};

/// Transport that keeps every request instead of sending it.
///
/// Requests land in a shared buffer so a test can hand one clone to the
/// client and inspect another. Every call answers with the same canned
/// response (`200 {}` unless configured otherwise).
#[derive(Clone)]
pub struct RecordingTransport {
    buffer: Arc<Mutex<Vec<HttpRequest>>>,
    response: HttpResponse,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    pub fn new() -> Self {
        RecordingTransport {
            buffer: Arc::new(Mutex::new(Vec::new())),
            response: HttpResponse::new(200, "{}"),
        }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<HttpRequest>>>) -> Self {
        RecordingTransport {
            buffer,
            response: HttpResponse::new(200, "{}"),
        }
    }

    /// Answer every request with `response`. Uses builder pattern.
    pub fn respond_with(mut self, response: HttpResponse) -> Self {
        self.response = response;
        self
    }

    /// Snapshot of the requests seen so far.
    pub fn requests(&self) -> Result<Vec<HttpRequest>, TransportError> {
        let buffer = self.buffer.lock().map_err(|_| TransportError::Poisoned)?;
        Ok(buffer.clone())
    }

    pub fn len(&self) -> Result<usize, TransportError> {
        let buffer = self.buffer.lock().map_err(|_| TransportError::Poisoned)?;
        Ok(buffer.len())
    }

    pub fn is_empty(&self) -> Result<bool, TransportError> {
        Ok(self.len()? == 0)
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut buffer = self.buffer.lock().map_err(|_| TransportError::Poisoned)?;
        buffer.push(request);
        Ok(self.response.clone())
    }
}
