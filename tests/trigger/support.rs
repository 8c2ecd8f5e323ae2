//! Shared fixtures for trigger tests.

use pusher_rest::{Config, Credentials, Pusher, RecordingTransport};
use serde::Serialize;

pub const APP_ID: &str = "00001";
pub const KEY: &str = "157a2f3df564323a4a73";
pub const SECRET: &str = "3457a88be87f890dcd98";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn credentials() -> Credentials {
    Credentials::new(APP_ID, KEY, SECRET)
}

/// A client wired to a recording transport, plus a handle on that transport.
pub fn recording_pusher() -> (Pusher, RecordingTransport) {
    init_logging();
    let transport = RecordingTransport::new();
    let pusher = Pusher::with_transport(credentials(), Config::default(), transport.clone());
    (pusher, transport)
}

/// Body of the single request the transport saw.
pub fn data_field(transport: &RecordingTransport) -> String {
    let requests = transport.requests().unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].body.clone()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPojo {
    pub a_string: String,
    pub a_number: i32,
}

impl Default for MyPojo {
    fn default() -> Self {
        Self {
            a_string: "value".to_string(),
            a_number: 42,
        }
    }
}
