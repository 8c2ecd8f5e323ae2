//! End-to-end tests over real HTTP.
//!
//! Starts an axum server on a background runtime and triggers against it
//! with the blocking reqwest transport.

use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use pusher_rest::{Config, Credentials, Pusher, TransportError, TriggerError};
use serde_json::json;
use tokio::runtime::Runtime;

use crate::support::{init_logging, MyPojo, KEY, SECRET};

#[derive(Clone, Debug)]
struct Received {
    app_id: String,
    channel: String,
    query: HashMap<String, String>,
    content_type: Option<String>,
    body: String,
}

type Inbox = Arc<Mutex<Vec<Received>>>;

async fn events_handler(
    State(inbox): State<Inbox>,
    Path((app_id, channel)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    if app_id == "broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string());
    }
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    inbox.lock().unwrap().push(Received {
        app_id,
        channel,
        query,
        content_type,
        body,
    });
    (StatusCode::OK, "{}".to_string())
}

/// Bind to port 0 and return the runtime (keep it alive) and the port.
fn start_server(inbox: Inbox) -> (Runtime, u16) {
    let runtime = Runtime::new().unwrap();
    let app = Router::new()
        .route("/apps/:app_id/channels/:channel/events", post(events_handler))
        .with_state(inbox);
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    runtime.spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (runtime, port)
}

fn local_pusher(app_id: &str, port: u16) -> Pusher {
    let config = Config {
        host: "127.0.0.1".into(),
        port: Some(port),
        ..Config::default()
    };
    Pusher::with_config(Credentials::new(app_id, KEY, SECRET), config).unwrap()
}

#[test]
fn trigger_reaches_server() {
    init_logging();
    let inbox = Inbox::default();
    let (_runtime, port) = start_server(inbox.clone());
    let pusher = local_pusher("00001", port);

    let response = pusher
        .trigger("my-channel", "my event", &MyPojo::default())
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "{}");

    let received = inbox.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].app_id, "00001");
    assert_eq!(received[0].channel, "my-channel");
    assert_eq!(received[0].query.get("name").map(String::as_str), Some("my event"));
    assert_eq!(received[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(received[0].body, r#"{"aString":"value","aNumber":42}"#);
}

#[test]
fn exclusive_trigger_sends_socket_id() {
    init_logging();
    let inbox = Inbox::default();
    let (_runtime, port) = start_server(inbox.clone());
    let pusher = local_pusher("00001", port);

    pusher
        .trigger_exclusive("my-channel", "event", &json!({ "k": "v" }), "99.1")
        .unwrap();

    let received = inbox.lock().unwrap().clone();
    assert_eq!(received[0].query.get("socket_id").map(String::as_str), Some("99.1"));
    assert_eq!(received[0].body, r#"{"k":"v"}"#);
}

#[test]
fn server_error_is_reported() {
    init_logging();
    let inbox = Inbox::default();
    let (_runtime, port) = start_server(inbox.clone());
    let pusher = local_pusher("broken", port);

    let err = pusher.trigger("my-channel", "event", &1).unwrap_err();

    match err {
        TriggerError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(inbox.lock().unwrap().is_empty());
}

#[test]
fn unreachable_host_is_a_connection_error() {
    init_logging();
    // Grab a free port, then release it so nothing is listening.
    let port = {
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let pusher = local_pusher("00001", port);

    let err = pusher.trigger("my-channel", "event", &1).unwrap_err();

    assert!(matches!(
        err,
        TriggerError::Transport(TransportError::Connection(_))
    ));
}
