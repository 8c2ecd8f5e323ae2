//! The client: validates names, serializes the payload, builds one request
//! and hands it to the transport.
//!
//! ## Example
//!
//! ```ignore
//! use pusher_rest::{FieldNamingPolicy, Pusher};
//!
//! let mut pusher = Pusher::new("00001", "157a2f3df564323a4a73", "3457a88be87f890dcd98")?;
//! pusher.set_naming_policy(FieldNamingPolicy::LowerCaseWithDashes);
//! pusher.trigger("my-channel", "my-event", &order)?;
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use url::Url;

use crate::config::{Config, Credentials};
use crate::error::TriggerError;
use crate::serializer::{FieldNamingPolicy, RawPayload, SerializationStrategy};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::validation::{validate_channel, validate_event, validate_socket_id};

#[cfg(feature = "http")]
use crate::error::ConfigError;
#[cfg(feature = "http")]
use crate::transport::ReqwestTransport;

/// Client for the REST trigger endpoint.
///
/// Configuration (`set_*` / `with_*`) needs `&mut self` or ownership, so it
/// cannot race with `trigger`, which only borrows. Configure first, then
/// share the client (e.g. in an `Arc`) between threads.
#[derive(Clone)]
pub struct Pusher {
    credentials: Credentials,
    config: Config,
    strategy: SerializationStrategy,
    transport: Arc<dyn Transport>,
}

impl Pusher {
    /// Client for the default host using the blocking reqwest transport.
    #[cfg(feature = "http")]
    pub fn new(
        app_id: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::with_config(Credentials::new(app_id, key, secret), Config::default())
    }

    #[cfg(feature = "http")]
    pub fn with_config(credentials: Credentials, config: Config) -> Result<Self, ConfigError> {
        let transport =
            ReqwestTransport::new(config.timeout).map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self::with_transport(credentials, config, transport))
    }

    /// Client from `http[s]://key:secret@host[:port]/apps/{app_id}`.
    #[cfg(feature = "http")]
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let (credentials, config) = Config::from_url(url)?;
        Self::with_config(credentials, config)
    }

    /// Client from the `PUSHER_URL` environment variable.
    #[cfg(feature = "http")]
    pub fn from_env() -> Result<Self, ConfigError> {
        let (credentials, config) = Config::from_env()?;
        Self::with_config(credentials, config)
    }

    /// Client with an explicit transport (tests, custom HTTP stacks).
    pub fn with_transport<T>(credentials: Credentials, config: Config, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            credentials,
            config,
            strategy: SerializationStrategy::default(),
            transport: Arc::new(transport),
        }
    }

    // Builder-style configuration

    pub fn with_strategy(mut self, strategy: SerializationStrategy) -> Self {
        self.set_strategy(strategy);
        self
    }

    pub fn with_naming_policy(mut self, policy: FieldNamingPolicy) -> Self {
        self.set_naming_policy(policy);
        self
    }

    pub fn with_serializer_override<F>(mut self, render: F) -> Self
    where
        F: Fn(&RawPayload<'_>) -> String + Send + Sync + 'static,
    {
        self.set_serializer_override(render);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.set_host(host);
        self
    }

    pub fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.set_encrypted(encrypted);
        self
    }

    // Setters. Each replaces whatever was configured before.

    pub fn set_transport<T>(&mut self, transport: T)
    where
        T: Transport + 'static,
    {
        self.transport = Arc::new(transport);
    }

    pub fn set_strategy(&mut self, strategy: SerializationStrategy) {
        self.strategy = strategy;
    }

    /// Serialize struct fields through `policy`.
    pub fn set_naming_policy(&mut self, policy: FieldNamingPolicy) {
        self.strategy = SerializationStrategy::Fields(policy);
    }

    /// Replace serialization with `render`; its output is sent unchecked.
    pub fn set_serializer_override<F>(&mut self, render: F)
    where
        F: Fn(&RawPayload<'_>) -> String + Send + Sync + 'static,
    {
        self.strategy = SerializationStrategy::with_override(render);
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.config.host = host.into();
    }

    pub fn set_port(&mut self, port: Option<u16>) {
        self.config.port = port;
    }

    pub fn set_encrypted(&mut self, encrypted: bool) {
        self.config.encrypted = encrypted;
    }

    // Getters

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy(&self) -> &SerializationStrategy {
        &self.strategy
    }

    /// Build the request `trigger` would send, without sending it.
    ///
    /// `POST {base}/apps/{app_id}/channels/{channel}/events?name={event}[&socket_id={id}]`
    /// with the serialized payload as the body, unwrapped.
    pub fn build_request<T>(
        &self,
        channel: &str,
        event: &str,
        data: &T,
        socket_id: Option<&str>,
    ) -> Result<HttpRequest, TriggerError>
    where
        T: Serialize,
    {
        validate_channel(channel)?;
        validate_event(event)?;
        if let Some(socket_id) = socket_id {
            validate_socket_id(socket_id)?;
        }

        let body = self.strategy.render(data)?;

        let base = self.config.base_url();
        let mut url = Url::parse(&base)
            .map_err(|e| TriggerError::InvalidEndpoint(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| TriggerError::InvalidEndpoint(base.clone()))?
            .clear()
            .extend(["apps", self.credentials.app_id(), "channels", channel, "events"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("name", event);
            if let Some(socket_id) = socket_id {
                query.append_pair("socket_id", socket_id);
            }
        }

        Ok(HttpRequest::post(url, body).with_header("Content-Type", "application/json"))
    }

    /// Trigger `event` on `channel` with `data` as the payload.
    ///
    /// Sends exactly one request. A non-2xx answer is returned as
    /// `TransportError::Status`; nothing is retried.
    pub fn trigger<T>(&self, channel: &str, event: &str, data: &T) -> Result<HttpResponse, TriggerError>
    where
        T: Serialize,
    {
        let request = self.build_request(channel, event, data, None)?;
        self.send(request)
    }

    /// Like [`trigger`](Self::trigger), but the connection identified by
    /// `socket_id` does not receive the event.
    pub fn trigger_exclusive<T>(
        &self,
        channel: &str,
        event: &str,
        data: &T,
        socket_id: &str,
    ) -> Result<HttpResponse, TriggerError>
    where
        T: Serialize,
    {
        let request = self.build_request(channel, event, data, Some(socket_id))?;
        self.send(request)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TriggerError> {
        debug!(
            "{} {} ({} byte body)",
            request.method,
            request.url,
            request.body.len()
        );

        let response = self.transport.execute(request).map_err(|e| {
            warn!("trigger failed: {}", e);
            e
        })?;

        if !response.is_success() {
            warn!("trigger rejected with status {}", response.status);
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }
        Ok(response)
    }
}

impl fmt::Debug for Pusher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pusher")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
