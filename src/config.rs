//! Credentials and endpoint configuration.
//!
//! Both can be read from a single URL of the form
//! `http[s]://{key}:{secret}@{host}[:{port}]/apps/{app_id}`, either passed
//! directly or taken from the `PUSHER_URL` environment variable.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "api.pusherapp.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);
pub const URL_ENV_VAR: &str = "PUSHER_URL";

/// Identifies the target application. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

/// Where and how requests are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: Option<u16>,
    pub encrypted: bool,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: None,
            encrypted: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn scheme(&self) -> &'static str {
        if self.encrypted {
            "https"
        } else {
            "http"
        }
    }

    /// `scheme://host[:port]`, no trailing slash.
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme(), self.host, port),
            None => format!("{}://{}", self.scheme(), self.host),
        }
    }

    /// Parse `http[s]://key:secret@host[:port]/apps/{app_id}`.
    ///
    /// Key and secret are percent-decoded. Any query string is ignored.
    pub fn from_url(url: &str) -> Result<(Credentials, Config), ConfigError> {
        let invalid = |msg: &str| ConfigError::InvalidUrl(format!("{} in {:?}", msg, url));

        let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
        let encrypted = match parsed.scheme() {
            "http" => false,
            "https" => true,
            _ => return Err(invalid("scheme must be http or https")),
        };

        if parsed.username().is_empty() {
            return Err(invalid("missing key"));
        }
        let secret = parsed
            .password()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| invalid("missing secret"))?;
        let key = urlencoding::decode(parsed.username())
            .map_err(|_| invalid("key is not valid UTF-8"))?;
        let secret = urlencoding::decode(secret).map_err(|_| invalid("secret is not valid UTF-8"))?;

        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| invalid("empty host"))?;

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let app_id = match segments.as_slice() {
            ["apps", id] => *id,
            _ => return Err(invalid("path must be /apps/{app_id}")),
        };

        let credentials = Credentials::new(app_id, key.into_owned(), secret.into_owned());
        let config = Config {
            host: host.to_string(),
            port: parsed.port(),
            encrypted,
            ..Config::default()
        };
        Ok((credentials, config))
    }

    /// Read the URL from `PUSHER_URL`.
    pub fn from_env() -> Result<(Credentials, Config), ConfigError> {
        let url = std::env::var(URL_ENV_VAR).map_err(|_| ConfigError::MissingEnv(URL_ENV_VAR))?;
        Self::from_url(&url)
    }
}
