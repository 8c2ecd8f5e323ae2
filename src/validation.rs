//! Name checks applied before a request is built.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::TriggerError;

pub const MAX_CHANNEL_LENGTH: usize = 164;
pub const MAX_EVENT_LENGTH: usize = 200;

fn channel_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[-a-zA-Z0-9_=@,.;]+$").expect("valid channel regex"))
}

fn socket_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("valid socket id regex"))
}

pub fn validate_channel(channel: &str) -> Result<(), TriggerError> {
    if channel.len() > MAX_CHANNEL_LENGTH || !channel_pattern().is_match(channel) {
        return Err(TriggerError::InvalidChannel(channel.to_string()));
    }
    Ok(())
}

pub fn validate_event(event: &str) -> Result<(), TriggerError> {
    if event.is_empty() || event.len() > MAX_EVENT_LENGTH {
        return Err(TriggerError::InvalidEvent(event.to_string()));
    }
    Ok(())
}

pub fn validate_socket_id(socket_id: &str) -> Result<(), TriggerError> {
    if !socket_id_pattern().is_match(socket_id) {
        return Err(TriggerError::InvalidSocketId(socket_id.to_string()));
    }
    Ok(())
}
