use serde_json::Value;

use crate::channel::MessagePort;

/// A delivered message: the payload plus any ports transferred with it.
///
/// Transferred ports are moved, not copied. Taking a port out of the
/// transfer list makes the receiver its sole owner, matching the
/// neutering behavior of a real port transfer.
#[derive(Debug)]
pub struct MessageEvent {
    pub data: Value,
    pub ports: Vec<MessagePort>,
}

impl MessageEvent {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            ports: Vec::new(),
        }
    }

    pub fn with_ports(data: Value, ports: Vec<MessagePort>) -> Self {
        Self { data, ports }
    }

    /// Payload as a string slice when the payload is a JSON string.
    pub fn text(&self) -> Option<&str> {
        self.data.as_str()
    }
}
