//! Host configuration.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostConfig {
    /// URL of the inspected target the toolbox attaches to.
    #[serde(default = "default_target_url")]
    pub target_url: String,
    /// Capacity of the lifecycle event bus.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_target_url() -> String {
    "about:blank".to_string()
}

fn default_event_capacity() -> usize {
    64
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            event_capacity: default_event_capacity(),
        }
    }
}
