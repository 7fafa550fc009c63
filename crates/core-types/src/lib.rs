#![allow(dead_code)]

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the devdock crates.
#[derive(Debug, Error, Clone)]
pub enum DockError {
    #[error("{message}")]
    Message { message: String },
}

impl DockError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PanelId(pub String);

impl PanelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ToolboxId(pub String);

impl ToolboxId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BlueprintId(pub String);

impl BlueprintId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Document load phase of a panel, mirroring document readiness plus the
/// terminal teardown state. Ordering follows the lifecycle: a panel only
/// ever moves toward later variants.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ReadyState {
    Uninitialized,
    Interactive,
    Complete,
    Destroyed,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyState::Uninitialized => "uninitialized",
            ReadyState::Interactive => "interactive",
            ReadyState::Complete => "complete",
            ReadyState::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to the inspected target a toolbox is attached to.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Debuggee {
    pub target: TargetId,
    pub url: String,
}

impl Debuggee {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            target: TargetId::new(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_only_orders_forward() {
        assert!(ReadyState::Uninitialized < ReadyState::Interactive);
        assert!(ReadyState::Interactive < ReadyState::Complete);
        assert!(ReadyState::Complete < ReadyState::Destroyed);
    }

    #[test]
    fn ready_state_renders_protocol_strings() {
        assert_eq!(ReadyState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(ReadyState::Interactive.to_string(), "interactive");
        assert_eq!(ReadyState::Complete.to_string(), "complete");
        assert_eq!(ReadyState::Destroyed.to_string(), "destroyed");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(PanelId::new(), PanelId::new());
        assert_ne!(TargetId::new(), TargetId::new());
    }

    #[test]
    fn debuggee_carries_target_and_url() {
        let debuggee = Debuggee::new("about:blank");
        assert_eq!(debuggee.url, "about:blank");
        assert!(!debuggee.target.0.is_empty());
    }
}
