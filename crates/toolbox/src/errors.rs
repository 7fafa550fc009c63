#![allow(dead_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolboxError {
    #[error("toolbox already open")]
    AlreadyOpen,
    #[error("no toolbox open")]
    NotOpen,
    #[error("panel not registered")]
    UnknownPanel,
    #[error("panel slot already taken")]
    DuplicateSlot,
    #[error("panel destroyed")]
    PanelDestroyed,
    #[error("internal error")]
    Internal,
}

impl ToolboxError {
    pub fn into_dock_error(self, detail: impl Into<String>) -> devdock_core_types::DockError {
        let message = format!("{}: {}", self, detail.into());
        devdock_core_types::DockError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_error_carries_detail() {
        let err = ToolboxError::UnknownPanel.into_dock_error("slot my_panel");
        assert_eq!(err.to_string(), "panel not registered: slot my_panel");
    }
}
