//! The developer-tools host: tool registration and the toolbox slot.

use std::sync::Arc;

use async_trait::async_trait;
use devdock_core_types::{Debuggee, DockError};
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::blueprint::PanelBlueprint;
use crate::config::HostConfig;
use crate::errors::ToolboxError;
use crate::events::{ToolboxEvent, ToolboxEventBus};
use crate::metrics;
use crate::tool::Tool;
use crate::toolbox::Toolbox;

/// The host surface a devtools driver talks to.
#[async_trait]
pub trait DevTools: Send + Sync {
    /// Registers a tool's panel slots. A slot name taken by an earlier
    /// registration is rejected.
    fn register_tool(&self, tool: Tool) -> Result<(), DockError>;

    /// Opens the toolbox against the configured target, instantiating
    /// every registered panel and focusing the one built from `focus`.
    /// At most one toolbox is open at a time.
    async fn open_toolbox(&self, focus: &PanelBlueprint) -> Result<Arc<Toolbox>, DockError>;

    /// Closes the open toolbox, suspending until every panel has been
    /// torn down.
    async fn close_toolbox(&self) -> Result<(), DockError>;
}

pub struct DevToolsHost {
    pub events: ToolboxEventBus,
    config: HostConfig,
    slots: RwLock<Vec<(String, PanelBlueprint)>>,
    toolbox: Mutex<Option<Arc<Toolbox>>>,
}

impl DevToolsHost {
    pub fn new(config: HostConfig) -> Arc<Self> {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Arc::new(Self {
            events,
            config,
            slots: RwLock::new(Vec::new()),
            toolbox: Mutex::new(None),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToolboxEvent> {
        self.events.subscribe()
    }

    /// The open toolbox, if any.
    pub fn toolbox(&self) -> Option<Arc<Toolbox>> {
        self.toolbox.lock().clone()
    }

    pub fn registered_slots(&self) -> Vec<String> {
        self.slots.read().iter().map(|(slot, _)| slot.clone()).collect()
    }
}

#[async_trait]
impl DevTools for DevToolsHost {
    fn register_tool(&self, tool: Tool) -> Result<(), DockError> {
        let mut slots = self.slots.write();
        for (slot, _) in tool.panels() {
            if slots.iter().any(|(existing, _)| existing == slot) {
                return Err(ToolboxError::DuplicateSlot.into_dock_error(format!("slot {}", slot)));
            }
        }
        for (slot, blueprint) in tool.panels() {
            slots.push((slot.clone(), blueprint.clone()));
        }
        debug!(tool = tool.name(), panels = tool.panels().len(), "tool registered");
        Ok(())
    }

    async fn open_toolbox(&self, focus: &PanelBlueprint) -> Result<Arc<Toolbox>, DockError> {
        let mut slot = self.toolbox.lock();
        if let Some(open) = slot.as_ref() {
            return Err(
                ToolboxError::AlreadyOpen.into_dock_error(format!("toolbox {}", open.id().0))
            );
        }

        let registered = self.slots.read().clone();
        if !registered.iter().any(|(_, bp)| bp.id() == focus.id()) {
            return Err(
                ToolboxError::UnknownPanel.into_dock_error(format!("blueprint {}", focus.id().0))
            );
        }

        let debuggee = Debuggee::new(&self.config.target_url);
        let toolbox = Toolbox::new(debuggee, self.events.clone());
        let mut focused = None;
        for (slot_name, blueprint) in &registered {
            let panel = toolbox.install_panel(slot_name, blueprint);
            if blueprint.id() == focus.id() {
                focused = Some(panel);
            }
        }
        if let Some(panel) = &focused {
            toolbox.focus(panel);
        }

        metrics::record_toolbox_opened();
        let _ = self.events.send(ToolboxEvent::ToolboxOpened {
            toolbox: toolbox.id().clone(),
        });
        info!(
            toolbox = %toolbox.id().0,
            panels = toolbox.panel_count(),
            target = %toolbox.debuggee().url,
            "toolbox opened"
        );

        *slot = Some(Arc::clone(&toolbox));
        Ok(toolbox)
    }

    async fn close_toolbox(&self) -> Result<(), DockError> {
        let toolbox = self
            .toolbox
            .lock()
            .take()
            .ok_or_else(|| ToolboxError::NotOpen.into_dock_error("nothing to close"))?;
        info!(toolbox = %toolbox.id().0, "closing toolbox");
        toolbox.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_requires_a_registered_panel() {
        let host = DevToolsHost::new(HostConfig::default());
        let unregistered = PanelBlueprint::builder("Nowhere").build();
        let err = host.open_toolbox(&unregistered).await.unwrap_err();
        assert!(err.to_string().starts_with("panel not registered"));
    }

    #[tokio::test]
    async fn only_one_toolbox_at_a_time() {
        let host = DevToolsHost::new(HostConfig::default());
        let blueprint = PanelBlueprint::builder("My Panel").build();
        let tool = Tool::builder("my_tool")
            .panel("my_panel", blueprint.clone())
            .build()
            .expect("tool");
        host.register_tool(tool).expect("registration");

        host.open_toolbox(&blueprint).await.expect("first open");
        let second = host.open_toolbox(&blueprint).await.unwrap_err();
        assert!(second.to_string().starts_with("toolbox already open"));

        host.close_toolbox().await.expect("close");
        assert!(host.toolbox().is_none());
    }

    #[tokio::test]
    async fn close_without_open_errors() {
        let host = DevToolsHost::new(HostConfig::default());
        assert!(host.close_toolbox().await.is_err());
    }

    #[tokio::test]
    async fn slot_names_are_exclusive_across_tools() {
        let host = DevToolsHost::new(HostConfig::default());
        let first = Tool::builder("first")
            .panel("shared", PanelBlueprint::builder("A").build())
            .build()
            .expect("first tool");
        let second = Tool::builder("second")
            .panel("shared", PanelBlueprint::builder("B").build())
            .build()
            .expect("second tool");

        host.register_tool(first).expect("first registration");
        let err = host.register_tool(second).unwrap_err();
        assert!(err.to_string().contains("slot shared"));
    }
}
