//! The open toolbox: panel registry, chrome document, teardown.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use devdock_core_types::{Debuggee, PanelId, ReadyState, ToolboxId};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::blueprint::{PanelBlueprint, SetupContext};
use crate::chrome::ToolboxDocument;
use crate::events::{ToolboxEvent, ToolboxEventBus};
use crate::metrics;
use crate::panel::Panel;
use crate::panel_doc::{spawn_document_runtime, DocumentRuntime};

pub struct Toolbox {
    id: ToolboxId,
    debuggee: Debuggee,
    panels: DashMap<PanelId, Arc<Panel>>,
    order: RwLock<Vec<PanelId>>,
    runtimes: Mutex<HashMap<PanelId, DocumentRuntime>>,
    document: RwLock<ToolboxDocument>,
    current: RwLock<Option<PanelId>>,
    events: ToolboxEventBus,
}

impl fmt::Debug for Toolbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolbox")
            .field("id", &self.id)
            .field("debuggee", &self.debuggee)
            .field("panels", &self.panels.len())
            .finish_non_exhaustive()
    }
}

impl Toolbox {
    pub(crate) fn new(debuggee: Debuggee, events: ToolboxEventBus) -> Arc<Self> {
        Arc::new(Self {
            id: ToolboxId::new(),
            debuggee,
            panels: DashMap::new(),
            order: RwLock::new(Vec::new()),
            runtimes: Mutex::new(HashMap::new()),
            document: RwLock::new(ToolboxDocument::new()),
            current: RwLock::new(None),
            events,
        })
    }

    pub fn id(&self) -> &ToolboxId {
        &self.id
    }

    pub fn debuggee(&self) -> &Debuggee {
        &self.debuggee
    }

    /// Read access to the chrome document.
    pub fn document(&self) -> RwLockReadGuard<'_, ToolboxDocument> {
        self.document.read()
    }

    pub fn current_panel(&self) -> Option<Arc<Panel>> {
        let current = self.current.read().clone();
        current.and_then(|id| self.panels.get(&id).map(|p| Arc::clone(p.value())))
    }

    pub fn panel_for_slot(&self, slot: &str) -> Option<Arc<Panel>> {
        self.panels
            .iter()
            .find(|entry| entry.value().slot() == slot)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Panels in creation order.
    pub fn panels(&self) -> Vec<Arc<Panel>> {
        self.order
            .read()
            .iter()
            .filter_map(|id| self.panels.get(id).map(|p| Arc::clone(p.value())))
            .collect()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Creates the panel for one slot: uninitialized state, debuggee set,
    /// setup hook run, chrome rendered, document runtime spawned.
    pub(crate) fn install_panel(&self, slot: &str, blueprint: &PanelBlueprint) -> Arc<Panel> {
        let (window_tx, window_rx) = mpsc::unbounded_channel();
        let panel = Panel::new(blueprint, slot, window_tx, self.events.clone());

        panel.set_debuggee(self.debuggee.clone());
        let ctx = SetupContext {
            debuggee: self.debuggee.clone(),
        };
        panel.hooks().setup(&panel, &ctx);

        self.document
            .write()
            .render_panel(panel.id(), panel.label(), panel.tooltip());
        self.panels.insert(panel.id().clone(), Arc::clone(&panel));
        self.order.write().push(panel.id().clone());

        let runtime = spawn_document_runtime(Arc::clone(&panel), blueprint.body(), window_rx);
        self.runtimes.lock().insert(panel.id().clone(), runtime);

        metrics::set_panel_count(self.panels.len());
        let _ = self.events.send(ToolboxEvent::PanelCreated {
            toolbox: self.id.clone(),
            panel: panel.id().clone(),
            slot: slot.to_string(),
        });
        panel
    }

    pub(crate) fn focus(&self, panel: &Arc<Panel>) {
        *self.current.write() = Some(panel.id().clone());
        self.document.write().select_tab(panel.id());
    }

    /// Tears every panel down in creation order and empties the chrome.
    /// Lifecycle waits on a panel that never loaded resolve through the
    /// `destroyed` transition instead of hanging.
    pub(crate) async fn close(&self) {
        let order: Vec<PanelId> = self.order.read().clone();
        for panel_id in order {
            let runtime = self.runtimes.lock().remove(&panel_id);
            if let Some(runtime) = runtime {
                runtime.shutdown.cancel();
                if let Err(err) = runtime.task.await {
                    warn!(?err, "panel document task ended abnormally");
                }
            }
            let panel = self.panels.get(&panel_id).map(|p| Arc::clone(p.value()));
            if let Some(panel) = panel {
                self.destroy_panel(&panel);
            }
        }

        self.panels.clear();
        self.order.write().clear();
        *self.current.write() = None;
        self.document.write().clear();
        metrics::set_panel_count(0);

        let _ = self.events.send(ToolboxEvent::ToolboxClosed {
            toolbox: self.id.clone(),
        });
        info!(toolbox = %self.id.0, "toolbox closed");
    }

    fn destroy_panel(&self, panel: &Arc<Panel>) {
        if !panel.dispose_once() {
            return;
        }
        panel.hooks().dispose(panel);
        panel.clear_debuggee();
        panel.clear_port();
        panel.advance(ReadyState::Destroyed);
        self.document.write().remove_panel(panel.id());
        metrics::record_panel_destroyed();
        let _ = self.events.send(ToolboxEvent::PanelDisposed {
            panel: panel.id().clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast;

    use super::*;

    fn test_toolbox() -> Arc<Toolbox> {
        let (events, _) = broadcast::channel(32);
        Toolbox::new(Debuggee::new("about:blank"), events)
    }

    #[tokio::test]
    async fn install_renders_chrome_and_sets_up_panel() {
        let toolbox = test_toolbox();
        let blueprint = PanelBlueprint::builder("My Panel")
            .tooltip("My new panel!")
            .build();

        let panel = toolbox.install_panel("my_panel", &blueprint);
        assert_eq!(panel.ready_state(), ReadyState::Uninitialized);
        assert!(panel.debuggee().is_some());
        assert_eq!(toolbox.panel_count(), 1);

        let doc = toolbox.document();
        assert_eq!(doc.query_all_by_attr("value", "My Panel").len(), 1);
        assert_eq!(doc.query_all_by_attr("tooltiptext", "My new panel!").len(), 1);
        drop(doc);

        toolbox.close().await;
    }

    #[tokio::test]
    async fn close_disposes_in_creation_order() {
        let toolbox = test_toolbox();
        let disposed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        for label in ["First", "Second"] {
            let disposed = Arc::clone(&disposed);
            let blueprint = PanelBlueprint::builder(label)
                .on_dispose(move |panel| disposed.lock().push(panel.label().to_string()))
                .build();
            toolbox.install_panel(&label.to_lowercase(), &blueprint);
        }

        let panels = toolbox.panels();
        toolbox.close().await;

        assert_eq!(*disposed.lock(), vec!["First".to_string(), "Second".to_string()]);
        for panel in panels {
            assert_eq!(panel.ready_state(), ReadyState::Destroyed);
            assert!(panel.debuggee().is_none());
        }
        assert_eq!(toolbox.panel_count(), 0);
        assert_eq!(toolbox.document().node_count(), 0);
    }
}
