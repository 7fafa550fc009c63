//! Live panel instances.
//!
//! A [`Panel`] is created by the toolbox for every registered slot when it
//! opens. Its ready state only ever moves forward through
//! `uninitialized → interactive → complete → destroyed`; anything waiting
//! on a state it already passed resolves immediately with the state the
//! panel actually reached, so teardown never strands a waiter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use devdock_core_types::{BlueprintId, Debuggee, DockError, PanelId, ReadyState};
use devdock_messaging::{MessageEvent, MessagePort};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::blueprint::{PanelBlueprint, PanelHooks};
use crate::errors::ToolboxError;
use crate::events::{ToolboxEvent, ToolboxEventBus};
use crate::metrics;
use crate::panel_doc::PanelDocument;

pub struct Panel {
    id: PanelId,
    slot: String,
    label: String,
    tooltip: String,
    blueprint: BlueprintId,
    state: watch::Sender<ReadyState>,
    debuggee: Mutex<Option<Debuggee>>,
    port: Mutex<Option<Arc<MessagePort>>>,
    document: Arc<PanelDocument>,
    window_tx: mpsc::UnboundedSender<MessageEvent>,
    hooks: Arc<dyn PanelHooks>,
    disposed: AtomicBool,
    events: ToolboxEventBus,
}

impl Panel {
    pub(crate) fn new(
        blueprint: &PanelBlueprint,
        slot: &str,
        window_tx: mpsc::UnboundedSender<MessageEvent>,
        events: ToolboxEventBus,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(ReadyState::Uninitialized);
        Arc::new(Self {
            id: PanelId::new(),
            slot: slot.to_string(),
            label: blueprint.label().to_string(),
            tooltip: blueprint.tooltip().to_string(),
            blueprint: blueprint.id().clone(),
            state,
            debuggee: Mutex::new(None),
            port: Mutex::new(None),
            document: PanelDocument::new(),
            window_tx,
            hooks: blueprint.hooks(),
            disposed: AtomicBool::new(false),
            events,
        })
    }

    pub fn id(&self) -> &PanelId {
        &self.id
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Whether this panel was instantiated from the given definition.
    pub fn is_instance_of(&self, blueprint: &PanelBlueprint) -> bool {
        &self.blueprint == blueprint.id()
    }

    pub fn document(&self) -> Arc<PanelDocument> {
        Arc::clone(&self.document)
    }

    pub fn ready_state(&self) -> ReadyState {
        *self.state.borrow()
    }

    pub fn debuggee(&self) -> Option<Debuggee> {
        self.debuggee.lock().clone()
    }

    pub(crate) fn set_debuggee(&self, debuggee: Debuggee) {
        *self.debuggee.lock() = Some(debuggee);
    }

    pub(crate) fn clear_debuggee(&self) {
        self.debuggee.lock().take();
    }

    /// Stores the host-side endpoint of a panel conversation so teardown
    /// can release it with the panel.
    pub fn adopt_port(&self, port: MessagePort) {
        *self.port.lock() = Some(Arc::new(port));
    }

    pub fn port(&self) -> Option<Arc<MessagePort>> {
        self.port.lock().clone()
    }

    pub(crate) fn clear_port(&self) {
        self.port.lock().take();
    }

    pub(crate) fn hooks(&self) -> Arc<dyn PanelHooks> {
        Arc::clone(&self.hooks)
    }

    /// First caller wins; teardown runs the dispose hook only once.
    pub(crate) fn dispose_once(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }

    /// Posts a message at the embedded document's window.
    pub fn post_message(&self, data: Value, transfer: Vec<MessagePort>) -> Result<(), DockError> {
        if self.ready_state() == ReadyState::Destroyed {
            return Err(ToolboxError::PanelDestroyed.into_dock_error(format!("panel {}", self.id.0)));
        }
        self.window_tx
            .send(MessageEvent::with_ports(data, transfer))
            .map_err(|_| ToolboxError::PanelDestroyed.into_dock_error(format!("panel {}", self.id.0)))?;
        metrics::record_window_message();
        Ok(())
    }

    /// Waits until the panel document is interactive and returns the
    /// state actually reached. Immediate when the panel is already past
    /// `interactive`, including a panel that was torn down first.
    pub async fn ready(&self) -> ReadyState {
        self.wait_for(ReadyState::Interactive).await
    }

    /// Waits until the panel document has fully loaded. Same resolution
    /// rules as [`Panel::ready`].
    pub async fn loaded(&self) -> ReadyState {
        self.wait_for(ReadyState::Complete).await
    }

    async fn wait_for(&self, target: ReadyState) -> ReadyState {
        let mut rx = self.state.subscribe();
        loop {
            let current = *rx.borrow_and_update();
            if current >= target {
                return current;
            }
            if rx.changed().await.is_err() {
                return *rx.borrow();
            }
        }
    }

    /// Forward-only transition. Returns whether the state moved.
    pub(crate) fn advance(&self, next: ReadyState) -> bool {
        let mut previous = None;
        let changed = self.state.send_if_modified(|state| {
            if next > *state {
                previous = Some(*state);
                *state = next;
                true
            } else {
                false
            }
        });
        if let (true, Some(from)) = (changed, previous) {
            debug!(panel = %self.id.0, from = %from, to = %next, "panel state advanced");
            let _ = self.events.send(ToolboxEvent::PanelStateChanged {
                panel: self.id.clone(),
                from,
                to: next,
            });
        }
        changed
    }
}
