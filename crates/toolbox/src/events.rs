use devdock_core_types::{PanelId, ReadyState, ToolboxId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Lifecycle event bus handed to observers.
pub type ToolboxEventBus = broadcast::Sender<ToolboxEvent>;

/// Events emitted by the host to observers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ToolboxEvent {
    ToolboxOpened {
        toolbox: ToolboxId,
    },
    PanelCreated {
        toolbox: ToolboxId,
        panel: PanelId,
        slot: String,
    },
    PanelStateChanged {
        panel: PanelId,
        from: ReadyState,
        to: ReadyState,
    },
    PanelDisposed {
        panel: PanelId,
    },
    ToolboxClosed {
        toolbox: ToolboxId,
    },
}
