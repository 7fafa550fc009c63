//! Embedded panel documents and their runtime.
//!
//! Every open panel gets a [`PanelDocument`] plus a background task that
//! plays the document's life: run the inline body, report `interactive`,
//! then `complete`, then serve window messages until the toolbox shuts
//! the panel down.

use std::future::Future;
use std::sync::Arc;

use devdock_core_types::ReadyState;
use devdock_messaging::MessageEvent;
use futures::future::BoxFuture;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::blueprint::DocumentBody;
use crate::panel::Panel;

/// Async handler for messages posted at the document's window.
pub type WindowMessageHandler = Arc<dyn Fn(MessageEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// The embedded document of one panel.
pub struct PanelDocument {
    inner_html: RwLock<String>,
    window_handler: Mutex<Option<WindowMessageHandler>>,
}

impl PanelDocument {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            inner_html: RwLock::new(String::new()),
            window_handler: Mutex::new(None),
        })
    }

    pub fn inner_html(&self) -> String {
        self.inner_html.read().clone()
    }

    pub fn set_inner_html(&self, html: impl Into<String>) {
        *self.inner_html.write() = html.into();
    }

    /// Registers the window-message handler, replacing any previous one.
    pub fn on_window_message<F, Fut>(&self, handler: F)
    where
        F: Fn(MessageEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        *self.window_handler.lock() = Some(Arc::new(move |event| Box::pin(handler(event))));
    }

    fn handler(&self) -> Option<WindowMessageHandler> {
        self.window_handler.lock().clone()
    }
}

/// Handle to one panel's running document task.
pub(crate) struct DocumentRuntime {
    pub shutdown: CancellationToken,
    pub task: JoinHandle<()>,
}

/// Spawns the document task for a freshly created panel.
///
/// Messages posted at the window before the body has registered a handler
/// stay buffered in `window_rx`, so a handler registered during the body
/// still sees them in arrival order.
pub(crate) fn spawn_document_runtime(
    panel: Arc<Panel>,
    body: DocumentBody,
    mut window_rx: mpsc::UnboundedReceiver<MessageEvent>,
) -> DocumentRuntime {
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    let task = tokio::spawn(async move {
        let doc = panel.document();
        tokio::select! {
            _ = token.cancelled() => return,
            _ = body(Arc::clone(&doc)) => {}
        }
        panel.advance(ReadyState::Interactive);

        // Window for the rest of the document load.
        tokio::task::yield_now().await;
        if token.is_cancelled() {
            return;
        }
        panel.advance(ReadyState::Complete);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                maybe = window_rx.recv() => {
                    match maybe {
                        Some(event) => dispatch(&doc, event, &token).await,
                        None => break,
                    }
                }
            }
        }
    });
    DocumentRuntime { shutdown, task }
}

async fn dispatch(doc: &Arc<PanelDocument>, event: MessageEvent, token: &CancellationToken) {
    match doc.handler() {
        Some(handler) => {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = handler(event) => {}
            }
        }
        None => trace!("window message without a listener, dropped"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn inner_html_round_trips() {
        let doc = PanelDocument::new();
        assert_eq!(doc.inner_html(), "");
        doc.set_inner_html("hello world");
        assert_eq!(doc.inner_html(), "hello world");
    }

    #[tokio::test]
    async fn latest_window_handler_wins() {
        let doc = PanelDocument::new();
        doc.on_window_message(|_event| async {});
        doc.on_window_message(|event| async move {
            assert_eq!(event.text(), Some("expected"));
        });

        let handler = doc.handler().expect("registered handler");
        handler(MessageEvent::new(json!("expected"))).await;
    }
}
