use std::fmt;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{mpsc, watch, Mutex as AsyncMutex};
use tracing::trace;

use crate::event::MessageEvent;

/// Delivery phase of one endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PortPhase {
    Created,
    Started,
    Closed,
}

/// A pair of entangled ports. Whatever is posted on `port1` can be
/// received on `port2` and vice versa.
pub struct MessageChannel {
    pub port1: MessagePort,
    pub port2: MessagePort,
}

impl MessageChannel {
    pub fn new() -> Self {
        let (to_port2, from_port1) = mpsc::unbounded_channel();
        let (to_port1, from_port2) = mpsc::unbounded_channel();
        Self {
            port1: MessagePort::build(to_port2, from_port2),
            port2: MessagePort::build(to_port1, from_port1),
        }
    }
}

impl Default for MessageChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// One endpoint of a [`MessageChannel`].
///
/// All operations take `&self`, so an endpoint can sit behind an `Arc`
/// inside the component that owns it. Posting never blocks; receiving is
/// gated on [`MessagePort::start`]. Ownership of a port moves when it is
/// placed in a transfer list, which neuters it for the sender.
pub struct MessagePort {
    phase: watch::Sender<PortPhase>,
    outbound: Mutex<Option<mpsc::UnboundedSender<MessageEvent>>>,
    inbound: AsyncMutex<mpsc::UnboundedReceiver<MessageEvent>>,
}

impl MessagePort {
    fn build(
        outbound: mpsc::UnboundedSender<MessageEvent>,
        inbound: mpsc::UnboundedReceiver<MessageEvent>,
    ) -> Self {
        let (phase, _) = watch::channel(PortPhase::Created);
        Self {
            phase,
            outbound: Mutex::new(Some(outbound)),
            inbound: AsyncMutex::new(inbound),
        }
    }

    /// Posts a payload to the peer endpoint.
    ///
    /// A post on a closed endpoint, or toward a peer that is gone, is
    /// silently discarded. That mirrors how ports behave in the wild and
    /// keeps teardown free of error plumbing.
    pub fn post_message(&self, data: Value) {
        self.post_message_with_ports(data, Vec::new());
    }

    /// Posts a payload together with a transfer list of ports.
    pub fn post_message_with_ports(&self, data: Value, ports: Vec<MessagePort>) {
        let guard = self.outbound.lock();
        match guard.as_ref() {
            Some(tx) => {
                if tx.send(MessageEvent::with_ports(data, ports)).is_err() {
                    trace!("peer endpoint gone, message discarded");
                }
            }
            None => trace!("endpoint closed, message discarded"),
        }
    }

    /// Enables delivery on this endpoint. Messages posted by the peer
    /// before `start` are buffered and handed out afterwards in send
    /// order. Starting twice, or after `close`, is a no-op.
    pub fn start(&self) {
        self.phase.send_if_modified(|phase| {
            if *phase == PortPhase::Created {
                *phase = PortPhase::Started;
                true
            } else {
                false
            }
        });
    }

    /// Closes this endpoint. Pending and future [`MessagePort::recv`]
    /// calls resolve to `None`, later posts from either side are
    /// discarded, and anything still buffered is dropped.
    pub fn close(&self) {
        self.outbound.lock().take();
        self.phase.send_if_modified(|phase| {
            if *phase == PortPhase::Closed {
                false
            } else {
                *phase = PortPhase::Closed;
                true
            }
        });
    }

    /// Waits for the next message on this endpoint.
    ///
    /// Suspends until the endpoint has been started and a message is
    /// available. Resolves to `None` once this endpoint is closed, or
    /// once the peer endpoint is gone and the buffer has drained.
    pub async fn recv(&self) -> Option<MessageEvent> {
        let mut phase_rx = self.phase.subscribe();
        loop {
            let current = *phase_rx.borrow_and_update();
            match current {
                PortPhase::Started => break,
                PortPhase::Closed => return None,
                PortPhase::Created => {
                    if phase_rx.changed().await.is_err() {
                        return None;
                    }
                }
            }
        }

        let mut inbound = self.inbound.lock().await;
        loop {
            tokio::select! {
                event = inbound.recv() => return event,
                changed = phase_rx.changed() => {
                    if changed.is_err() || *phase_rx.borrow_and_update() == PortPhase::Closed {
                        return None;
                    }
                }
            }
        }
    }
}

impl fmt::Debug for MessagePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagePort")
            .field("phase", &*self.phase.borrow())
            .finish()
    }
}
