//! Demo scenarios driven by the CLI and the end-to-end tests.

use anyhow::{Context, Result};
use devdock_core_types::ReadyState;
use devdock_messaging::MessageChannel;
use devdock_toolbox::{DevTools, DevToolsHost, HostConfig, PanelBlueprint, Tool, ToolboxEvent};
use serde_json::json;
use tracing::info;

/// Outcome of the lifecycle demo: the states the panel walked through,
/// taken from the lifecycle event stream.
#[derive(Debug)]
pub struct LifecycleReport {
    pub panel_id: String,
    pub states: Vec<ReadyState>,
    pub chrome_nodes: usize,
}

/// Opens a toolbox around a single demo panel, waits through the load
/// states and closes it again.
pub async fn run_lifecycle(config: &HostConfig) -> Result<LifecycleReport> {
    let blueprint = PanelBlueprint::builder("demo panel")
        .tooltip("devdock demo panel")
        .document_body(|doc| async move {
            doc.set_inner_html("demo panel loaded");
        })
        .build();
    let tool = Tool::builder("demo")
        .panel("demo_panel", blueprint.clone())
        .build()?;

    let host = DevToolsHost::new(config.clone());
    host.register_tool(tool)?;
    let mut events = host.subscribe();

    let toolbox = host.open_toolbox(&blueprint).await?;
    let panel = toolbox.current_panel().context("no current panel")?;

    panel.ready().await;
    panel.loaded().await;
    let chrome_nodes = toolbox.document().node_count();

    host.close_toolbox().await?;

    let mut states = Vec::new();
    loop {
        match events.recv().await? {
            ToolboxEvent::PanelStateChanged { from, to, .. } => {
                if states.is_empty() {
                    states.push(from);
                }
                states.push(to);
            }
            ToolboxEvent::ToolboxClosed { .. } => break,
            _ => {}
        }
    }

    info!(panel = %panel.id().0, ?states, "lifecycle demo finished");
    Ok(LifecycleReport {
        panel_id: panel.id().0.clone(),
        states,
        chrome_nodes,
    })
}

/// Outcome of the handshake demo: what the panel document sent us.
#[derive(Debug)]
pub struct HandshakeReport {
    pub messages: Vec<String>,
}

/// Runs the connect/ping/pong/bye conversation against a panel document.
pub async fn run_handshake(config: &HostConfig) -> Result<HandshakeReport> {
    let blueprint = PanelBlueprint::builder("communication")
        .tooltip("devdock handshake demo")
        .document_body(|doc| async move {
            doc.on_window_message(|mut event| async move {
                if event.text() != Some("connect") || event.ports.is_empty() {
                    return;
                }
                let port = event.ports.remove(0);
                port.start();
                port.post_message(json!("ping"));
                while let Some(reply) = port.recv().await {
                    if reply.text() == Some("pong") {
                        port.post_message(json!("bye"));
                        port.close();
                        break;
                    }
                }
            });
        })
        .build();
    let tool = Tool::builder("demo")
        .panel("handshake_panel", blueprint.clone())
        .build()?;

    let host = DevToolsHost::new(config.clone());
    host.register_tool(tool)?;

    let toolbox = host.open_toolbox(&blueprint).await?;
    let panel = toolbox.current_panel().context("no current panel")?;
    panel.ready().await;

    let MessageChannel { port1, port2 } = MessageChannel::new();
    panel.adopt_port(port1);
    panel.post_message(json!("connect"), vec![port2])?;
    let port = panel.port().context("adopted port missing")?;
    port.start();

    let mut messages = Vec::new();
    while let Some(event) = port.recv().await {
        if let Some(text) = event.text() {
            messages.push(text.to_string());
            if text == "ping" {
                port.post_message(json!("pong"));
            }
            if text == "bye" {
                break;
            }
        }
    }
    port.close();

    host.close_toolbox().await?;
    info!(?messages, "handshake demo finished");
    Ok(HandshakeReport { messages })
}
