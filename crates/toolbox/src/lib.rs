//! Toolbox host for developer-tools panels.
//!
//! A [`DevToolsHost`] owns at most one open [`Toolbox`] at a time. Opening
//! instantiates every registered panel slot, renders its tab and deck nodes
//! into the chrome document, and spawns the embedded document runtime that
//! walks the panel through `uninitialized → interactive → complete`.
//! Closing tears the panels down in creation order and leaves each of them
//! `destroyed`, with lifecycle waits resolved rather than hung.

pub mod blueprint;
pub mod chrome;
pub mod config;
pub mod errors;
pub mod events;
pub mod host;
pub mod metrics;
pub mod panel;
pub mod panel_doc;
pub mod tool;
pub mod toolbox;

pub use blueprint::{FnPanelHooks, PanelBlueprint, PanelBuilder, PanelHooks, SetupContext};
pub use config::HostConfig;
pub use errors::ToolboxError;
pub use events::{ToolboxEvent, ToolboxEventBus};
pub use host::{DevTools, DevToolsHost};
pub use panel::Panel;
pub use panel_doc::PanelDocument;
pub use tool::{Tool, ToolBuilder};
pub use toolbox::Toolbox;
