//! DevDock library
//!
//! Exposes modules for integration testing

pub mod config;
pub mod demo;

// Re-export commonly used types for external use
pub use devdock_toolbox::{DevTools, DevToolsHost, HostConfig, PanelBlueprint, Tool};
