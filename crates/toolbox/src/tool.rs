//! Tool definitions.
//!
//! A tool contributes one or more panel definitions to the toolbox, each
//! under a named slot.

use devdock_core_types::DockError;

use crate::blueprint::PanelBlueprint;
use crate::errors::ToolboxError;

#[derive(Clone, Debug)]
pub struct Tool {
    name: String,
    panels: Vec<(String, PanelBlueprint)>,
}

impl Tool {
    pub fn builder(name: impl Into<String>) -> ToolBuilder {
        ToolBuilder {
            name: name.into(),
            panels: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn panels(&self) -> &[(String, PanelBlueprint)] {
        &self.panels
    }
}

pub struct ToolBuilder {
    name: String,
    panels: Vec<(String, PanelBlueprint)>,
}

impl ToolBuilder {
    pub fn panel(mut self, slot: impl Into<String>, blueprint: PanelBlueprint) -> Self {
        self.panels.push((slot.into(), blueprint));
        self
    }

    pub fn build(self) -> Result<Tool, DockError> {
        for (index, (slot, _)) in self.panels.iter().enumerate() {
            if self.panels[..index].iter().any(|(other, _)| other == slot) {
                return Err(ToolboxError::DuplicateSlot.into_dock_error(format!("slot {}", slot)));
            }
        }
        Ok(Tool {
            name: self.name,
            panels: self.panels,
        })
    }
}
