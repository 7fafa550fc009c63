//! Chrome document of the toolbox window.
//!
//! A deliberately small node model: enough structure to assert what the
//! host renders for each panel (tab with `value` and `tooltiptext`
//! attributes, deck node with a `toolbox-panel-<id>` id) without dragging
//! in a real markup engine.

use std::collections::HashMap;

use devdock_core_types::PanelId;

#[derive(Debug, Clone)]
pub struct ChromeNode {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    owner: PanelId,
}

impl ChromeNode {
    fn new(tag: &str, owner: &PanelId) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: HashMap::new(),
            owner: owner.clone(),
        }
    }

    fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|v| v.as_str())
    }

    pub fn owner(&self) -> &PanelId {
        &self.owner
    }
}

#[derive(Debug, Default)]
pub struct ToolboxDocument {
    nodes: Vec<ChromeNode>,
}

impl ToolboxDocument {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Renders the chrome for one panel: its tab and its deck node.
    pub fn render_panel(&mut self, panel_id: &PanelId, label: &str, tooltip: &str) {
        self.nodes.push(
            ChromeNode::new("tab", panel_id)
                .with_attr("value", label)
                .with_attr("tooltiptext", tooltip),
        );
        self.nodes.push(
            ChromeNode::new("panel", panel_id)
                .with_attr("id", format!("toolbox-panel-{}", panel_id.0)),
        );
    }

    /// Drops every node owned by the panel.
    pub fn remove_panel(&mut self, panel_id: &PanelId) {
        self.nodes.retain(|node| &node.owner != panel_id);
    }

    /// Marks the panel's tab as the selected one.
    pub fn select_tab(&mut self, panel_id: &PanelId) {
        for node in &mut self.nodes {
            if node.tag != "tab" {
                continue;
            }
            if &node.owner == panel_id {
                node.attrs.insert("selected".to_string(), "true".to_string());
            } else {
                node.attrs.remove("selected");
            }
        }
    }

    pub fn query_by_attr(&self, name: &str, value: &str) -> Option<&ChromeNode> {
        self.nodes.iter().find(|node| node.attr(name) == Some(value))
    }

    pub fn query_all_by_attr(&self, name: &str, value: &str) -> Vec<&ChromeNode> {
        self.nodes
            .iter()
            .filter(|node| node.attr(name) == Some(value))
            .collect()
    }

    pub fn query_by_id(&self, id: &str) -> Option<&ChromeNode> {
        self.query_by_attr("id", id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
