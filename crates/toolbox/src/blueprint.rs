//! Panel definitions.
//!
//! A [`PanelBlueprint`] plays the role a panel subclass plays in a
//! browser extension API: metadata, the embedded document's behavior and
//! the lifecycle hooks, bundled as plain data behind `Arc`s so a single
//! definition can be registered once and instantiated per toolbox open.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use devdock_core_types::{BlueprintId, Debuggee};
use futures::future::BoxFuture;

use crate::panel::Panel;
use crate::panel_doc::PanelDocument;

/// The embedded document's inline script, run once at load.
pub type DocumentBody = Arc<dyn Fn(Arc<PanelDocument>) -> BoxFuture<'static, ()> + Send + Sync>;

/// Context handed to a panel's setup hook.
pub struct SetupContext {
    pub debuggee: Debuggee,
}

/// Lifecycle callbacks of a panel definition. Both default to no-ops.
///
/// `setup` runs while the panel is still uninitialized, before its
/// document has produced any content. `dispose` runs exactly once during
/// teardown, before the framework clears the panel's debuggee and port.
pub trait PanelHooks: Send + Sync {
    fn setup(&self, _panel: &Panel, _ctx: &SetupContext) {}
    fn dispose(&self, _panel: &Panel) {}
}

struct NoHooks;

impl PanelHooks for NoHooks {}

type SetupFn = Box<dyn Fn(&Panel, &SetupContext) + Send + Sync>;
type DisposeFn = Box<dyn Fn(&Panel) + Send + Sync>;

/// Closure-backed hooks, what [`PanelBuilder::on_setup`] and
/// [`PanelBuilder::on_dispose`] collect into.
#[derive(Default)]
pub struct FnPanelHooks {
    setup: Option<SetupFn>,
    dispose: Option<DisposeFn>,
}

impl FnPanelHooks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelHooks for FnPanelHooks {
    fn setup(&self, panel: &Panel, ctx: &SetupContext) {
        if let Some(hook) = &self.setup {
            hook(panel, ctx);
        }
    }

    fn dispose(&self, panel: &Panel) {
        if let Some(hook) = &self.dispose {
            hook(panel);
        }
    }
}

/// Definition of a panel kind.
#[derive(Clone)]
pub struct PanelBlueprint {
    id: BlueprintId,
    label: String,
    tooltip: String,
    url: String,
    body: DocumentBody,
    hooks: Arc<dyn PanelHooks>,
}

impl PanelBlueprint {
    pub fn builder(label: impl Into<String>) -> PanelBuilder {
        PanelBuilder::new(label)
    }

    pub fn id(&self) -> &BlueprintId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn body(&self) -> DocumentBody {
        Arc::clone(&self.body)
    }

    pub(crate) fn hooks(&self) -> Arc<dyn PanelHooks> {
        Arc::clone(&self.hooks)
    }
}

impl fmt::Debug for PanelBlueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelBlueprint")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("tooltip", &self.tooltip)
            .field("url", &self.url)
            .finish()
    }
}

pub struct PanelBuilder {
    label: String,
    tooltip: String,
    url: String,
    body: Option<DocumentBody>,
    fn_hooks: FnPanelHooks,
    custom_hooks: Option<Arc<dyn PanelHooks>>,
}

impl PanelBuilder {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tooltip: String::new(),
            url: "about:blank".to_string(),
            body: None,
            fn_hooks: FnPanelHooks::new(),
            custom_hooks: None,
        }
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the embedded document's behavior.
    pub fn document_body<F, Fut>(mut self, body: F) -> Self
    where
        F: Fn(Arc<PanelDocument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.body = Some(Arc::new(move |doc| Box::pin(body(doc))));
        self
    }

    pub fn on_setup<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Panel, &SetupContext) + Send + Sync + 'static,
    {
        self.fn_hooks.setup = Some(Box::new(hook));
        self
    }

    pub fn on_dispose<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Panel) + Send + Sync + 'static,
    {
        self.fn_hooks.dispose = Some(Box::new(hook));
        self
    }

    /// Replaces the closure-backed hooks with a custom implementation.
    pub fn hooks(mut self, hooks: Arc<dyn PanelHooks>) -> Self {
        self.custom_hooks = Some(hooks);
        self
    }

    pub fn build(self) -> PanelBlueprint {
        let hooks: Arc<dyn PanelHooks> = match self.custom_hooks {
            Some(custom) => custom,
            None => {
                if self.fn_hooks.setup.is_none() && self.fn_hooks.dispose.is_none() {
                    Arc::new(NoHooks)
                } else {
                    Arc::new(self.fn_hooks)
                }
            }
        };
        PanelBlueprint {
            id: BlueprintId::new(),
            label: self.label,
            tooltip: self.tooltip,
            url: self.url,
            body: self
                .body
                .unwrap_or_else(|| Arc::new(|_doc| Box::pin(async {}))),
            hooks,
        }
    }
}
