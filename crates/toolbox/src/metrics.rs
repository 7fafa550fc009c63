use lazy_static::lazy_static;
use prometheus::{core::Collector, IntCounter, IntGauge, Registry};
use tracing::error;

lazy_static! {
    static ref TOOLBOX_PANELS_OPEN: IntGauge =
        IntGauge::new("dock_toolbox_panels_open", "Panels currently alive").unwrap();
    static ref TOOLBOX_OPENED_TOTAL: IntCounter =
        IntCounter::new("dock_toolbox_opened_total", "Toolboxes opened").unwrap();
    static ref TOOLBOX_PANELS_DESTROYED: IntCounter = IntCounter::new(
        "dock_toolbox_panels_destroyed_total",
        "Panels torn down over the process lifetime",
    )
    .unwrap();
    static ref TOOLBOX_WINDOW_MESSAGES: IntCounter = IntCounter::new(
        "dock_toolbox_window_messages_total",
        "Window messages posted from the host to panel documents",
    )
    .unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register toolbox metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, TOOLBOX_PANELS_OPEN.clone());
    register(registry, TOOLBOX_OPENED_TOTAL.clone());
    register(registry, TOOLBOX_PANELS_DESTROYED.clone());
    register(registry, TOOLBOX_WINDOW_MESSAGES.clone());
}

pub fn set_panel_count(count: usize) {
    TOOLBOX_PANELS_OPEN.set(count as i64);
}

pub fn record_toolbox_opened() {
    TOOLBOX_OPENED_TOTAL.inc();
}

pub fn record_panel_destroyed() {
    TOOLBOX_PANELS_DESTROYED.inc();
}

pub fn record_window_message() {
    TOOLBOX_WINDOW_MESSAGES.inc();
}
