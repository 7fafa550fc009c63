use devdock_core_types::ReadyState;
use devdock_toolbox::{
    DevTools, DevToolsHost, HostConfig, PanelBlueprint, Tool, ToolboxEvent,
};

#[tokio::test]
async fn lifecycle_event_stream_is_ordered() {
    let host = DevToolsHost::new(HostConfig::default());
    let mut rx = host.subscribe();

    let blueprint = PanelBlueprint::builder("observed panel")
        .tooltip("watched by the event stream")
        .build();
    let tool = Tool::builder("observed")
        .panel("observed_panel", blueprint.clone())
        .build()
        .expect("tool");
    host.register_tool(tool).expect("tool registration");

    let toolbox = host.open_toolbox(&blueprint).await.expect("open toolbox");
    let panel = toolbox.current_panel().expect("current panel");
    panel.loaded().await;
    host.close_toolbox().await.expect("close toolbox");

    let mut events = Vec::new();
    loop {
        let event = rx.recv().await.expect("event stream");
        let done = matches!(event, ToolboxEvent::ToolboxClosed { .. });
        events.push(event);
        if done {
            break;
        }
    }

    match &events[0] {
        ToolboxEvent::PanelCreated { slot, panel: created, .. } => {
            assert_eq!(slot, "observed_panel");
            assert_eq!(created, panel.id());
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(
        matches!(&events[1], ToolboxEvent::ToolboxOpened { toolbox: id } if id == toolbox.id()),
        "open event follows panel creation"
    );

    let transitions: Vec<(ReadyState, ReadyState)> = events
        .iter()
        .filter_map(|event| match event {
            ToolboxEvent::PanelStateChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (ReadyState::Uninitialized, ReadyState::Interactive),
            (ReadyState::Interactive, ReadyState::Complete),
            (ReadyState::Complete, ReadyState::Destroyed),
        ],
        "states advance forward through the fixed sequence"
    );

    let disposals = events
        .iter()
        .filter(|event| matches!(event, ToolboxEvent::PanelDisposed { .. }))
        .count();
    assert_eq!(disposals, 1, "panel disposed exactly once");
}

#[tokio::test]
async fn closing_early_still_resolves_waits() {
    let host = DevToolsHost::new(HostConfig::default());

    let blueprint = PanelBlueprint::builder("short lived").build();
    let tool = Tool::builder("short")
        .panel("short_lived", blueprint.clone())
        .build()
        .expect("tool");
    host.register_tool(tool).expect("tool registration");

    let toolbox = host.open_toolbox(&blueprint).await.expect("open toolbox");
    let panel = toolbox.current_panel().expect("current panel");

    // No lifecycle waits yet; close immediately.
    host.close_toolbox().await.expect("close toolbox");

    assert_eq!(panel.ready_state(), ReadyState::Destroyed);
    assert_eq!(panel.ready().await, ReadyState::Destroyed);
    assert_eq!(panel.loaded().await, ReadyState::Destroyed);
}
