use std::fs;
use std::process::Command;

use anyhow::{Context, Result};
use devdock_cli::demo;
use devdock_core_types::ReadyState;
use devdock_toolbox::HostConfig;
use tempfile::tempdir;

#[tokio::test]
async fn lifecycle_demo_reports_forward_states() -> Result<()> {
    let report = demo::run_lifecycle(&HostConfig::default()).await?;

    assert!(!report.panel_id.is_empty());
    assert_eq!(
        report.states,
        vec![
            ReadyState::Uninitialized,
            ReadyState::Interactive,
            ReadyState::Complete,
            ReadyState::Destroyed,
        ]
    );
    // A rendered panel contributes a tab and a panel frame.
    assert_eq!(report.chrome_nodes, 2);
    Ok(())
}

#[tokio::test]
async fn handshake_demo_collects_ping_then_bye() -> Result<()> {
    let report = demo::run_handshake(&HostConfig::default()).await?;
    assert_eq!(report.messages, vec!["ping".to_string(), "bye".to_string()]);
    Ok(())
}

#[test]
fn lifecycle_command_prints_the_state_walk() -> Result<()> {
    let binary = env!("CARGO_BIN_EXE_devdock");
    let output = Command::new(binary)
        .arg("--log-level")
        .arg("warn")
        .arg("lifecycle")
        .output()
        .context("failed to execute lifecycle command")?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "lifecycle command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
            output.status, stdout, stderr
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("states: uninitialized, interactive, complete, destroyed"),
        "stdout did not walk the lifecycle: {}",
        stdout
    );
    assert!(
        stdout.contains("chrome nodes rendered: 2"),
        "stdout did not report the rendered chrome: {}",
        stdout
    );
    Ok(())
}

#[test]
fn handshake_command_prints_the_conversation() -> Result<()> {
    let binary = env!("CARGO_BIN_EXE_devdock");
    let output = Command::new(binary)
        .arg("--log-level")
        .arg("warn")
        .arg("handshake")
        .output()
        .context("failed to execute handshake command")?;

    assert!(output.status.success(), "handshake command failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("panel doc sent: ping, bye"),
        "stdout did not report the handshake: {}",
        stdout
    );
    Ok(())
}

#[test]
fn config_command_honors_a_config_file() -> Result<()> {
    let tmp = tempdir()?;
    let config_path = tmp.path().join("config.yaml");
    fs::write(
        &config_path,
        "host:\n  target_url: https://example.dev/app\n",
    )?;

    let binary = env!("CARGO_BIN_EXE_devdock");
    let output = Command::new(binary)
        .arg("--config")
        .arg(&config_path)
        .arg("--log-level")
        .arg("warn")
        .arg("config")
        .output()
        .context("failed to execute config command")?;

    assert!(output.status.success(), "config command failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("https://example.dev/app"),
        "config output did not carry the file's target: {}",
        stdout
    );
    assert!(
        stdout.contains("event_capacity: 64"),
        "config output did not fill defaults: {}",
        stdout
    );
    Ok(())
}
