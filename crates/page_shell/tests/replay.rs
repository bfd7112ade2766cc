//! Replays scripted driver sessions through the shell and checks the
//! rendered overlay lines.

use std::time::Duration;

use load_state::{LoadState, ShellConfig};
use page_shell::{replay, script};
use pretty_assertions::assert_eq;

const FLAKY_NETWORK: &str = include_str!("../demos/flaky_network.jsonl");
const SHELL_CONFIG: &str = include_str!("../demos/shell.toml");

#[tokio::test]
async fn test_flaky_network_demo() {
    let config = ShellConfig::from_toml_str(SHELL_CONFIG).unwrap();
    let script = script::parse(FLAKY_NETWORK);
    assert!(script.issues.is_empty());

    let replay = replay(&config, script.events, Duration::ZERO, false)
        .await
        .unwrap();

    assert_eq!(replay.final_state, LoadState::success());
    assert_eq!(
        replay.lines,
        vec![
            "State: Idle | overlay: - | opacity: 0.50",
            "State: Loading (0%) | overlay: Loading 0% | opacity: 0.50",
            "State: Loading (25%) | overlay: Loading 25% | opacity: 0.50",
            "State: Offline | overlay: No connection | opacity: 0.50",
            "State: Idle | overlay: - | opacity: 0.50",
            "State: Loading (0%) | overlay: Loading 0% | opacity: 0.50",
            "State: Loading (60%) | overlay: Loading 60% | opacity: 0.50",
            "State: Loading (100%) | overlay: Loading 100% | opacity: 0.50",
            "State: Success | overlay: - | opacity: 1.00",
        ]
    );
}

#[tokio::test]
async fn test_failure_script_with_noise() {
    let text = "{\"event\":\"load_finished\"}\n\
                {\"event\":\"load_started\"}\n\
                garbage\n\
                {\"event\":\"load_failed\",\"message\":\"certificate rejected\"}\n";
    let script = script::parse(text);
    assert_eq!(script.issues.len(), 1);
    assert_eq!(script.issues[0].line, 3);

    let replay = replay(&ShellConfig::default(), script.events, Duration::ZERO, false)
        .await
        .unwrap();
    assert_eq!(replay.final_state, LoadState::error("certificate rejected"));
    assert_eq!(
        replay.lines.last().map(String::as_str),
        Some("State: Error (certificate rejected) | overlay: Error: certificate rejected | opacity: 0.50")
    );
    assert_eq!(replay.lines.len(), 3);
}
