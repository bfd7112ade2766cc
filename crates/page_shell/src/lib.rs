//! Headless page shell.
//!
//! Stands in for the native shell around the embedded page: it plays a
//! script of page driver and connectivity events through the load-state
//! adapter and prints, for every published state, what the overlay would
//! show.

pub mod cli;
pub mod logging;
pub mod render;
pub mod script;

use std::time::Duration;

use color_eyre::Result;
use load_state::{LoadEvent, LoadState, LoadStateAdapter, ShellConfig};
use tracing::{info, warn};

use crate::cli::Cli;

/// Result of playing a script.
#[derive(Debug)]
pub struct Replay {
    /// Rendered status lines, starting with the initial state.
    pub lines: Vec<String>,
    pub final_state: LoadState,
}

/// Feeds `events` through a fresh adapter and renders every published state.
///
/// With `echo`, lines are printed to stdout as they are published.
pub async fn replay(
    config: &ShellConfig,
    events: Vec<LoadEvent>,
    delay: Duration,
    echo: bool,
) -> Result<Replay> {
    let adapter = LoadStateAdapter::spawn(&config.load);
    let mut updates = adapter.subscribe();

    let first = render::render_line(&adapter.snapshot(), &config.overlay);
    if echo {
        println!("{first}");
    }

    let overlay = config.overlay.clone();
    let printer = tokio::spawn(async move {
        let mut lines = vec![first];
        while let Some(state) = updates.recv().await {
            let line = render::render_line(&state, &overlay);
            if echo {
                println!("{line}");
            }
            lines.push(line);
        }
        lines
    });

    let sink = adapter.sink();
    for event in events {
        sink.send(event)?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let final_state = adapter.shutdown().await?;
    let lines = printer.await?;
    Ok(Replay { lines, final_state })
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    info!(url = %config.page.url, "starting page shell");

    let text = script::read_source(&cli.script).await?;
    let script = script::parse(&text);
    for issue in &script.issues {
        warn!(line = issue.line, "skipping script line: {}", issue.message);
    }

    let replay = replay(
        &config,
        script.events,
        Duration::from_millis(cli.delay_ms),
        true,
    )
    .await?;
    println!("final: {}", replay.final_state);
    Ok(())
}
