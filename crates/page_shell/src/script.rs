//! Event scripts: one JSON-encoded [`LoadEvent`] per line.
//!
//! ```text
//! # comment lines and blank lines are skipped
//! {"event":"load_started"}
//! {"event":"load_progressed","fraction":0.3}
//! {"event":"load_failed","message":"timeout"}
//! ```
//!
//! A line that does not parse is reported and skipped; the rest of the
//! script still plays.

use color_eyre::{eyre::WrapErr, Result};
use load_state::LoadEvent;
use tokio::io::AsyncReadExt;

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptIssue {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Script {
    pub events: Vec<LoadEvent>,
    pub issues: Vec<ScriptIssue>,
}

pub fn parse(text: &str) -> Script {
    let mut script = Script::default();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<LoadEvent>(line) {
            Ok(event) => script.events.push(event),
            Err(err) => script.issues.push(ScriptIssue {
                line: index + 1,
                message: err.to_string(),
            }),
        }
    }
    script
}

/// Reads a script from a path, or from stdin for `-`.
pub async fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .wrap_err("reading event script from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(source)
        .await
        .wrap_err_with(|| format!("reading event script {source}"))
}
