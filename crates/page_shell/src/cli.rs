// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "page_shell",
    version,
    about = "Replays page driver events and prints the overlay the shell would show"
)]
pub struct Cli {
    /// Shell configuration (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Event script, one JSON object per line. `-` reads stdin.
    #[arg(short, long, default_value = "-")]
    pub script: String,

    /// Pause between events, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Additionally write logs into this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_read_stdin() {
        let cli = Cli::try_parse_from(["page_shell"]).unwrap();
        assert_eq!(cli.script, "-");
        assert_eq!(cli.delay_ms, 0);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "page_shell",
            "--config",
            "shell.toml",
            "--script",
            "events.jsonl",
            "--delay-ms",
            "250",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("shell.toml")));
        assert_eq!(cli.script, "events.jsonl");
        assert_eq!(cli.delay_ms, 250);
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::DEBUG);
    }
}
