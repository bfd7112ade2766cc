use std::{fs, path::Path};

use color_eyre::{eyre::WrapErr, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::filter_fn, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    Layer,
};

const LOG_FILE_NAME: &str = "page_shell.log";

/// Installs the console layer (stderr, stdout carries the overlay lines) and,
/// when `log_dir` is given, a non-blocking file layer.
///
/// The returned guard must be kept alive until exit so buffered file logs
/// are flushed.
pub fn init(level: LevelFilter, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::Layer::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .wrap_err_with(|| format!("creating log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::Layer::default()
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(filter_fn(move |metadata| metadata.level() <= &level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .wrap_err("installing tracing subscriber")?;

    Ok(guard)
}
