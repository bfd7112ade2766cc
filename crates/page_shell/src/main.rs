use clap::Parser;
use color_eyre::Result;
use page_shell::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _log_guard = page_shell::logging::init(cli.log_level.into(), cli.log_dir.as_deref())?;

    page_shell::run(cli).await
}
