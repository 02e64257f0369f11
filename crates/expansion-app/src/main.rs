// Expansion draft entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config and apply command-line overrides
// 3. Fetch the league, simulate, export, then present

use expansion_app::app;
use expansion_app::cli::Cli;
use expansion_app::config;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;
    info!("Expansion draft starting up");

    let mut config = config::load_config().context("failed to load configuration")?;
    cli.apply(&mut config)
        .context("invalid command-line override")?;
    info!(
        "Config loaded: league={}, {} team(s) x {} picks, {}, protect {} ({} mode)",
        config.league_id,
        config.draft.num_teams,
        config.draft.picks_per_team,
        config.draft.format,
        config.draft.max_protect,
        config.protection.mode
    );

    let result = app::run(config, &cli).await;
    match &result {
        Ok(()) => info!("Expansion draft finished"),
        Err(e) => tracing::error!("Expansion draft failed: {e:#}"),
    }
    result
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("expansion-draft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("expansion_app=info,expansion_core=info,expansion_llm=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
