mod cli;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Log filter env var, e.g. `SERIESFILL_LOG=seriesfill=debug`
const LOG_ENV: &str = "SERIESFILL_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli.run()
}
