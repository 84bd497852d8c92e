mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            bodies,
            mode,
            config,
            bypass,
        } => commands::run::run(&bodies, mode.map(Into::into), config.as_deref(), bypass),
        Commands::Version => commands::version::run(),
    }
}
