use clap::{Parser, Subcommand, ValueEnum};
use pipeworks_core::QueueMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipeworks")]
#[command(version)]
#[command(about = "In-process pipes and filters message routing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route bodies through an uppercase filter and a queue, then flush
    Run {
        /// Message bodies; suffix with @high, @med, @normal or @low to set priority
        bodies: Vec<String>,

        /// Queue release order (defaults to the config value)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Path to a JSON pipes config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Switch the filter to bypass before sending
        #[arg(long)]
        bypass: bool,
    },

    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Fifo,
    Sort,
}

impl From<ModeArg> for QueueMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fifo => QueueMode::Fifo,
            ModeArg::Sort => QueueMode::Sort,
        }
    }
}
