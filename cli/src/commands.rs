pub mod check;
pub mod discover;
pub mod info;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use spoolwatch_common::network::endpoint::Endpoint;

#[derive(Parser)]
#[command(name = "spoolwatch")]
#[command(about = "Keeps an eye on smart filament spools.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Show trace-level probe chatter.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Less output; twice for results only.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Extra directory to watch for sliced output (repeatable).
    #[arg(long = "gcode-dir", global = true)]
    pub gcode_dir: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the probe plan and the watched folders
    #[command(alias = "i")]
    Info,
    /// Sweep the likely subnets for spool holders
    #[command(alias = "d")]
    Discover,
    /// Refresh holders and judge the latest sliced job
    #[command(alias = "c")]
    Check {
        /// Holder endpoints from an earlier discover (ip:port); the
        /// conventional addresses are probed when omitted
        targets: Vec<Endpoint>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
