mod commands;
mod terminal;

use commands::{CommandLine, Commands, check, discover, info};
use spoolwatch_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);
    print::banner(commands.quiet);

    let mut cfg = Config::default();
    cfg.quiet = commands.quiet;
    if !commands.gcode_dir.is_empty() {
        cfg.gcode_dirs = commands.gcode_dir.clone();
    }

    match commands.command {
        Commands::Info => info::info(&cfg),
        Commands::Discover => discover::discover(&cfg).await,
        Commands::Check { targets } => check::check(targets, &cfg).await,
    }
}
