//! bundlescope - application registry inspector
//!
//! A command line tool that answers questions about installed application
//! bundles (extensions, main executables, encrypted binaries) from a snapshot
//! of the platform's application registry, and exposes the same queries as a
//! JSON-lines service.

use clap::Parser;

mod bundle;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod macho;
mod registry;
mod rpc;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use config::Settings;
use error::Result;

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.overrides())?;
    logging::init(&settings)?;

    match cli.command {
        Commands::Extensions(args) => commands::extensions::run(&settings, args),
        Commands::Main(args) => commands::main_exec::run(&settings, args),
        Commands::List(args) => commands::list::run(&settings, args),
        Commands::Inspect(args) => commands::inspect::run(&settings, args),
        Commands::Serve => commands::serve::run(&settings),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
