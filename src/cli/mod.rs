//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - extensions: Extensions command arguments
//! - main_exec: Main command arguments
//! - list: List command arguments
//! - inspect: Inspect command arguments
//! - completions: Completions command arguments

use clap::builder::{BoolishValueParser, Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod extensions;
pub mod inspect;
pub mod list;
pub mod main_exec;

pub use completions::CompletionsArgs;
pub use extensions::ExtensionsArgs;
pub use inspect::InspectArgs;
pub use list::ListArgs;
pub use main_exec::MainArgs;

use crate::config::Overrides;

/// bundlescope - application registry inspector
///
/// Query an application registry for bundle extensions and executables.
#[derive(Parser, Debug)]
#[command(
    name = "bundlescope",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Inspect installed application bundles through their registry",
    long_about = "bundlescope answers questions about installed application bundles \
                  (app extensions, main executables, encrypted binaries) using a \
                  snapshot of the platform's application registry.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  bundlescope list                               \x1b[90m# List registered applications\x1b[0m\n   \
                  bundlescope extensions com.example.app         \x1b[90m# List app extensions\x1b[0m\n   \
                  bundlescope main com.example.app               \x1b[90m# Print main executable\x1b[0m\n   \
                  bundlescope inspect com.example.app -b ./Example.app \x1b[90m# Split encrypted binaries\x1b[0m\n   \
                  bundlescope serve < requests.jsonl             \x1b[90m# Answer JSON-lines requests\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Registry snapshot file (YAML or JSON)
    #[arg(long, short = 'r', global = true, env = "BUNDLESCOPE_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Configuration file (defaults to the first of the standard locations)
    #[arg(long, short = 'c', global = true, env = "BUNDLESCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BUNDLESCOPE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines (`--log-json=false` turns off a configured default)
    #[arg(
        long,
        global = true,
        env = "BUNDLESCOPE_LOG_JSON",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings overrides taken from flags and environment
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            registry: self.registry.clone(),
            log_level: self.log_level.clone(),
            log_json: self.log_json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the app extensions of an application
    Extensions(ExtensionsArgs),

    /// Print the main executable of an application
    Main(MainArgs),

    /// List registered applications
    List(ListArgs),

    /// Find encrypted binaries in a pulled app bundle and group them by owner
    Inspect(InspectArgs),

    /// Answer JSON-lines requests on stdin
    #[command(after_help = "EXAMPLES:\n  \
                  Query the main executable:\n    \
                  echo '{\"id\":1,\"method\":\"main\",\"params\":[\"com.example.app\"]}' | bundlescope serve\n\n\
                  Methods: extensions, main, applications")]
    Serve,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
