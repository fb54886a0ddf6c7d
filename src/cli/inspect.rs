use clap::Parser;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Group encrypted binaries of a pulled bundle:\n    bundlescope inspect com.example.app --bundle-dir ./Example.app\n\n\
                  Strip signatures and store metadata first:\n    bundlescope inspect com.example.app -b ./Example.app --clean\n\n\
                  Print the result as JSON:\n    bundlescope inspect com.example.app -b ./Example.app --json")]
pub struct InspectArgs {
    /// Bundle identifier of the application
    pub bundle_id: String,

    /// Local copy of the application's .app directory
    #[arg(long, short = 'b')]
    pub bundle_dir: PathBuf,

    /// Remove code signatures, SC_Info and store metadata before scanning
    #[arg(long)]
    pub clean: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
