use clap::Parser;

/// Arguments for the main command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print the main executable:\n    bundlescope main com.example.app\n\n\
                  Print it as a JSON string:\n    bundlescope main com.example.app --json")]
pub struct MainArgs {
    /// Bundle identifier of the application
    pub bundle_id: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
