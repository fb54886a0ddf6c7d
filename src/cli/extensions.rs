use clap::Parser;

/// Arguments for the extensions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the extensions of an application:\n    bundlescope extensions com.example.app\n\n\
                  Print them as JSON:\n    bundlescope extensions com.example.app --json\n\n\
                  Use a specific registry snapshot:\n    bundlescope extensions com.example.app -r ./registry.yaml")]
pub struct ExtensionsArgs {
    /// Bundle identifier of the application (e.g. com.example.app)
    pub bundle_id: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
