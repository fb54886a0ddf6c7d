//! Extensions command implementation

use crate::cli::ExtensionsArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui;

use super::helpers::{open_client, parse_bundle_id};

/// Run extensions command
pub fn run(settings: &Settings, args: ExtensionsArgs) -> Result<()> {
    let bundle_id = parse_bundle_id(&args.bundle_id)?;
    let client = open_client(settings)?;

    let extensions = client.extensions(&bundle_id)?;

    if args.json {
        ui::print_json(&extensions)
    } else {
        ui::display::print_extensions(&bundle_id, &extensions)
    }
}
