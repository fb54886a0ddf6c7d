//! Main command implementation
//!
//! Prints the declared primary executable exactly as registered.

use crate::cli::MainArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui;

use super::helpers::{open_client, parse_bundle_id};

/// Run main command
pub fn run(settings: &Settings, args: MainArgs) -> Result<()> {
    let bundle_id = parse_bundle_id(&args.bundle_id)?;
    let client = open_client(settings)?;

    let executable = client.main_executable(&bundle_id)?;

    if args.json {
        ui::print_json(&executable)
    } else {
        println!("{executable}");
        Ok(())
    }
}
