//! Inspect command implementation
//!
//! Maps the registry's view of an application onto a local copy of its
//! bundle, then reports which encrypted binaries belong to the app and which
//! to each extension.

use crate::bundle::{BundleLayout, inspect_bundle};
use crate::cli::InspectArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::registry::ApplicationRegistry;
use crate::ui;

use super::helpers::{open_client, parse_bundle_id};

/// Run inspect command
pub fn run(settings: &Settings, args: InspectArgs) -> Result<()> {
    let bundle_id = parse_bundle_id(&args.bundle_id)?;
    let client = open_client(settings)?;

    let main = client.main_executable(&bundle_id)?;
    let bundle_path = client.bundle_path(&bundle_id)?;
    let extensions = client.extensions(&bundle_id)?;

    let layout = BundleLayout::from_registry(
        &bundle_path,
        &main,
        &extensions,
        client.registry().path_separator(),
    );

    tracing::debug!(
        bundle_id = %bundle_id,
        main = %layout.main.display(),
        extensions = layout.extensions.len(),
        "Resolved bundle layout"
    );

    let report = inspect_bundle(&args.bundle_dir, layout, args.clean)?;

    if args.json {
        ui::print_json(&report)
    } else {
        ui::display::print_bundle_report(&bundle_id, &report)
    }
}
