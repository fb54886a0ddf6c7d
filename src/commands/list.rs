//! List command implementation

use crate::cli::ListArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui;

use super::helpers::open_client;

/// Run list command
pub fn run(settings: &Settings, args: ListArgs) -> Result<()> {
    let client = open_client(settings)?;
    let applications = client.applications()?;

    if args.json {
        ui::print_json(&applications)
    } else {
        ui::display::print_applications(&applications)
    }
}
