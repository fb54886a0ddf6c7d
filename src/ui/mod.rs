//! Terminal presentation
//!
//! Human output uses `console` styles; `--json` output goes through
//! [`print_json`]. Everything here writes to stdout. Diagnostics and logs go
//! to stderr.

use serde::Serialize;

use crate::error::{BundlescopeError, Result};

pub mod display;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| BundlescopeError::IoError {
        message: format!("Failed to encode JSON output: {e}"),
    })?;
    println!("{json}");
    Ok(())
}
