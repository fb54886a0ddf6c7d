//! Serve command implementation

use crate::config::Settings;
use crate::error::Result;
use crate::rpc::Exports;

use super::helpers::open_client;

/// Answer JSON-lines requests on stdin until it closes
pub fn run(settings: &Settings) -> Result<()> {
    let exports = Exports::new(open_client(settings)?);

    tracing::info!("Serving exports on stdin/stdout");

    let stdin = std::io::stdin();
    exports.serve(stdin.lock(), std::io::stdout().lock())?;

    Ok(())
}
