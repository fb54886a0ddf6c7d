//! Command helper utilities

use crate::config::Settings;
use crate::error::Result;
use crate::registry::{BundleId, RegistryClient, SnapshotRegistry};

/// Open a registry client on the configured snapshot
pub fn open_client(settings: &Settings) -> Result<RegistryClient<SnapshotRegistry>> {
    let path = settings.registry_path()?;
    let registry = SnapshotRegistry::load(path)?;

    if registry.is_empty() {
        tracing::warn!(path = %path.display(), "Registry snapshot has no applications");
    }

    tracing::debug!(
        path = %path.display(),
        applications = registry.len(),
        "Opened registry snapshot"
    );

    Ok(RegistryClient::new(registry))
}

/// Validate a bundle identifier given on the command line
pub fn parse_bundle_id(raw: &str) -> Result<BundleId> {
    BundleId::parse(raw)
}
