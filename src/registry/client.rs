//! Application registry client
//!
//! Every query resolves the application record afresh through the owned
//! registry; nothing is cached between calls.

use super::{
    ApplicationHandle, ApplicationInfo, ApplicationRegistry, BundleId, ExtensionInfo,
};
use crate::error::{Result, registry};

/// Answers bundle queries against an application registry
#[derive(Debug)]
pub struct RegistryClient<R> {
    registry: R,
}

impl<R: ApplicationRegistry> RegistryClient<R> {
    /// Create a client that owns `registry`
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Borrow the underlying registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Resolve the registration record for `bundle_id`
    pub fn resolve(&self, bundle_id: &BundleId) -> Result<R::Application<'_>> {
        tracing::debug!(bundle_id = %bundle_id, "Resolving application");

        self.registry
            .application_for_identifier(bundle_id)?
            .ok_or_else(|| registry::not_found(bundle_id.as_str()))
    }

    /// List the application's extensions in registry order
    ///
    /// Fails as a whole if any entry lacks its path or executable.
    pub fn extensions(&self, bundle_id: &BundleId) -> Result<Vec<ExtensionInfo>> {
        let app = self.resolve(bundle_id)?;
        let separator = self.registry.path_separator();

        let extensions = app
            .plugins()
            .iter()
            .map(|plugin| ExtensionInfo::from_plugin(plugin, separator))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            bundle_id = %bundle_id,
            count = extensions.len(),
            "Listed extensions"
        );

        Ok(extensions)
    }

    /// The application's declared primary executable, unmodified
    pub fn main_executable(&self, bundle_id: &BundleId) -> Result<String> {
        let app = self.resolve(bundle_id)?;
        Ok(app.bundle_executable().to_string())
    }

    /// The application's bundle directory on the device
    pub fn bundle_path(&self, bundle_id: &BundleId) -> Result<String> {
        let app = self.resolve(bundle_id)?;
        Ok(app.bundle_path().to_string())
    }

    /// Every registered application
    pub fn applications(&self) -> Result<Vec<ApplicationInfo>> {
        self.registry.applications()
    }
}
