//! Registry errors

use super::BundlescopeError;

/// Creates an application not found error
pub fn not_found(bundle_id: impl Into<String>) -> BundlescopeError {
    BundlescopeError::ApplicationNotFound {
        bundle_id: bundle_id.into(),
    }
}

/// Creates a malformed extension entry error
pub fn malformed_entry(
    extension_id: impl Into<String>,
    missing_field: impl Into<String>,
) -> BundlescopeError {
    BundlescopeError::MalformedEntry {
        extension_id: extension_id.into(),
        missing_field: missing_field.into(),
    }
}

/// Creates an invalid bundle identifier error
pub fn invalid_bundle_id(bundle_id: impl Into<String>) -> BundlescopeError {
    BundlescopeError::InvalidBundleId {
        bundle_id: bundle_id.into(),
    }
}

/// Creates a registry load failed error
pub fn load_failed(path: impl Into<String>, reason: impl Into<String>) -> BundlescopeError {
    BundlescopeError::RegistryLoadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
