//! Mach-O inspection errors

use super::BundlescopeError;

/// Creates a Mach-O read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BundlescopeError {
    BundlescopeError::MachOReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
