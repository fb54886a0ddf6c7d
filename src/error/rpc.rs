//! Exports server errors

use super::BundlescopeError;

/// Creates an invalid request error
pub fn invalid_request(message: impl Into<String>) -> BundlescopeError {
    BundlescopeError::InvalidRequest {
        message: message.into(),
    }
}

/// Creates an unknown method error
pub fn unknown_method(method: impl Into<String>) -> BundlescopeError {
    BundlescopeError::UnknownMethod {
        method: method.into(),
    }
}
