//! Error types and handling for bundlescope
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructor helpers are grouped by error domain:
//! - [`registry`]: Application registry lookups and snapshot loading
//! - [`config`]: Configuration files and settings
//! - [`macho`]: Mach-O inspection
//! - [`rpc`]: Exports server requests

pub mod config;
pub mod macho;
pub mod registry;
pub mod rpc;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bundlescope operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundlescopeError {
    // Registry errors
    #[error("bundle identifier \"{bundle_id}\" not found")]
    #[diagnostic(
        code(bundlescope::registry::not_found),
        help("Run 'bundlescope list' to see the applications known to the registry")
    )]
    ApplicationNotFound { bundle_id: String },

    #[error("extension '{extension_id}' is missing '{missing_field}' in its info dictionary")]
    #[diagnostic(
        code(bundlescope::registry::malformed_entry),
        help("The registry entry for this extension is incomplete; re-export the registry snapshot")
    )]
    MalformedEntry {
        extension_id: String,
        missing_field: String,
    },

    #[error("Invalid bundle identifier: '{bundle_id}'")]
    #[diagnostic(
        code(bundlescope::registry::invalid_bundle_id),
        help("Bundle identifiers are non-empty reverse-DNS strings such as com.example.app")
    )]
    InvalidBundleId { bundle_id: String },

    #[error("No application registry configured")]
    #[diagnostic(
        code(bundlescope::registry::not_configured),
        help("Pass --registry <file>, set BUNDLESCOPE_REGISTRY, or add 'registry:' to the config file")
    )]
    RegistryNotConfigured,

    #[error("Failed to load registry snapshot '{path}': {reason}")]
    #[diagnostic(code(bundlescope::registry::load_failed))]
    RegistryLoadFailed { path: String, reason: String },

    #[error("Application '{bundle_id}' is registered more than once")]
    #[diagnostic(code(bundlescope::registry::duplicate_application))]
    DuplicateApplication { bundle_id: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(bundlescope::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(bundlescope::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(bundlescope::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bundlescope::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to initialize logging: {message}")]
    #[diagnostic(code(bundlescope::config::logging_failed))]
    LoggingInitFailed { message: String },

    // Bundle and Mach-O errors
    #[error("App bundle directory not found: {path}")]
    #[diagnostic(
        code(bundlescope::bundle::not_found),
        help("Pull the application bundle from the device first and pass its local path")
    )]
    BundleDirNotFound { path: String },

    #[error("Failed to read Mach-O binary '{path}': {reason}")]
    #[diagnostic(code(bundlescope::macho::read_failed))]
    MachOReadFailed { path: String, reason: String },

    // Exports server errors
    #[error("Invalid request: {message}")]
    #[diagnostic(code(bundlescope::rpc::invalid_request))]
    InvalidRequest { message: String },

    #[error("Unknown method: {method}")]
    #[diagnostic(
        code(bundlescope::rpc::unknown_method),
        help("Available methods: extensions, main, applications")
    )]
    UnknownMethod { method: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(bundlescope::fs::io_error))]
    IoError { message: String },
}

impl BundlescopeError {
    /// Stable diagnostic code, used on the wire by the exports server
    pub fn code_string(&self) -> String {
        self.code()
            .map_or_else(|| "bundlescope::unknown".to_string(), |c| c.to_string())
    }
}

impl From<std::io::Error> for BundlescopeError {
    fn from(err: std::io::Error) -> Self {
        BundlescopeError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for BundlescopeError {
    fn from(err: serde_yaml::Error) -> Self {
        BundlescopeError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BundlescopeError {
    fn from(err: serde_json::Error) -> Self {
        BundlescopeError::InvalidRequest {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundlescopeError>;
