//! Application registry access
//!
//! This module provides:
//! - The typed interface a platform registry adapter implements
//!   ([`ApplicationRegistry`], [`ApplicationHandle`], [`PluginHandle`])
//! - The registry client that answers bundle queries ([`RegistryClient`])
//! - Extension metadata construction and validation ([`ExtensionInfo`])
//! - A registry adapter backed by an exported snapshot file ([`SnapshotRegistry`])

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BundlescopeError, Result, registry};

pub mod client;
pub mod extension;
pub mod snapshot;

pub use client::RegistryClient;
pub use extension::ExtensionInfo;
pub use snapshot::SnapshotRegistry;

/// Info dictionary key holding an extension's installation directory
pub const INFO_PATH_KEY: &str = "Path";

/// Info dictionary key holding an extension's executable file name
pub const INFO_EXECUTABLE_KEY: &str = "CFBundleExecutable";

/// Path separator used by iOS registries
pub const DEFAULT_SEPARATOR: char = '/';

/// A plugin's info dictionary (`Info.plist` contents as reported by the registry)
pub type InfoDictionary = BTreeMap<String, serde_json::Value>;

/// Reverse-DNS bundle identifier (e.g. `com.example.app`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BundleId(String);

impl BundleId {
    /// Parse a bundle identifier, rejecting blank input
    ///
    /// Anything else is kept verbatim; lookups match identifiers exactly.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(registry::invalid_bundle_id(input));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BundleId {
    type Err = BundlescopeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Summary of an installed application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// Bundle identifier
    pub identifier: String,

    /// Human-readable name
    pub name: String,

    /// Marketing version (`CFBundleShortVersionString`)
    pub version: String,

    /// Build number (`CFBundleVersion`)
    pub build: String,

    /// Bundle directory on the device
    pub path: String,
}

/// A platform application registry
///
/// Implementations hide how the registry is reached (object-model calls in an
/// instrumented process, an exported snapshot, ...). Lookups are expected to
/// reflect the registry state at call time.
pub trait ApplicationRegistry {
    /// Handle to one application's registration record
    type Application<'r>: ApplicationHandle
    where
        Self: 'r;

    /// Look up the record for `bundle_id`, or `None` when it is not registered
    fn application_for_identifier(
        &self,
        bundle_id: &BundleId,
    ) -> Result<Option<Self::Application<'_>>>;

    /// Enumerate every registered application in registry order
    fn applications(&self) -> Result<Vec<ApplicationInfo>>;

    /// Separator used when joining registry paths
    fn path_separator(&self) -> char {
        DEFAULT_SEPARATOR
    }
}

/// An application's registration record
pub trait ApplicationHandle {
    /// Handle to one plugin (extension) entry
    type Plugin: PluginHandle;

    /// Plugin entries in the order the registry reports them
    fn plugins(&self) -> &[Self::Plugin];

    /// Declared primary executable
    fn bundle_executable(&self) -> &str;

    /// Bundle directory on the device
    fn bundle_path(&self) -> &str;
}

/// A plugin (app extension) registered under an application
pub trait PluginHandle {
    /// The extension's own bundle identifier
    fn bundle_identifier(&self) -> &str;

    /// The extension's info dictionary
    fn info_plist(&self) -> &InfoDictionary;
}

impl<T: ApplicationHandle + ?Sized> ApplicationHandle for &T {
    type Plugin = T::Plugin;

    fn plugins(&self) -> &[Self::Plugin] {
        (**self).plugins()
    }

    fn bundle_executable(&self) -> &str {
        (**self).bundle_executable()
    }

    fn bundle_path(&self) -> &str {
        (**self).bundle_path()
    }
}
