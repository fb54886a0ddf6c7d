//! Registry adapter backed by an exported snapshot file
//!
//! A snapshot is a YAML (or JSON) document listing installed applications
//! together with their plugin entries and info dictionaries, in the order the
//! device registry enumerated them.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ApplicationHandle, ApplicationInfo, ApplicationRegistry, BundleId, DEFAULT_SEPARATOR,
    InfoDictionary, PluginHandle,
};
use crate::error::{BundlescopeError, Result, registry};

/// On-disk registry snapshot document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Separator used by paths in this snapshot
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Registered applications
    #[serde(default)]
    pub applications: Vec<ApplicationEntry>,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            applications: Vec::new(),
        }
    }
}

/// One registered application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub identifier: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub build: String,

    /// Bundle directory on the device
    #[serde(default)]
    pub path: String,

    /// Primary executable as declared by the registry
    pub executable: String,

    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

#[allow(dead_code)] // Used by tests
impl ApplicationEntry {
    pub fn new(identifier: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: String::new(),
            version: String::new(),
            build: String::new(),
            path: String::new(),
            executable: executable.into(),
            plugins: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_plugin(mut self, plugin: PluginEntry) -> Self {
        self.plugins.push(plugin);
        self
    }
}

/// One plugin (app extension) entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub identifier: String,

    #[serde(default)]
    pub info: InfoDictionary,
}

#[allow(dead_code)] // Used by tests
impl PluginEntry {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            info: InfoDictionary::new(),
        }
    }

    /// Set an info dictionary entry
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }
}

impl ApplicationHandle for ApplicationEntry {
    type Plugin = PluginEntry;

    fn plugins(&self) -> &[PluginEntry] {
        &self.plugins
    }

    fn bundle_executable(&self) -> &str {
        &self.executable
    }

    fn bundle_path(&self) -> &str {
        &self.path
    }
}

impl PluginHandle for PluginEntry {
    fn bundle_identifier(&self) -> &str {
        &self.identifier
    }

    fn info_plist(&self) -> &InfoDictionary {
        &self.info
    }
}

/// Application registry served from a snapshot
#[derive(Debug, Clone)]
pub struct SnapshotRegistry {
    separator: char,
    applications: Vec<ApplicationEntry>,
    by_id: HashMap<String, usize>,
}

impl SnapshotRegistry {
    /// Create a registry from a parsed snapshot
    pub fn new(snapshot: RegistrySnapshot) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(snapshot.applications.len());

        for (idx, app) in snapshot.applications.iter().enumerate() {
            if app.identifier.trim().is_empty() {
                return Err(registry::load_failed(
                    "<snapshot>",
                    format!("application #{} has an empty identifier", idx + 1),
                ));
            }
            if app.executable.is_empty() {
                return Err(registry::load_failed(
                    "<snapshot>",
                    format!("application '{}' has no executable", app.identifier),
                ));
            }
            if by_id.insert(app.identifier.clone(), idx).is_some() {
                return Err(BundlescopeError::DuplicateApplication {
                    bundle_id: app.identifier.clone(),
                });
            }
        }

        Ok(Self {
            separator: snapshot.separator,
            applications: snapshot.applications,
            by_id,
        })
    }

    /// Parse a YAML snapshot
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let snapshot: RegistrySnapshot = serde_yaml::from_str(yaml)?;
        Self::new(snapshot)
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: RegistrySnapshot =
            serde_json::from_str(json).map_err(|e| registry::load_failed("<json>", e.to_string()))?;
        Self::new(snapshot)
    }

    /// Load a snapshot file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| registry::load_failed(&shown, e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };

        let registry = parsed.map_err(|e| match e {
            BundlescopeError::DuplicateApplication { .. } => e,
            BundlescopeError::RegistryLoadFailed { reason, .. }
            | BundlescopeError::ConfigParseFailed { reason, .. } => {
                registry::load_failed(&shown, reason)
            }
            other => registry::load_failed(&shown, other.to_string()),
        })?;

        tracing::debug!(
            path = %shown,
            applications = registry.applications.len(),
            "Loaded registry snapshot"
        );

        Ok(registry)
    }

    /// Number of registered applications
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

impl ApplicationRegistry for SnapshotRegistry {
    type Application<'r> = &'r ApplicationEntry;

    fn application_for_identifier(
        &self,
        bundle_id: &BundleId,
    ) -> Result<Option<Self::Application<'_>>> {
        Ok(self
            .by_id
            .get(bundle_id.as_str())
            .and_then(|&idx| self.applications.get(idx)))
    }

    fn applications(&self) -> Result<Vec<ApplicationInfo>> {
        Ok(self
            .applications
            .iter()
            .map(|app| ApplicationInfo {
                identifier: app.identifier.clone(),
                name: app.name.clone(),
                version: app.version.clone(),
                build: app.build.clone(),
                path: app.path.clone(),
            })
            .collect())
    }

    fn path_separator(&self) -> char {
        self.separator
    }
}
