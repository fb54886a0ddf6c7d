//! Configuration file (config.yaml) data structures and lookup

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// Config file name inside the per-user and system config directories
pub const CONFIG_FILE: &str = "config.yaml";

/// Config file name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "bundlescope.yaml";

/// Application directory name under the config roots
const APP_DIR: &str = "bundlescope";

/// Contents of a configuration file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Registry snapshot to query
    pub registry: Option<PathBuf>,

    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Verbosity (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Emit JSON lines instead of text
    pub json: Option<bool>,
}

impl ConfigFile {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Read a config file, returning `None` if it does not exist
    ///
    /// A relative `registry` path is resolved against the file's directory.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(config::read_failed(
                    path.display().to_string(),
                    e.to_string(),
                ));
            }
        };

        let mut file = Self::from_yaml(&content)
            .map_err(|e| config::parse_failed(path.display().to_string(), reason_of(e)))?;

        if let Some(registry) = file.registry.take() {
            file.registry = Some(match path.parent() {
                Some(dir) if registry.is_relative() => dir.join(registry),
                _ => registry,
            });
        }

        Ok(Some(file))
    }

    /// Load the first config file found in the default search paths
    pub fn discover() -> Result<Option<(PathBuf, Self)>> {
        for path in search_paths() {
            if let Some(file) = Self::read(&path)? {
                return Ok(Some((path, file)));
            }
        }
        Ok(None)
    }
}

/// Default config file locations, most specific first
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR).join(CONFIG_FILE));
    }

    paths.push(Path::new("/etc").join(APP_DIR).join(CONFIG_FILE));
    paths
}

fn reason_of(err: crate::error::BundlescopeError) -> String {
    match err {
        crate::error::BundlescopeError::ConfigParseFailed { reason, .. } => reason,
        other => other.to_string(),
    }
}
