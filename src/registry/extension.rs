//! Extension metadata
//!
//! Converts a plugin entry's untyped info dictionary into a validated
//! [`ExtensionInfo`]. Missing or non-string fields are reported as
//! `MalformedEntry` instead of leaking into the computed path.

use serde::{Deserialize, Serialize};

use super::{INFO_EXECUTABLE_KEY, INFO_PATH_KEY, InfoDictionary, PluginHandle};
use crate::error::{Result, registry};

/// An app extension registered under a host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
    /// The extension's own bundle identifier
    pub id: String,

    /// Installation directory of the extension bundle
    pub path: String,

    /// Executable file name inside `path`
    pub executable: String,

    /// `path` joined with `executable`
    pub absolute_path: String,
}

impl ExtensionInfo {
    /// Build extension metadata from a registry plugin entry
    pub fn from_plugin(plugin: &impl PluginHandle, separator: char) -> Result<Self> {
        let id = plugin.bundle_identifier().to_string();
        let info = plugin.info_plist();

        let path = required_string(info, INFO_PATH_KEY, &id)?;
        let executable = required_string(info, INFO_EXECUTABLE_KEY, &id)?;
        let absolute_path = join_path(&path, &executable, separator);

        Ok(Self {
            id,
            path,
            executable,
            absolute_path,
        })
    }
}

/// Fetch a non-empty string value from an info dictionary
fn required_string(info: &InfoDictionary, key: &str, extension_id: &str) -> Result<String> {
    match info.get(key).and_then(serde_json::Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(registry::malformed_entry(extension_id, key)),
    }
}

/// Join a directory and a file name with `separator`
///
/// Trailing separators on `dir` are collapsed so the result never contains a
/// doubled separator at the join point.
pub fn join_path(dir: &str, file: &str, separator: char) -> String {
    let dir = dir.trim_end_matches(separator);
    format!("{dir}{separator}{file}")
}
