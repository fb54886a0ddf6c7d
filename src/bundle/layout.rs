//! Registry paths mapped onto a local bundle tree
//!
//! The registry reports device paths such as
//! `/private/var/containers/Bundle/Application/<UUID>/Example.app/PlugIns/Widget.appex`.
//! Binaries collected from a pulled bundle are relative to the `.app` root, so
//! both are brought into the same bundle-relative form here.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::registry::ExtensionInfo;

/// Bundle-relative locations of the main executable and each extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleLayout {
    /// Main executable, relative to the bundle root
    pub main: PathBuf,

    /// Extension directories, in registry order
    pub extensions: Vec<ExtensionLayout>,
}

/// One extension's bundle-relative directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionLayout {
    pub id: String,
    pub dir: PathBuf,
}

impl BundleLayout {
    /// Build the layout from registry answers
    ///
    /// `bundle_path` is the application's bundle directory on the device.
    /// `main_executable` may be a bare file name or a device path.
    pub fn from_registry(
        bundle_path: &str,
        main_executable: &str,
        extensions: &[ExtensionInfo],
        separator: char,
    ) -> Self {
        let main = if main_executable.contains(separator) {
            relative_to_bundle(bundle_path, main_executable, separator)
        } else {
            PathBuf::from(main_executable)
        };

        let extensions = extensions
            .iter()
            .map(|ext| ExtensionLayout {
                id: ext.id.clone(),
                dir: relative_to_bundle(bundle_path, &ext.path, separator),
            })
            .collect();

        Self { main, extensions }
    }

    /// The extension owning `path`, if any (component-wise prefix match)
    pub fn owner_of(&self, path: &Path) -> Option<&ExtensionLayout> {
        self.extensions
            .iter()
            .filter(|ext| !ext.dir.as_os_str().is_empty())
            .find(|ext| path.starts_with(&ext.dir))
    }
}

/// Express a device path relative to the application's bundle directory
///
/// Falls back to everything after the last `.app` component when the device
/// path does not start with `bundle_path` (e.g. `/var` vs `/private/var`).
fn relative_to_bundle(bundle_path: &str, device_path: &str, separator: char) -> PathBuf {
    let bundle = bundle_path.trim_end_matches(separator);

    if !bundle.is_empty() {
        if let Some(rest) = device_path.strip_prefix(bundle) {
            if rest.is_empty() || rest.starts_with(separator) {
                return to_path(rest, separator);
            }
        }
    }

    let components: Vec<&str> = device_path
        .split(separator)
        .filter(|c| !c.is_empty())
        .collect();

    match components.iter().rposition(|c| c.ends_with(".app")) {
        Some(idx) => components[idx + 1..].iter().collect(),
        None => to_path(device_path, separator),
    }
}

fn to_path(path: &str, separator: char) -> PathBuf {
    path.split(separator).filter(|c| !c.is_empty()).collect()
}
