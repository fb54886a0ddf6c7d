//! Encrypted binary collection and ownership split

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use super::{BundleLayout, ensure_bundle_dir};
use crate::error::Result;
use crate::macho::{MachOInfo, parse_macho};

/// Collect encrypted Mach-O binaries under `root`
///
/// Paths in the result are relative to `root` and sorted. Files that fail to
/// parse are logged and skipped.
pub fn collect_binaries(root: &Path) -> Result<Vec<MachOInfo>> {
    ensure_bundle_dir(root)?;

    let mut binaries = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read bundle entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
    {
        let info = match parse_macho(entry.path()) {
            Ok(Some(info)) => info,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "Failed to parse Mach-O binary"
                );
                continue;
            }
        };

        if !info.is_encrypted() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        tracing::debug!(
            path = %relative.display(),
            file_type = info.file_type_name(),
            crypt_id = info.crypt_id,
            "Collected binary"
        );

        binaries.push(MachOInfo {
            path: relative,
            ..info
        });
    }

    tracing::info!(count = binaries.len(), "Collected encrypted binaries");

    Ok(binaries)
}

/// Binaries grouped by owner
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinarySplit {
    /// Binaries belonging to the main application, keyed by bundle-relative path
    pub app: BTreeMap<String, MachOInfo>,

    /// Binaries per extension id, keyed by bundle-relative path
    pub extensions: BTreeMap<String, BTreeMap<String, MachOInfo>>,

    /// Executables found outside every extension that are not the main executable
    pub unassigned_executables: Vec<PathBuf>,
}

impl BinarySplit {
    /// Total number of binaries across all groups
    pub fn len(&self) -> usize {
        self.app.len() + self.extensions.values().map(BTreeMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split collected binaries into main-app and per-extension groups
///
/// Each binary goes to the first extension (in registry order) whose directory
/// contains it, otherwise to the app group.
pub fn split_binaries(binaries: Vec<MachOInfo>, layout: &BundleLayout) -> BinarySplit {
    let mut split = BinarySplit::default();

    for binary in binaries {
        let key = binary.path.to_string_lossy().into_owned();

        if let Some(owner) = layout.owner_of(&binary.path) {
            split
                .extensions
                .entry(owner.id.clone())
                .or_default()
                .insert(key, binary);
            continue;
        }

        if binary.is_executable() && binary.path != layout.main {
            tracing::warn!(
                path = %binary.path.display(),
                "Executable is not within an extension; an extension likely requires a \
                 MinimumOSVersion higher than the device OS and will stay encrypted"
            );
            split.unassigned_executables.push(binary.path.clone());
        }

        split.app.insert(key, binary);
    }

    split
}
