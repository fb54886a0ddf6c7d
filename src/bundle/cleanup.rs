//! App bundle cleanup
//!
//! Store receipts, provisioning profiles, FairPlay info and code signatures do
//! not survive decryption, so they are stripped from the pulled bundle.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use super::ensure_bundle_dir;
use crate::error::Result;

/// Files removed from the bundle root only
pub const REMOVE_ROOT_FILES: &[&str] = &["iTunesMetadata.plist", "embedded.mobileprovision"];

/// Directories removed wherever they occur in the bundle
pub const REMOVE_DIRS: &[&str] = &["SC_Info", "_CodeSignature"];

/// Paths removed by a cleanup pass, relative to the bundle root
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
}

/// Strip store and signing artifacts from the bundle at `root`
///
/// Individual removal failures are logged and skipped.
pub fn cleanup_app_bundle(root: &Path) -> Result<CleanupReport> {
    ensure_bundle_dir(root)?;

    let mut report = CleanupReport::default();

    for file in REMOVE_ROOT_FILES {
        let path = root.join(file);
        match std::fs::remove_file(&path) {
            Ok(()) => report.removed.push(PathBuf::from(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove file");
            }
        }
    }

    let mut entries = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read bundle entry");
                continue;
            }
        };

        let is_target = entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| REMOVE_DIRS.contains(&name));

        if !is_target {
            continue;
        }

        entries.skip_current_dir();

        match std::fs::remove_dir_all(entry.path()) {
            Ok(()) => {
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                report.removed.push(relative.to_path_buf());
            }
            Err(e) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "Failed to remove directory"
                );
            }
        }
    }

    tracing::info!(removed = report.removed.len(), "Cleaned up app bundle");

    Ok(report)
}
