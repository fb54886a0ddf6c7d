//! Local app bundle scanning
//!
//! This module handles a copy of an app bundle pulled off a device:
//! - Removing store and signing artifacts (via [`cleanup`])
//! - Collecting encrypted Mach-O binaries (via [`binaries`])
//! - Mapping registry paths onto the bundle tree (via [`layout`])
//! - Splitting binaries by owner, main app or extension (via [`binaries`])
//!
//! [`inspect_bundle`] runs the whole pass.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BundlescopeError, Result};

pub mod binaries;
pub mod cleanup;
pub mod layout;

pub use binaries::{BinarySplit, collect_binaries, split_binaries};
pub use cleanup::{CleanupReport, cleanup_app_bundle};
pub use layout::BundleLayout;

/// Result of scanning one app bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleReport {
    pub bundle_dir: PathBuf,

    /// Present when cleanup ran before the scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupReport>,

    pub layout: BundleLayout,

    pub binaries: BinarySplit,
}

/// Optionally clean `root`, then collect and split its encrypted binaries
pub fn inspect_bundle(root: &Path, layout: BundleLayout, clean: bool) -> Result<BundleReport> {
    ensure_bundle_dir(root)?;

    let cleanup = if clean {
        Some(cleanup_app_bundle(root)?)
    } else {
        None
    };

    let binaries = split_binaries(collect_binaries(root)?, &layout);

    Ok(BundleReport {
        bundle_dir: root.to_path_buf(),
        cleanup,
        layout,
        binaries,
    })
}

/// Fail unless `root` is an existing directory
fn ensure_bundle_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(BundlescopeError::BundleDirNotFound {
            path: root.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::layout::ExtensionLayout;
    use crate::test_fixtures::{create_app_bundle, create_temp_dir};

    fn layout() -> BundleLayout {
        BundleLayout {
            main: PathBuf::from("Example"),
            extensions: vec![ExtensionLayout {
                id: "com.example.app.widget".to_string(),
                dir: PathBuf::from("PlugIns/Widget.appex"),
            }],
        }
    }

    #[test]
    fn test_inspect_without_cleanup_leaves_bundle_alone() {
        let (_temp, root) = create_app_bundle();

        let report = inspect_bundle(&root, layout(), false).unwrap();

        assert!(report.cleanup.is_none());
        assert!(root.join("SC_Info").is_dir());
        assert_eq!(report.binaries.len(), 4);
        assert_eq!(report.binaries.extensions["com.example.app.widget"].len(), 1);
        // Share.appex is not in the layout, so its executable stays with the app
        assert_eq!(
            report.binaries.unassigned_executables,
            vec![PathBuf::from("PlugIns/Share.appex/Share")]
        );
    }

    #[test]
    fn test_inspect_with_cleanup() {
        let (_temp, root) = create_app_bundle();

        let report = inspect_bundle(&root, layout(), true).unwrap();

        assert_eq!(report.cleanup.map(|c| c.removed.len()), Some(5));
        assert!(!root.join("SC_Info").exists());
    }

    #[test]
    fn test_inspect_missing_dir() {
        let temp = create_temp_dir();
        assert!(matches!(
            inspect_bundle(&temp.path().join("Gone.app"), layout(), true),
            Err(BundlescopeError::BundleDirNotFound { .. })
        ));
    }
}
