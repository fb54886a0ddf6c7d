//! Common test utilities for bundlescope integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// `filetype` of a main or extension executable
pub const MH_EXECUTE: u32 = 0x2;

/// `filetype` of a dynamic library
pub const MH_DYLIB: u32 = 0x6;

/// A scratch directory for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a text file in the workspace
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        self.write_bytes(path, content.as_bytes())
    }

    /// Write a binary file in the workspace
    pub fn write_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Check if a path exists in the workspace
    pub fn exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Copy the registry fixture into the workspace and return its path
    pub fn registry(&self) -> PathBuf {
        let content = std::fs::read_to_string(fixture_path("registry.yaml"))
            .expect("Failed to read registry fixture");
        self.write_file("registry.yaml", &content)
    }

    /// Create `Example.app` matching the `com.example.app` fixture entry
    pub fn example_bundle(&self) -> PathBuf {
        let executable = macho(MH_EXECUTE, 1);
        self.write_bytes("Example.app/Example", &executable);
        self.write_file("Example.app/Info.plist", "<plist/>");
        self.write_bytes(
            "Example.app/Frameworks/Core.framework/Core",
            &macho(MH_DYLIB, 1),
        );
        self.write_bytes(
            "Example.app/Frameworks/Plain.framework/Plain",
            &macho(MH_DYLIB, 0),
        );
        self.write_bytes("Example.app/PlugIns/Widget.appex/Widget", &executable);
        self.write_bytes("Example.app/PlugIns/Share.appex/Share", &executable);
        self.write_file(
            "Example.app/PlugIns/Share.appex/_CodeSignature/CodeResources",
            "<plist/>",
        );
        self.write_file("Example.app/iTunesMetadata.plist", "<plist/>");
        self.write_file("Example.app/embedded.mobileprovision", "profile");
        self.write_file("Example.app/SC_Info/Example.sinf", "sinf");
        self.write_file("Example.app/_CodeSignature/CodeResources", "<plist/>");
        self.path.join("Example.app")
    }

    /// A bundlescope command isolated from the developer's environment
    pub fn cmd(&self) -> Command {
        let mut cmd = bundlescope_cmd();
        cmd.current_dir(&self.path);
        cmd.env("HOME", &self.path);
        cmd.env("XDG_CONFIG_HOME", self.path.join(".config"));
        cmd
    }
}

/// The bundlescope binary with `BUNDLESCOPE_*` and `RUST_LOG` cleared
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn bundlescope_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bundlescope").expect("binary is built");
    for var in [
        "BUNDLESCOPE_REGISTRY",
        "BUNDLESCOPE_CONFIG",
        "BUNDLESCOPE_LOG_LEVEL",
        "BUNDLESCOPE_LOG_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Path of a file under `tests/common/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("common")
        .join("fixtures")
        .join(name)
}

/// A minimal 64-bit Mach-O image with one `LC_ENCRYPTION_INFO_64` command
pub fn macho(file_type: u32, crypt_id: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for word in [0xFEED_FACF_u32, 0x0100_000C, 0, file_type, 1, 24, 0, 0] {
        bytes.extend_from_slice(&u32::to_le_bytes(word));
    }
    for word in [0x2C_u32, 24, 0x4000, 0x8000, crypt_id, 0] {
        bytes.extend_from_slice(&u32::to_le_bytes(word));
    }
    bytes.extend_from_slice(&[0xAB; 64]);
    bytes
}
