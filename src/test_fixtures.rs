//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Provides synthetic Mach-O images and a small app bundle tree so scanner
//! and inspector tests do not each hand-assemble bytes.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{MachOBuilder, create_app_bundle};
//!
//! let bytes = MachOBuilder::new(MH_EXECUTE).encryption(0x4000, 0x8000, 1).build();
//! let (temp, bundle) = create_app_bundle();
//! ```

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use tempfile::TempDir;

use crate::macho::{LC_ENCRYPTION_INFO_64, MH_DYLIB, MH_EXECUTE, MH_MAGIC_64};

/// `LC_SEGMENT_64`, used as filler load command
const LC_SEGMENT_64: u32 = 0x19;

/// ARM64 CPU type
const CPU_TYPE_ARM64: u32 = 0x0100_000C;

/// Builder for minimal little-endian 64-bit Mach-O images
pub struct MachOBuilder {
    file_type: u32,
    commands: Vec<Vec<u8>>,
}

impl MachOBuilder {
    pub fn new(file_type: u32) -> Self {
        Self {
            file_type,
            commands: Vec::new(),
        }
    }

    /// Append a filler segment command of `size` bytes (at least 8)
    pub fn segment(mut self, size: u32) -> Self {
        let mut command = Vec::with_capacity(size as usize);
        command.extend_from_slice(&LC_SEGMENT_64.to_le_bytes());
        command.extend_from_slice(&size.to_le_bytes());
        command.resize(size as usize, 0);
        self.commands.push(command);
        self
    }

    /// Append an `LC_ENCRYPTION_INFO_64` command
    pub fn encryption(mut self, crypt_offset: u32, crypt_size: u32, crypt_id: u32) -> Self {
        let mut command = Vec::with_capacity(24);
        command.extend_from_slice(&LC_ENCRYPTION_INFO_64.to_le_bytes());
        command.extend_from_slice(&24u32.to_le_bytes());
        command.extend_from_slice(&crypt_offset.to_le_bytes());
        command.extend_from_slice(&crypt_size.to_le_bytes());
        command.extend_from_slice(&crypt_id.to_le_bytes());
        command.extend_from_slice(&0u32.to_le_bytes());
        self.commands.push(command);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let commands_size: usize = self.commands.iter().map(Vec::len).sum();
        let command_count = u32::try_from(self.commands.len()).expect("too many commands");
        let commands_size = u32::try_from(commands_size).expect("commands too large");

        let mut bytes = Vec::new();
        for word in [
            MH_MAGIC_64,
            CPU_TYPE_ARM64,
            0,
            self.file_type,
            command_count,
            commands_size,
            0,
            0,
        ] {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        for command in self.commands {
            bytes.extend_from_slice(&command);
        }
        // Some section data so the image is not all header
        bytes.extend_from_slice(&[0xAB; 64]);
        bytes
    }
}

/// An encrypted executable image
pub fn encrypted_executable() -> Vec<u8> {
    MachOBuilder::new(MH_EXECUTE)
        .segment(72)
        .encryption(0x4000, 0x8000, 1)
        .build()
}

/// An encrypted dylib image
pub fn encrypted_dylib() -> Vec<u8> {
    MachOBuilder::new(MH_DYLIB)
        .encryption(0x4000, 0x2000, 1)
        .build()
}

/// An unencrypted dylib image
pub fn plain_dylib() -> Vec<u8> {
    MachOBuilder::new(MH_DYLIB)
        .encryption(0x4000, 0x2000, 0)
        .build()
}

/// Create a temp directory in the system temp location.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create test files in a directory.
///
/// Takes a list of (path, content) tuples and creates those files.
/// Paths are relative to the provided base directory.
pub fn create_test_files(temp: &TempDir, files: &[(&str, &[u8])]) {
    for (path, content) in files {
        let full_path = temp.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Create a pulled `Example.app` bundle with two extensions.
///
/// Layout:
/// - `Example` (encrypted executable, main)
/// - `Frameworks/Core.framework/Core` (encrypted dylib)
/// - `Frameworks/Plain.framework/Plain` (unencrypted dylib)
/// - `PlugIns/Widget.appex/Widget` (encrypted executable)
/// - `PlugIns/Share.appex/Share` (encrypted executable)
/// - signing and store artifacts removed by cleanup
///
/// Returns the `TempDir` and the bundle root.
#[must_use]
pub fn create_app_bundle() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let executable = encrypted_executable();
    let dylib = encrypted_dylib();
    let plain = plain_dylib();

    create_test_files(
        &temp,
        &[
            ("Example.app/Example", &executable[..]),
            ("Example.app/Info.plist", &b"<plist/>"[..]),
            ("Example.app/Frameworks/Core.framework/Core", &dylib[..]),
            ("Example.app/Frameworks/Plain.framework/Plain", &plain[..]),
            ("Example.app/PlugIns/Widget.appex/Widget", &executable[..]),
            ("Example.app/PlugIns/Widget.appex/Info.plist", &b"<plist/>"[..]),
            (
                "Example.app/PlugIns/Widget.appex/_CodeSignature/CodeResources",
                &b"<plist/>"[..],
            ),
            ("Example.app/PlugIns/Share.appex/Share", &executable[..]),
            ("Example.app/iTunesMetadata.plist", &b"<plist/>"[..]),
            ("Example.app/embedded.mobileprovision", &b"profile"[..]),
            ("Example.app/SC_Info/Example.sinf", &b"sinf"[..]),
            ("Example.app/_CodeSignature/CodeResources", &b"<plist/>"[..]),
        ],
    );

    let root = temp.path().join("Example.app");
    (temp, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_app_bundle() {
        let (_temp, root) = create_app_bundle();
        assert!(root.join("Example").is_file());
        assert!(root.join("PlugIns/Widget.appex/Widget").is_file());
        assert!(root.join("SC_Info").is_dir());
    }

    #[test]
    fn test_builder_header_fields() {
        let bytes = MachOBuilder::new(MH_EXECUTE).segment(24).build();
        assert_eq!(&bytes[0..4], &MH_MAGIC_64.to_le_bytes());
        assert_eq!(&bytes[16..20], &1u32.to_le_bytes());
        assert_eq!(&bytes[20..24], &24u32.to_le_bytes());
    }
}
