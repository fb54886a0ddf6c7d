//! Mach-O inspection
//!
//! Reads just enough of a 64-bit Mach-O file to report its file type and the
//! `LC_ENCRYPTION_INFO_64` load command (FairPlay encryption range and id).
//! Anything that is not a little-endian 64-bit Mach-O, or is truncated, is
//! reported as `None` rather than as an error.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, macho};

/// Magic number of 64-bit Mach-O binaries
pub const MH_MAGIC_64: u32 = 0xFEED_FACF;

/// Demand paged executable
pub const MH_EXECUTE: u32 = 0x2;

/// Dynamically bound shared library
pub const MH_DYLIB: u32 = 0x6;

/// Dynamically bound bundle
pub const MH_BUNDLE: u32 = 0x8;

/// Encrypted segment information (64-bit)
pub const LC_ENCRYPTION_INFO_64: u32 = 0x2C;

const HEADER_SIZE: usize = 32;
const LOAD_COMMAND_SIZE: usize = 8;
const ENCRYPTION_INFO_SIZE: usize = 16;

/// File type and encryption state of a Mach-O binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachOInfo {
    /// Path of the binary (bundle-relative once collected)
    pub path: PathBuf,

    /// `filetype` from the Mach-O header
    pub file_type: u32,

    /// File offset of the `LC_ENCRYPTION_INFO_64` command, 0 if absent
    pub crypt_command_offset: u64,

    /// Offset of the encrypted range
    pub crypt_offset: u32,

    /// Size of the encrypted range
    pub crypt_size: u32,

    /// Encryption system id, 0 when not encrypted
    pub crypt_id: u32,
}

impl MachOInfo {
    pub fn is_encrypted(&self) -> bool {
        self.crypt_id != 0
    }

    pub fn is_executable(&self) -> bool {
        self.file_type == MH_EXECUTE
    }

    /// Short name of the file type
    pub fn file_type_name(&self) -> &'static str {
        match self.file_type {
            MH_EXECUTE => "executable",
            MH_DYLIB => "dylib",
            MH_BUNDLE => "bundle",
            _ => "other",
        }
    }
}

/// Parse the Mach-O file at `path`
pub fn parse_macho(path: &Path) -> Result<Option<MachOInfo>> {
    let file = File::open(path)
        .map_err(|e| macho::read_failed(path.display().to_string(), e.to_string()))?;
    let mut reader = BufReader::new(file);

    read_macho(&mut reader, path)
        .map_err(|e| macho::read_failed(path.display().to_string(), e.to_string()))
}

/// Parse a Mach-O image from `reader`, positioned at its start
pub fn read_macho<R: Read + Seek>(reader: &mut R, path: &Path) -> io::Result<Option<MachOInfo>> {
    let mut header = [0u8; HEADER_SIZE];
    if !read_exact_or_eof(reader, &mut header)? {
        return Ok(None);
    }

    if le_u32(&header, 0) != MH_MAGIC_64 {
        return Ok(None);
    }

    let file_type = le_u32(&header, 12);
    let command_count = le_u32(&header, 16);

    let mut info = MachOInfo {
        path: path.to_path_buf(),
        file_type,
        crypt_command_offset: 0,
        crypt_offset: 0,
        crypt_size: 0,
        crypt_id: 0,
    };

    for _ in 0..command_count {
        let mut command = [0u8; LOAD_COMMAND_SIZE];
        if !read_exact_or_eof(reader, &mut command)? {
            return Ok(None);
        }

        let command_type = le_u32(&command, 0);
        let command_size = le_u32(&command, 4);

        if (command_size as usize) < LOAD_COMMAND_SIZE {
            return Ok(None);
        }

        if command_type != LC_ENCRYPTION_INFO_64 {
            reader.seek(SeekFrom::Current(
                i64::from(command_size) - LOAD_COMMAND_SIZE as i64,
            ))?;
            continue;
        }

        let mut encryption = [0u8; ENCRYPTION_INFO_SIZE];
        if !read_exact_or_eof(reader, &mut encryption)? {
            return Ok(None);
        }

        let position = reader.stream_position()?;

        info.crypt_command_offset = position - (LOAD_COMMAND_SIZE + ENCRYPTION_INFO_SIZE) as u64;
        info.crypt_offset = le_u32(&encryption, 0);
        info.crypt_size = le_u32(&encryption, 4);
        info.crypt_id = le_u32(&encryption, 8);

        // Commands larger than the fixed struct carry trailing bytes
        let remaining = i64::from(command_size) - (LOAD_COMMAND_SIZE + ENCRYPTION_INFO_SIZE) as i64;
        if remaining > 0 {
            reader.seek(SeekFrom::Current(remaining))?;
        }
    }

    Ok(Some(info))
}

/// Fill `buf`, returning `false` if the input ends first
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
