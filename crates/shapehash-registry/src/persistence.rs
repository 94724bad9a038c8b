// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! On-disk ledger of recorded fingerprints.
//!
//! Layout:
//!
//! ```text
//! {root}/
//!   {hex(type name)}/
//!     v0.json
//!     v1.json
//! ```
//!
//! Type names are hex-encoded so that every name maps to its own directory
//! (nested names contain `/`, generic ones a backtick) and the name can be
//! recovered from the directory alone. Each file also carries the type name;
//! the two must agree on load.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::registry::{FingerprintEntry, FingerprintRegistry, RegistryError};

const ENTRY_PREFIX: char = 'v';
const ENTRY_SUFFIX: &str = ".json";

/// File-backed store for a [`FingerprintRegistry`].
pub struct FilePersistence {
    root: PathBuf,
}

impl FilePersistence {
    /// Open (and create if needed) a ledger rooted at `root`.
    pub fn new(root: PathBuf) -> Result<Self, RegistryError> {
        fs::create_dir_all(&root).map_err(|e| io_error("create", &root, e))?;
        Ok(FilePersistence { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every recorded entry. Files for versions already on disk are
    /// rewritten with the same content.
    pub fn save(&self, registry: &FingerprintRegistry) -> Result<(), RegistryError> {
        let mut written = 0usize;
        for (type_name, versions) in registry.inner() {
            let dir = self.root.join(type_dir_name(type_name));
            fs::create_dir_all(&dir).map_err(|e| io_error("create", &dir, e))?;
            for entry in versions {
                write_entry(&dir, entry)?;
                written += 1;
            }
        }
        log::debug!(
            "saved {} entries for {} type(s) under {}",
            written,
            registry.type_count(),
            self.root.display()
        );
        Ok(())
    }

    /// Read the whole ledger back.
    ///
    /// Directories whose name is not a hex-encoded type name are ignored.
    /// A type directory is rejected as [`RegistryError::Corrupt`] when an
    /// entry names another type, when a file name disagrees with the version
    /// it holds, or when its versions are not contiguous from 0.
    pub fn load(&self) -> Result<FingerprintRegistry, RegistryError> {
        let mut ledger: HashMap<String, Vec<FingerprintEntry>> = HashMap::new();
        if !self.root.exists() {
            return Ok(FingerprintRegistry::from_raw(ledger));
        }

        for dir_entry in fs::read_dir(&self.root).map_err(|e| io_error("read", &self.root, e))? {
            let dir = dir_entry.map_err(|e| io_error("read", &self.root, e))?.path();
            if !dir.is_dir() {
                continue;
            }
            let Some(type_name) = dir
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(type_name_from_dir)
            else {
                log::warn!("skipping foreign directory {}", dir.display());
                continue;
            };

            let versions = read_type_dir(&dir, &type_name)?;
            if !versions.is_empty() {
                ledger.insert(type_name, versions);
            }
        }

        log::debug!("loaded {} type(s) from {}", ledger.len(), self.root.display());
        Ok(FingerprintRegistry::from_raw(ledger))
    }
}

/// Directory name for a type: lower-case hex of its UTF-8 bytes.
fn type_dir_name(type_name: &str) -> String {
    hex::encode(type_name)
}

fn type_name_from_dir(dir_name: &str) -> Option<String> {
    let bytes = hex::decode(dir_name).ok()?;
    String::from_utf8(bytes).ok().filter(|name| !name.is_empty())
}

fn entry_file_name(version: u32) -> String {
    format!("{}{}{}", ENTRY_PREFIX, version, ENTRY_SUFFIX)
}

/// Version number encoded in an entry file name (`v12.json` -> 12).
fn version_from_file_name(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(ENTRY_PREFIX)?
        .strip_suffix(ENTRY_SUFFIX)?
        .parse()
        .ok()
}

fn write_entry(dir: &Path, entry: &FingerprintEntry) -> Result<(), RegistryError> {
    let path = dir.join(entry_file_name(entry.version));
    let json = serde_json::to_string_pretty(entry)
        .map_err(|e| RegistryError::Serialization(e.to_string()))?;
    fs::write(&path, json).map_err(|e| io_error("write", &path, e))
}

fn read_type_dir(dir: &Path, type_name: &str) -> Result<Vec<FingerprintEntry>, RegistryError> {
    let mut versions = Vec::new();

    for file in fs::read_dir(dir).map_err(|e| io_error("read", dir, e))? {
        let path = file.map_err(|e| io_error("read", dir, e))?.path();
        let Some(file_version) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(version_from_file_name)
        else {
            continue;
        };

        let json = fs::read_to_string(&path).map_err(|e| io_error("read", &path, e))?;
        let entry: FingerprintEntry = serde_json::from_str(&json).map_err(|e| {
            RegistryError::Serialization(format!("{}: {}", path.display(), e))
        })?;

        if entry.type_name != type_name {
            return Err(corrupt(
                &path,
                format!("entry for `{}` stored under `{}`", entry.type_name, type_name),
            ));
        }
        if entry.version != file_version {
            return Err(corrupt(
                &path,
                format!("file holds version {}", entry.version),
            ));
        }
        versions.push(entry);
    }

    versions.sort_by_key(|e| e.version);
    for (expected, entry) in (0u32..).zip(&versions) {
        if entry.version != expected {
            return Err(corrupt(dir, format!("version {} is missing", expected)));
        }
    }
    Ok(versions)
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> RegistryError {
    RegistryError::Io(format!("failed to {} {}: {}", action, path.display(), err))
}

fn corrupt(path: &Path, reason: String) -> RegistryError {
    RegistryError::Corrupt {
        path: path.display().to_string(),
        reason,
    }
}
