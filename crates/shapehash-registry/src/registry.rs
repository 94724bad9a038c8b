// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use shapehash::{FingerprintDigest, HashError};
use thiserror::Error;

use crate::diff::{diff_shapes, ShapeDiff};

// ---------------------------------------------------------------------------
// FingerprintEntry
// ---------------------------------------------------------------------------

/// One recorded shape of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintEntry {
    /// Fully-qualified type name (e.g. "Shop.Model/Order").
    pub type_name: String,
    /// Version counter; 0 for the first recorded shape.
    pub version: u32,
    /// Fingerprint text (may be empty).
    pub hash: String,
    /// Digest of `hash` for fast equality checks.
    pub digest: FingerprintDigest,
    /// Timestamp of recording.
    pub recorded_at: SystemTime,
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors produced by the fingerprint registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The type name is empty.
    #[error("type name is empty")]
    EmptyTypeName,
    /// Nothing recorded under the given name.
    #[error("no fingerprint recorded for {0}")]
    NotFound(String),
    /// Generic I/O or persistence error.
    #[error("I/O error: {0}")]
    Io(String),
    /// The on-disk ledger disagrees with itself.
    #[error("inconsistent ledger at {path}: {reason}")]
    Corrupt { path: String, reason: String },
    /// An entry could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The current fingerprint could not be computed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

// ---------------------------------------------------------------------------
// MigrationCheck
// ---------------------------------------------------------------------------

/// Outcome of comparing a current fingerprint with the recorded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationCheck {
    /// The type has never been recorded.
    Unrecorded,
    /// Shape unchanged since `version`.
    UpToDate { version: u32 },
    /// Shape changed; stored data at `recorded_version` needs a migration
    /// step to `next_version`.
    MigrationRequired {
        recorded_version: u32,
        next_version: u32,
        diff: ShapeDiff,
    },
}

impl MigrationCheck {
    pub fn requires_migration(&self) -> bool {
        matches!(self, MigrationCheck::MigrationRequired { .. })
    }
}

// ---------------------------------------------------------------------------
// FingerprintRegistry
// ---------------------------------------------------------------------------

/// In-memory ledger of recorded fingerprints keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct FingerprintRegistry {
    /// Map from type name to its versions (index = version).
    entries: HashMap<String, Vec<FingerprintEntry>>,
}

impl FingerprintRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct a registry from a raw map (used by persistence layer).
    pub(crate) fn from_raw(entries: HashMap<String, Vec<FingerprintEntry>>) -> Self {
        FingerprintRegistry { entries }
    }

    /// Expose the inner map (used by persistence layer).
    pub(crate) fn inner(&self) -> &HashMap<String, Vec<FingerprintEntry>> {
        &self.entries
    }

    /// Record the current fingerprint of a type.
    ///
    /// Returns the version the type is at afterwards: 0 on first record, the
    /// latest version if `hash` matches it, otherwise latest + 1.
    pub fn record(&mut self, type_name: &str, hash: &str) -> Result<u32, RegistryError> {
        if type_name.trim().is_empty() {
            return Err(RegistryError::EmptyTypeName);
        }

        let digest = FingerprintDigest::compute(hash);
        let versions = self.entries.entry(type_name.to_string()).or_default();

        if let Some(latest) = versions.last() {
            if latest.digest == digest && latest.hash == hash {
                return Ok(latest.version);
            }
        }

        let version = versions.last().map_or(0, |latest| latest.version + 1);
        versions.push(FingerprintEntry {
            type_name: type_name.to_string(),
            version,
            hash: hash.to_string(),
            digest,
            recorded_at: SystemTime::now(),
        });

        log::info!("{} recorded at version {} ({})", type_name, version, digest);
        Ok(version)
    }

    /// Compare `hash` with the latest recorded fingerprint of `type_name`.
    pub fn check(&self, type_name: &str, hash: &str) -> MigrationCheck {
        match self.get_latest(type_name) {
            None => MigrationCheck::Unrecorded,
            Some(latest) if latest.hash == hash => MigrationCheck::UpToDate {
                version: latest.version,
            },
            Some(latest) => {
                let diff = diff_shapes(&latest.hash, hash);
                log::debug!(
                    "{} changed since version {}: {}",
                    type_name,
                    latest.version,
                    diff.details().join("; ")
                );
                MigrationCheck::MigrationRequired {
                    recorded_version: latest.version,
                    next_version: latest.version + 1,
                    diff,
                }
            }
        }
    }

    /// Return the latest entry for a type, or `None` if not found.
    pub fn get_latest(&self, type_name: &str) -> Option<&FingerprintEntry> {
        self.entries.get(type_name).and_then(|v| v.last())
    }

    /// Return a specific version of a type (0-indexed).
    pub fn get_version(&self, type_name: &str, version: u32) -> Option<&FingerprintEntry> {
        let index = usize::try_from(version).ok()?;
        self.entries.get(type_name).and_then(|v| v.get(index))
    }

    /// Latest entry, or `NotFound`.
    pub fn require_latest(&self, type_name: &str) -> Result<&FingerprintEntry, RegistryError> {
        self.get_latest(type_name)
            .ok_or_else(|| RegistryError::NotFound(type_name.to_string()))
    }

    /// List all recorded type names (sorted for determinism).
    pub fn list_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// List all version numbers for a given type.
    pub fn list_versions(&self, type_name: &str) -> Vec<u32> {
        match self.entries.get(type_name) {
            Some(versions) => versions.iter().map(|e| e.version).collect(),
            None => Vec::new(),
        }
    }

    /// Total number of distinct types.
    pub fn type_count(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS_V0: &str = "System.String-City|System.String-Street";
    const ADDRESS_V1: &str = "System.String-City|System.String-Street|System.String-Zip";

    #[test]
    fn first_record_is_version_zero() {
        let mut reg = FingerprintRegistry::new();
        assert_eq!(reg.record("Ns/Address", ADDRESS_V0).unwrap(), 0);
        assert_eq!(reg.type_count(), 1);
    }

    #[test]
    fn changed_shape_increments_version() {
        let mut reg = FingerprintRegistry::new();
        reg.record("Ns/Address", ADDRESS_V0).unwrap();
        assert_eq!(reg.record("Ns/Address", ADDRESS_V1).unwrap(), 1);
        assert_eq!(reg.list_versions("Ns/Address"), vec![0, 1]);
    }

    #[test]
    fn same_shape_is_idempotent() {
        let mut reg = FingerprintRegistry::new();
        reg.record("Ns/Address", ADDRESS_V0).unwrap();
        assert_eq!(reg.record("Ns/Address", ADDRESS_V0).unwrap(), 0);
        assert_eq!(reg.list_versions("Ns/Address"), vec![0]);
    }

    #[test]
    fn reverting_to_an_older_shape_is_a_new_version() {
        let mut reg = FingerprintRegistry::new();
        reg.record("Ns/Address", ADDRESS_V0).unwrap();
        reg.record("Ns/Address", ADDRESS_V1).unwrap();
        assert_eq!(reg.record("Ns/Address", ADDRESS_V0).unwrap(), 2);
    }

    #[test]
    fn empty_fingerprint_is_recordable() {
        let mut reg = FingerprintRegistry::new();
        assert_eq!(reg.record("Ns/VersionedData", "").unwrap(), 0);
        assert_eq!(
            reg.check("Ns/VersionedData", ""),
            MigrationCheck::UpToDate { version: 0 }
        );
    }

    #[test]
    fn empty_type_name_rejected() {
        let mut reg = FingerprintRegistry::new();
        assert_eq!(
            reg.record(" ", ADDRESS_V0).unwrap_err(),
            RegistryError::EmptyTypeName
        );
    }

    #[test]
    fn check_reports_states() {
        let mut reg = FingerprintRegistry::new();
        assert_eq!(reg.check("Ns/Address", ADDRESS_V0), MigrationCheck::Unrecorded);

        reg.record("Ns/Address", ADDRESS_V0).unwrap();
        assert_eq!(
            reg.check("Ns/Address", ADDRESS_V0),
            MigrationCheck::UpToDate { version: 0 }
        );

        let check = reg.check("Ns/Address", ADDRESS_V1);
        assert!(check.requires_migration());
        match check {
            MigrationCheck::MigrationRequired {
                recorded_version,
                next_version,
                diff,
            } => {
                assert_eq!(recorded_version, 0);
                assert_eq!(next_version, 1);
                assert!(diff.details().iter().any(|d| d.contains("added member Zip")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn get_specific_version() {
        let mut reg = FingerprintRegistry::new();
        reg.record("Ns/Address", ADDRESS_V0).unwrap();
        reg.record("Ns/Address", ADDRESS_V1).unwrap();

        assert_eq!(reg.get_version("Ns/Address", 0).unwrap().hash, ADDRESS_V0);
        assert_eq!(reg.get_version("Ns/Address", 1).unwrap().hash, ADDRESS_V1);
        assert!(reg.get_version("Ns/Address", 2).is_none());
        assert_eq!(reg.get_latest("Ns/Address").unwrap().version, 1);
    }

    #[test]
    fn list_types_sorted() {
        let mut reg = FingerprintRegistry::new();
        reg.record("Zebra", "a").unwrap();
        reg.record("Alpha", "b").unwrap();
        assert_eq!(reg.list_types(), vec!["Alpha", "Zebra"]);
    }

    #[test]
    fn missing_type() {
        let reg = FingerprintRegistry::new();
        assert!(reg.get_latest("Missing").is_none());
        assert!(reg.list_versions("Missing").is_empty());
        assert_eq!(
            reg.require_latest("Missing").unwrap_err(),
            RegistryError::NotFound("Missing".to_string())
        );
    }

    #[test]
    fn entry_digest_matches_hash() {
        let mut reg = FingerprintRegistry::new();
        reg.record("Ns/Address", ADDRESS_V0).unwrap();
        let entry = reg.get_latest("Ns/Address").unwrap();
        assert_eq!(entry.digest, FingerprintDigest::compute(ADDRESS_V0));
    }
}
