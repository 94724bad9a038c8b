// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::sync::Arc;

use parking_lot::RwLock;
use shapehash::{TypeCatalog, TypeHashGenerator};

use crate::registry::{FingerprintRegistry, MigrationCheck, RegistryError};

// ---------------------------------------------------------------------------
// SharedRegistry
// ---------------------------------------------------------------------------

/// Thread-safe facade over a [`FingerprintRegistry`].
///
/// Build workers hash independent types in parallel; fingerprints are
/// computed outside the lock, which is only held to compare or record.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    registry: Arc<RwLock<FingerprintRegistry>>,
}

impl SharedRegistry {
    /// Create a new facade wrapping the given shared registry.
    pub fn new(registry: Arc<RwLock<FingerprintRegistry>>) -> Self {
        SharedRegistry { registry }
    }

    /// Fingerprint `type_name` and compare it with the recorded shape.
    pub fn check_type<C: TypeCatalog + ?Sized>(
        &self,
        generator: &TypeHashGenerator<'_, C>,
        type_name: &str,
    ) -> Result<MigrationCheck, RegistryError> {
        let hash = generator.compute_hash(type_name)?;
        Ok(self.check(type_name, &hash))
    }

    /// Fingerprint `type_name` and record it; returns the resulting version.
    pub fn record_type<C: TypeCatalog + ?Sized>(
        &self,
        generator: &TypeHashGenerator<'_, C>,
        type_name: &str,
    ) -> Result<u32, RegistryError> {
        let hash = generator.compute_hash(type_name)?;
        self.record(type_name, &hash)
    }

    pub fn check(&self, type_name: &str, hash: &str) -> MigrationCheck {
        self.registry.read().check(type_name, hash)
    }

    pub fn record(&self, type_name: &str, hash: &str) -> Result<u32, RegistryError> {
        self.registry.write().record(type_name, hash)
    }

    /// List all recorded type names.
    pub fn list_types(&self) -> Vec<String> {
        self.registry.read().list_types()
    }

    /// Point-in-time copy of the registry (e.g. for persistence).
    pub fn snapshot(&self) -> FingerprintRegistry {
        self.registry.read().clone()
    }
}

impl From<FingerprintRegistry> for SharedRegistry {
    fn from(registry: FingerprintRegistry) -> Self {
        Self::new(Arc::new(RwLock::new(registry)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
