// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::TypeDefinition;
use crate::error::CatalogError;

/// Read-only lookup of type definitions by fully-qualified name.
///
/// The catalog is treated as an immutable snapshot for the duration of a
/// fingerprint computation. Implementations that are `Sync` can be shared by
/// several threads hashing different types at once.
pub trait TypeCatalog {
    /// Return the definition registered under `name`, if any.
    fn definition(&self, name: &str) -> Option<&TypeDefinition>;
}

impl<T: TypeCatalog + ?Sized> TypeCatalog for &T {
    fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        (**self).definition(name)
    }
}

/// On-disk snapshot format: `{"types": [ ... ]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogSnapshot {
    #[serde(default)]
    types: Vec<TypeDefinition>,
}

/// In-memory catalog keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    types: HashMap<String, TypeDefinition>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, returning the one it replaced.
    pub fn insert(&mut self, definition: TypeDefinition) -> Option<TypeDefinition> {
        self.types.insert(definition.name.clone(), definition)
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, definition: TypeDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered names (sorted for determinism).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse a JSON snapshot. Duplicate names are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for definition in snapshot.types {
            let name = definition.name.clone();
            if catalog.insert(definition).is_some() {
                return Err(CatalogError::DuplicateType(name));
            }
        }
        log::debug!("loaded catalog snapshot with {} type(s)", catalog.len());
        Ok(catalog)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the catalog as a snapshot (types sorted by name).
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut types: Vec<TypeDefinition> = self.types.values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(serde_json::to_string_pretty(&CatalogSnapshot { types })?)
    }
}

impl TypeCatalog for StaticCatalog {
    fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }
}

impl FromIterator<TypeDefinition> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "types": [
            {"name": "System.String"},
            {"name": "Ns/Address", "members": [
                {"name": "City", "value_type": {"name": "System.String"}, "opt_in": true}
            ]}
        ]
    }"#;

    #[test]
    fn loads_snapshot() {
        let catalog = StaticCatalog::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["Ns/Address", "System.String"]);
        let address = catalog.definition("Ns/Address").unwrap();
        assert!(address.members[0].opt_in);
    }

    #[test]
    fn rejects_duplicate_definitions() {
        let json = r#"{"types": [{"name": "A"}, {"name": "A"}]}"#;
        let err = StaticCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateType(name) if name == "A"));
    }

    #[test]
    fn snapshot_survives_serialization() {
        let catalog = StaticCatalog::from_json_str(SNAPSHOT).unwrap();
        let json = catalog.to_json_string().unwrap();
        let reloaded = StaticCatalog::from_json_str(&json).unwrap();
        assert_eq!(reloaded.definition("Ns/Address"), catalog.definition("Ns/Address"));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, SNAPSHOT).unwrap();
        let catalog = StaticCatalog::from_json_file(&path).unwrap();
        assert!(catalog.definition("System.String").is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticCatalog::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
