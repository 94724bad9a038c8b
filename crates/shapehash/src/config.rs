// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fingerprint generator configuration.
//!
//! Supports both programmatic (builder) and file-based (TOML) configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::catalog::TypeDefinition;

/// Name of the version-counter member injected by the versioning step.
pub const DEFAULT_RESERVED_MEMBER: &str = "Version";

/// The string type is iterable but always hashed as a leaf.
pub const DEFAULT_STRING_TYPE: &str = "System.String";

/// Default bound on expansions of one generic definition along a path.
pub const DEFAULT_MAX_GENERIC_NESTING: usize = 64;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings that shape how fingerprints are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Member name that is never part of a fingerprint.
    #[serde(default = "default_reserved_member")]
    pub reserved_member: String,

    /// Fully-qualified name of the string type.
    #[serde(default = "default_string_type")]
    pub string_type: String,

    /// Contracts marking a generic type as a collection (iteration or
    /// key/value-pair contracts), by name without arity suffix.
    #[serde(default = "default_collection_contracts")]
    pub collection_contracts: Vec<String>,

    /// How often one generic definition may be expanded along a single path
    /// (`Node<T>` holding `Node<Node<T>>`). Distinct types nest without limit.
    #[serde(default = "default_max_generic_nesting")]
    pub max_generic_nesting: usize,
}

fn default_reserved_member() -> String {
    DEFAULT_RESERVED_MEMBER.to_string()
}

fn default_string_type() -> String {
    DEFAULT_STRING_TYPE.to_string()
}

fn default_collection_contracts() -> Vec<String> {
    [
        "System.Collections.IEnumerable",
        "System.Collections.Generic.IEnumerable",
        "System.Collections.Generic.ICollection",
        "System.Collections.Generic.IList",
        "System.Collections.Generic.IDictionary",
        "System.Collections.Generic.IReadOnlyCollection",
        "System.Collections.Generic.IReadOnlyList",
        "System.Collections.Generic.IReadOnlyDictionary",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn default_max_generic_nesting() -> usize {
    DEFAULT_MAX_GENERIC_NESTING
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            reserved_member: default_reserved_member(),
            string_type: default_string_type(),
            collection_contracts: default_collection_contracts(),
            max_generic_nesting: DEFAULT_MAX_GENERIC_NESTING,
        }
    }
}

impl HashConfig {
    /// Create a new config builder
    pub fn builder() -> HashConfigBuilder {
        HashConfigBuilder::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HashConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reserved_member.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "reserved_member must not be empty".to_string(),
            ));
        }
        if self.string_type.trim().is_empty() {
            return Err(ConfigError::Invalid("string_type must not be empty".to_string()));
        }
        if self.max_generic_nesting == 0 {
            return Err(ConfigError::Invalid(
                "max_generic_nesting must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_reserved(&self, member_name: &str) -> bool {
        member_name == self.reserved_member
    }

    pub fn is_string_type(&self, definition: &TypeDefinition) -> bool {
        definition.name == self.string_type
    }

    /// Whether the definition is, or implements, an iteration/mapping contract.
    pub fn is_enumerable(&self, definition: &TypeDefinition) -> bool {
        std::iter::once(&definition.name)
            .chain(definition.contracts.iter())
            .any(|name| self.collection_contracts.iter().any(|c| c == name))
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct HashConfigBuilder {
    reserved_member: Option<String>,
    string_type: Option<String>,
    collection_contracts: Option<Vec<String>>,
    extra_contracts: Vec<String>,
    max_generic_nesting: Option<usize>,
}

impl HashConfigBuilder {
    pub fn reserved_member(mut self, name: impl Into<String>) -> Self {
        self.reserved_member = Some(name.into());
        self
    }

    pub fn string_type(mut self, name: impl Into<String>) -> Self {
        self.string_type = Some(name.into());
        self
    }

    /// Replace the default collection contracts.
    pub fn collection_contracts<I, S>(mut self, contracts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collection_contracts = Some(contracts.into_iter().map(Into::into).collect());
        self
    }

    /// Add one contract on top of the (default or replaced) list.
    pub fn collection_contract(mut self, contract: impl Into<String>) -> Self {
        self.extra_contracts.push(contract.into());
        self
    }

    pub fn max_generic_nesting(mut self, limit: usize) -> Self {
        self.max_generic_nesting = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<HashConfig, ConfigError> {
        let defaults = HashConfig::default();

        let mut collection_contracts = self
            .collection_contracts
            .unwrap_or(defaults.collection_contracts);
        collection_contracts.extend(self.extra_contracts);

        let config = HashConfig {
            reserved_member: self.reserved_member.unwrap_or(defaults.reserved_member),
            string_type: self.string_type.unwrap_or(defaults.string_type),
            collection_contracts,
            max_generic_nesting: self
                .max_generic_nesting
                .unwrap_or(defaults.max_generic_nesting),
        };
        config.validate()?;
        Ok(config)
    }
}
