// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type fingerprints for versioned (de)serialization.
//!
//! A record type's serializable shape is reduced to a canonical text
//! fingerprint. Comparing it with the fingerprint recorded for the previous
//! build tells whether stored data needs a migration step before it can be
//! loaded into the new shape.
//!
//! # Overview
//!
//! - **Catalog**: read-only type metadata supplied by a compiled-module
//!   reader ([`TypeCatalog`], [`StaticCatalog`])
//! - **Selection**: explicit (opt-in markers) vs implicit (public readable)
//!   member selection ([`SelectionMode`])
//! - **Generator**: the depth-first, cycle-safe walk ([`TypeHashGenerator`])
//! - **Digest**: optional MD5 digest of a fingerprint ([`FingerprintDigest`])
//!
//! # Example
//!
//! ```
//! use shapehash::{compute_hash, StaticCatalog, TypeDefinition};
//!
//! let catalog = StaticCatalog::new()
//!     .with(TypeDefinition::leaf("System.String"))
//!     .with(
//!         TypeDefinition::builder("Ns/Address")
//!             .data_member("Street", "System.String")
//!             .data_member("City", "System.String")
//!             .data_member("Version", "System.Int32")
//!             .build(),
//!     );
//!
//! let hash = compute_hash(&catalog, "Ns/Address").unwrap();
//! assert_eq!(hash, "System.String-City|System.String-Street");
//! ```
//!
//! # Guarantees
//!
//! - Same shape, same string; member declaration order never matters.
//! - The reserved version member (default `Version`) never affects the string.
//! - Self-referential graphs terminate: a back-reference renders as the bare
//!   type name.
//!
//! # Feature Flags
//!
//! - `digest` (default): [`FingerprintDigest`] (requires `md-5`)

pub mod catalog;
pub mod config;
#[cfg(feature = "digest")]
mod digest;
mod error;
pub mod generator;
pub mod selection;

pub use catalog::{
    MemberDefinition, StaticCatalog, TypeCatalog, TypeDefinition, TypeDescriptor, TypeRef,
};
pub use config::{ConfigError, HashConfig, HashConfigBuilder, DEFAULT_RESERVED_MEMBER};
#[cfg(feature = "digest")]
pub use digest::FingerprintDigest;
pub use error::{CatalogError, DigestError, HashError};
pub use generator::{compute_hash, TypeCategory, TypeHashGenerator};
pub use selection::{select_members, SelectionMode};
