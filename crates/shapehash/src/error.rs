// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for fingerprint computation and catalog loading.

use std::io;

use thiserror::Error;

/// Failures while computing a type fingerprint.
///
/// All variants are fatal for the requested type: there is no partial or
/// best-effort fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// A referenced type is not present in the catalog.
    #[error("type `{name}` referenced by `{referenced_by}` is not in the catalog")]
    UnresolvableType {
        /// Name that failed to resolve.
        name: String,
        /// Member (or entry point) holding the reference.
        referenced_by: String,
    },

    /// A constructed type supplies the wrong number of generic arguments.
    #[error("type `{name}` expects {expected} generic argument(s), found {found}")]
    GenericArityMismatch {
        /// Generic type definition name.
        name: String,
        /// Arity declared by the definition.
        expected: usize,
        /// Number of arguments supplied by the reference.
        found: usize,
    },

    /// A generic parameter was used outside of a constructed type that binds it.
    #[error("generic parameter !{index} used by `{referenced_by}` has no binding")]
    UnboundParameter {
        /// Parameter position.
        index: usize,
        /// Member (or entry point) holding the reference.
        referenced_by: String,
    },

    /// One generic definition was expanded more than
    /// `HashConfig::max_generic_nesting` times along a single path.
    ///
    /// In practice only polymorphic recursion (`Node<T>` holding a
    /// `Node<Node<T>>`) gets here, since every level is a new constructed type
    /// and never meets itself on the path.
    #[error("`{name}` expanded more than {limit} times along one path")]
    DepthLimitExceeded {
        /// Type being expanded when the limit was hit.
        name: String,
        /// Configured limit.
        limit: usize,
    },
}

/// Failures while loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type `{0}` is defined more than once")]
    DuplicateType(String),
}

/// Failures while parsing a hex-encoded digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("expected {expected} hex characters, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("invalid hex character `{0}`")]
    InvalidHex(char),
}
