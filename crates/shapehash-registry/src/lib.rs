// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recorded fingerprints and version counters.
//!
//! Each record type carries a version counter next to the fingerprint of the
//! shape it was last built with. At build time the current fingerprint is
//! compared with the recorded one: a mismatch means stored data needs a
//! migration step, and the counter moves to the next version.
//!
//! # Features
//!
//! - **Ledger**: record and look up fingerprints by type name and version
//! - **Checks**: up-to-date / migration-required verdicts with a member diff
//! - **Persistence**: JSON files, one per recorded version
//! - **Shared access**: lock-guarded facade for parallel build workers
//!
//! # Architecture
//!
//! ```text
//! TypeHashGenerator (shapehash)
//!        |
//!        v
//!   SharedRegistry (RwLock)
//!        |
//!        v
//!   FingerprintRegistry (in-memory)
//!        |
//!        v
//!   FilePersistence (JSON files)
//! ```

pub mod diff;
pub mod persistence;
pub mod registry;
pub mod shared;

pub use diff::{diff_shapes, MemberChange, MemberShape, ShapeDiff};
pub use persistence::FilePersistence;
pub use registry::{FingerprintEntry, FingerprintRegistry, MigrationCheck, RegistryError};
pub use shared::SharedRegistry;
