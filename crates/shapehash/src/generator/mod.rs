// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type-hash generator.
//!
//! Walks a type's serializable member graph depth-first and renders a
//! canonical, order-independent, cycle-safe text fingerprint:
//!
//! ```text
//! Hash       := "" | Segments
//! Segments   := Segment ("|" Segment)*        sorted by full segment text
//! Segment    := MemberHash "-" MemberName
//! MemberHash := T                             leaf or cyclic back-reference
//!             | T "`" arity "(" Args ")"      collection, arguments in order
//!             | T "(" Segments ")"            composite
//! Args       := MemberHash ("|" MemberHash)*
//! ```
//!
//! The top-level call returns the bare `Segments` of the requested type;
//! every nested occurrence carries its `T(...)` wrapper.

mod category;
mod core;

pub use self::category::TypeCategory;
pub use self::core::{compute_hash, TypeHashGenerator};
