// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-metadata catalog: the input boundary of the fingerprint generator.
//!
//! A compiled-module reader (outside this crate) produces [`TypeDefinition`]s;
//! the generator only ever sees them through the read-only [`TypeCatalog`]
//! trait. [`StaticCatalog`] is an in-memory implementation that can also be
//! loaded from a JSON snapshot.

mod model;
mod resolve;
mod store;

pub use model::{MemberDefinition, TypeDefinition, TypeDefinitionBuilder, TypeRef};
pub use resolve::TypeDescriptor;
pub use store::{StaticCatalog, TypeCatalog};
