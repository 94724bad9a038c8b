// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Core `TypeHashGenerator` implementation.
//!

use std::collections::BTreeMap;

use super::category::TypeCategory;
use crate::catalog::{MemberDefinition, TypeCatalog, TypeDescriptor, TypeRef};
use crate::config::HashConfig;
use crate::error::HashError;
use crate::selection::SelectionMode;

const ENTRY_POINT: &str = "<entry>";

/// Types currently being expanded on the active recursion path.
///
/// Owned by a single top-level call; a type resolved through one branch is
/// resolved again when a sibling branch reaches it.
#[derive(Debug, Default)]
struct VisitedPath<'c> {
    stack: Vec<(&'c str, String)>,
}

impl<'c> VisitedPath<'c> {
    fn contains(&self, key: &str) -> bool {
        self.stack.iter().any(|(_, entry)| entry == key)
    }

    /// How many constructions of `definition` are already being expanded.
    fn expansions_of(&self, definition: &str) -> usize {
        self.stack.iter().filter(|(name, _)| *name == definition).count()
    }

    fn push(&mut self, descriptor: &TypeDescriptor<'c>) {
        self.stack.push((descriptor.name(), descriptor.path_key()));
    }

    fn pop(&mut self) {
        self.stack.pop();
    }
}

/// Computes structural fingerprints of catalog types.
///
/// The generator holds no mutable state; one instance can serve any number
/// of threads as long as the catalog is `Sync`.
pub struct TypeHashGenerator<'c, C: TypeCatalog + ?Sized> {
    catalog: &'c C,
    config: HashConfig,
}

impl<'c, C: TypeCatalog + ?Sized> TypeHashGenerator<'c, C> {
    /// Generator using [`HashConfig::default`].
    pub fn new(catalog: &'c C) -> Self {
        Self::with_config(catalog, HashConfig::default())
    }

    pub fn with_config(catalog: &'c C, config: HashConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Fingerprint of the named type as recorded next to its version counter.
    ///
    /// This is the *body* of the type's hash: the sorted member segments
    /// without the `FullName(...)` wrapper that nested occurrences carry. A
    /// type with no selected members yields the empty string.
    pub fn compute_hash(&self, name: &str) -> Result<String, HashError> {
        self.compute_hash_for(&TypeRef::named(name))
    }

    /// [`compute_hash`](Self::compute_hash) for a possibly constructed type.
    pub fn compute_hash_for(&self, type_ref: &TypeRef) -> Result<String, HashError> {
        let descriptor = TypeDescriptor::resolve(self.catalog, type_ref, None, ENTRY_POINT)?;
        let mut path = VisitedPath::default();

        match TypeCategory::of(&descriptor, &self.config) {
            TypeCategory::Leaf => Ok(String::new()),
            TypeCategory::Collection => self.argument_list(&descriptor, &mut path),
            TypeCategory::Composite { mode, members } => {
                self.composite_body(&descriptor, mode, &members, &mut path)
            }
        }
    }

    /// Hash of a type as it appears inside another type's fingerprint
    /// (wrapped as `FullName(...)` when it has a body).
    pub fn member_hash(&self, type_ref: &TypeRef) -> Result<String, HashError> {
        let descriptor = TypeDescriptor::resolve(self.catalog, type_ref, None, ENTRY_POINT)?;
        self.embedded_hash(&descriptor, &mut VisitedPath::default())
    }

    /// Fingerprints for several types, keyed by name.
    ///
    /// Each type is computed independently; the first failure aborts.
    pub fn compute_all<'n, I>(&self, names: I) -> Result<BTreeMap<String, String>, HashError>
    where
        I: IntoIterator<Item = &'n str>,
    {
        names
            .into_iter()
            .map(|name| self.compute_hash(name).map(|hash| (name.to_string(), hash)))
            .collect()
    }

    /// Hash of a member's value type; cuts cycles on the active path.
    fn reference_hash(
        &self,
        descriptor: &TypeDescriptor<'c>,
        path: &mut VisitedPath<'c>,
    ) -> Result<String, HashError> {
        if path.contains(&descriptor.path_key()) {
            log::trace!("cycle back to {}; emitting bare name", descriptor.full_name());
            return Ok(descriptor.full_name());
        }
        self.embedded_hash(descriptor, path)
    }

    fn embedded_hash(
        &self,
        descriptor: &TypeDescriptor<'c>,
        path: &mut VisitedPath<'c>,
    ) -> Result<String, HashError> {
        match TypeCategory::of(descriptor, &self.config) {
            TypeCategory::Leaf => Ok(descriptor.full_name()),
            TypeCategory::Collection => {
                let arguments = self.argument_list(descriptor, path)?;
                Ok(format!("{}({})", descriptor.full_name(), arguments))
            }
            TypeCategory::Composite { mode, members } => {
                let body = self.composite_body(descriptor, mode, &members, path)?;
                Ok(format!("{}({})", descriptor.full_name(), body))
            }
        }
    }

    /// Generic arguments in declared order; never sorted.
    fn argument_list(
        &self,
        descriptor: &TypeDescriptor<'c>,
        path: &mut VisitedPath<'c>,
    ) -> Result<String, HashError> {
        let mut hashes = Vec::with_capacity(descriptor.arity());
        for argument in descriptor.generic_arguments() {
            hashes.push(self.reference_hash(argument, path)?);
        }
        Ok(hashes.join("|"))
    }

    fn composite_body(
        &self,
        descriptor: &TypeDescriptor<'c>,
        mode: SelectionMode,
        members: &[&'c MemberDefinition],
        path: &mut VisitedPath<'c>,
    ) -> Result<String, HashError> {
        // A generic definition re-entered with ever-growing arguments never
        // meets itself on the path; bound how often it may be expanded.
        if path.expansions_of(descriptor.name()) >= self.config.max_generic_nesting {
            return Err(HashError::DepthLimitExceeded {
                name: descriptor.full_name(),
                limit: self.config.max_generic_nesting,
            });
        }

        log::debug!(
            "hashing {} over {} member(s), {:?} selection",
            descriptor.path_key(),
            members.len(),
            mode
        );

        path.push(descriptor);
        let segments = self.member_segments(descriptor, members, path);
        path.pop();

        let mut segments = segments?;
        // Whole-segment ordinal order: declaration order is irrelevant and
        // members sharing a value type still get a total order.
        segments.sort_unstable();
        Ok(segments.join("|"))
    }

    fn member_segments(
        &self,
        descriptor: &TypeDescriptor<'c>,
        members: &[&'c MemberDefinition],
        path: &mut VisitedPath<'c>,
    ) -> Result<Vec<String>, HashError> {
        let mut segments = Vec::with_capacity(members.len());
        for member in members {
            let referenced_by = format!("{}.{}", descriptor.full_name(), member.name);
            let value_type = TypeDescriptor::resolve(
                self.catalog,
                &member.value_type,
                Some(descriptor),
                &referenced_by,
            )?;
            let hash = self.reference_hash(&value_type, path)?;
            segments.push(format!("{}-{}", hash, member.name));
        }
        Ok(segments)
    }
}

/// Fingerprint of `name` with the default configuration.
pub fn compute_hash<C: TypeCatalog + ?Sized>(catalog: &C, name: &str) -> Result<String, HashError> {
    TypeHashGenerator::new(catalog).compute_hash(name)
}
