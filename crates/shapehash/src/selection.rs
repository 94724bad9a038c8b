// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member-selection policy.
//!
//! A type that marks *any* of its members with the serialization opt-in
//! marker is hashed over its marked members only ([`SelectionMode::Explicit`]).
//! A type without markers (typically a library type that cannot be
//! annotated) is hashed over all public readable members
//! ([`SelectionMode::Implicit`]). The reserved version member is dropped in
//! both modes.
//!
//! The decision is local to the definition: base and derived types are never
//! consulted.

use crate::catalog::{MemberDefinition, TypeDefinition};
use crate::config::HashConfig;

/// Which members of a type take part in its fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Only members carrying the opt-in marker.
    Explicit,
    /// All public readable members.
    Implicit,
}

impl SelectionMode {
    /// Decide the mode for a definition.
    ///
    /// The reserved member is ignored here as well: the versioning step may
    /// inject it together with an opt-in marker, and that must not flip an
    /// unmarked type into explicit mode.
    pub fn for_definition(definition: &TypeDefinition, config: &HashConfig) -> Self {
        let marked = definition
            .members
            .iter()
            .any(|m| m.opt_in && !config.is_reserved(&m.name));
        if marked {
            SelectionMode::Explicit
        } else {
            SelectionMode::Implicit
        }
    }

    /// Whether `member` is selected under this mode (reserved member aside).
    pub fn admits(self, member: &MemberDefinition) -> bool {
        match self {
            SelectionMode::Explicit => member.opt_in,
            SelectionMode::Implicit => member.public && member.readable,
        }
    }
}

/// Members of `definition` that contribute to its fingerprint, in
/// declaration order.
pub fn select_members<'d>(
    definition: &'d TypeDefinition,
    config: &HashConfig,
) -> (SelectionMode, Vec<&'d MemberDefinition>) {
    let mode = SelectionMode::for_definition(definition, config);
    let members = definition
        .members
        .iter()
        .filter(|m| !config.is_reserved(&m.name) && mode.admits(m))
        .collect();
    (mode, members)
}
