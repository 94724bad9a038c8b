// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member-level diff of two top-level fingerprints.
//!
//! A top-level fingerprint is a `|`-joined list of `TypeHash-MemberName`
//! segments. Nested bodies also contain `|`, so segments are split only at
//! parenthesis depth 0, and each segment is split at its *last* `-`.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// One member as it appears in a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberShape {
    pub name: String,
    /// Hash of the member's value type (possibly a nested body).
    pub type_hash: String,
}

/// A single difference between two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberChange {
    Added(MemberShape),
    Removed(MemberShape),
    Retyped {
        name: String,
        old_type: String,
        new_type: String,
    },
}

/// All member differences between two shapes, ordered by member name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeDiff {
    pub changes: Vec<MemberChange>,
}

impl ShapeDiff {
    pub fn is_identical(&self) -> bool {
        self.changes.is_empty()
    }

    /// Human-readable description of each change.
    pub fn details(&self) -> Vec<String> {
        self.changes
            .iter()
            .map(|change| match change {
                MemberChange::Added(m) => format!("added member {}: {}", m.name, m.type_hash),
                MemberChange::Removed(m) => {
                    format!("removed member {}: {}", m.name, m.type_hash)
                }
                MemberChange::Retyped {
                    name,
                    old_type,
                    new_type,
                } => format!("changed type of {}: {} -> {}", name, old_type, new_type),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split a fingerprint into its top-level segments.
pub fn split_segments(hash: &str) -> Vec<&str> {
    if hash.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, c) in hash.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                segments.push(&hash[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&hash[start..]);
    segments
}

/// Parse a top-level fingerprint into its members.
pub fn parse_members(hash: &str) -> Vec<MemberShape> {
    split_segments(hash)
        .into_iter()
        .map(|segment| match segment.rsplit_once('-') {
            Some((type_hash, name)) => MemberShape {
                name: name.to_string(),
                type_hash: type_hash.to_string(),
            },
            None => MemberShape {
                name: String::new(),
                type_hash: segment.to_string(),
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Diff two top-level fingerprints.
pub fn diff_shapes(old: &str, new: &str) -> ShapeDiff {
    let old_map: BTreeMap<String, String> = parse_members(old)
        .into_iter()
        .map(|m| (m.name, m.type_hash))
        .collect();
    let new_map: BTreeMap<String, String> = parse_members(new)
        .into_iter()
        .map(|m| (m.name, m.type_hash))
        .collect();

    let mut changes = Vec::new();

    for (name, old_type) in &old_map {
        match new_map.get(name) {
            None => changes.push(MemberChange::Removed(MemberShape {
                name: name.clone(),
                type_hash: old_type.clone(),
            })),
            Some(new_type) if new_type != old_type => changes.push(MemberChange::Retyped {
                name: name.clone(),
                old_type: old_type.clone(),
                new_type: new_type.clone(),
            }),
            Some(_) => {}
        }
    }

    for (name, new_type) in &new_map {
        if !old_map.contains_key(name) {
            changes.push(MemberChange::Added(MemberShape {
                name: name.clone(),
                type_hash: new_type.clone(),
            }));
        }
    }

    changes.sort_by(|a, b| change_name(a).cmp(change_name(b)));
    ShapeDiff { changes }
}

fn change_name(change: &MemberChange) -> &str {
    match change {
        MemberChange::Added(m) | MemberChange::Removed(m) => &m.name,
        MemberChange::Retyped { name, .. } => name,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
