// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::catalog::{MemberDefinition, TypeDescriptor};
use crate::config::HashConfig;
use crate::selection::{select_members, SelectionMode};

/// How a type contributes to a fingerprint. Decided once per type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCategory<'c> {
    /// Hashed as its full name: the string type, or nothing selected.
    Leaf,
    /// Generic enumerable/mapping type, hashed over its ordered arguments.
    Collection,
    /// Hashed over its selected members (never empty).
    Composite {
        mode: SelectionMode,
        members: Vec<&'c MemberDefinition>,
    },
}

impl<'c> TypeCategory<'c> {
    pub fn of(descriptor: &TypeDescriptor<'c>, config: &HashConfig) -> Self {
        let definition = descriptor.definition();

        if config.is_string_type(definition) {
            return TypeCategory::Leaf;
        }

        if descriptor.arity() > 0 && config.is_enumerable(definition) {
            return TypeCategory::Collection;
        }

        let (mode, members) = select_members(definition, config);
        if members.is_empty() {
            TypeCategory::Leaf
        } else {
            TypeCategory::Composite { mode, members }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StaticCatalog, TypeDefinition, TypeRef};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with(
                TypeDefinition::builder("System.String")
                    .contract("System.Collections.IEnumerable")
                    .member("Length", "System.Int32")
                    .build(),
            )
            .with(TypeDefinition::leaf("System.Int32"))
            .with(
                TypeDefinition::builder("System.Collections.Generic.List")
                    .generic_arity(1)
                    .contract("System.Collections.Generic.IList")
                    .member("Count", "System.Int32")
                    .build(),
            )
            .with(
                TypeDefinition::builder("Ns/Bag")
                    .contract("System.Collections.IEnumerable")
                    .member("Count", "System.Int32")
                    .build(),
            )
            .with(
                TypeDefinition::builder("Ns/Versioned")
                    .data_member("Version", "System.Int32")
                    .build(),
            )
    }

    fn category_of(catalog: &StaticCatalog, r: TypeRef) -> TypeCategory<'_> {
        let d = TypeDescriptor::resolve(catalog, &r, None, "test").unwrap();
        TypeCategory::of(&d, &HashConfig::default())
    }

    #[test]
    fn string_is_always_leaf() {
        let catalog = catalog();
        assert_eq!(category_of(&catalog, "System.String".into()), TypeCategory::Leaf);
    }

    #[test]
    fn memberless_type_is_leaf() {
        let catalog = catalog();
        assert_eq!(category_of(&catalog, "System.Int32".into()), TypeCategory::Leaf);
        assert_eq!(category_of(&catalog, "Ns/Versioned".into()), TypeCategory::Leaf);
    }

    #[test]
    fn generic_enumerable_is_collection() {
        let catalog = catalog();
        let list = TypeRef::generic("System.Collections.Generic.List", [TypeRef::named("System.Int32")]);
        assert_eq!(category_of(&catalog, list), TypeCategory::Collection);
    }

    #[test]
    fn non_generic_enumerable_falls_back_to_members() {
        let catalog = catalog();
        assert!(matches!(
            category_of(&catalog, "Ns/Bag".into()),
            TypeCategory::Composite {
                mode: SelectionMode::Implicit,
                ..
            }
        ));
    }
}
