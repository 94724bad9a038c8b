// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolution of [`TypeRef`]s into constructed [`TypeDescriptor`]s.

use super::model::{TypeDefinition, TypeRef};
use super::store::TypeCatalog;
use crate::error::HashError;

/// A resolved, fully constructed type.
///
/// Borrows its definition from the catalog and owns its (already resolved)
/// generic arguments, so `IDictionary<Int32, Person>` is one descriptor for
/// `IDictionary` with two argument descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor<'c> {
    definition: &'c TypeDefinition,
    arguments: Vec<TypeDescriptor<'c>>,
}

impl<'c> TypeDescriptor<'c> {
    /// Resolve `type_ref`.
    ///
    /// `context` is the constructed type declaring the reference; generic
    /// parameters are substituted with its arguments. `referenced_by` only
    /// feeds error messages.
    pub fn resolve<C: TypeCatalog + ?Sized>(
        catalog: &'c C,
        type_ref: &TypeRef,
        context: Option<&TypeDescriptor<'c>>,
        referenced_by: &str,
    ) -> Result<Self, HashError> {
        match type_ref {
            TypeRef::Parameter(index) => context
                .and_then(|ctx| ctx.arguments.get(*index))
                .cloned()
                .ok_or_else(|| HashError::UnboundParameter {
                    index: *index,
                    referenced_by: referenced_by.to_string(),
                }),
            TypeRef::Named { name, arguments } => {
                let definition =
                    catalog
                        .definition(name)
                        .ok_or_else(|| HashError::UnresolvableType {
                            name: name.clone(),
                            referenced_by: referenced_by.to_string(),
                        })?;

                if definition.generic_arity != arguments.len() {
                    return Err(HashError::GenericArityMismatch {
                        name: name.clone(),
                        expected: definition.generic_arity,
                        found: arguments.len(),
                    });
                }

                let arguments = arguments
                    .iter()
                    .map(|arg| Self::resolve(catalog, arg, context, referenced_by))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Self {
                    definition,
                    arguments,
                })
            }
        }
    }

    pub fn definition(&self) -> &'c TypeDefinition {
        self.definition
    }

    /// Definition name without arity suffix.
    pub fn name(&self) -> &'c str {
        &self.definition.name
    }

    pub fn generic_arguments(&self) -> &[TypeDescriptor<'c>] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Name as it appears in fingerprints: ``System.Tuple`2`` for generic
    /// types, the plain name otherwise.
    pub fn full_name(&self) -> String {
        if self.arguments.is_empty() {
            self.definition.name.clone()
        } else {
            format!("{}`{}", self.definition.name, self.arguments.len())
        }
    }

    /// Complete constructed identity, e.g. ``Ns/Node`1[System.Int32]``.
    ///
    /// Two occurrences are the same node of the type graph iff their keys match.
    pub fn path_key(&self) -> String {
        let mut key = self.full_name();
        if !self.arguments.is_empty() {
            key.push('[');
            for (idx, arg) in self.arguments.iter().enumerate() {
                if idx > 0 {
                    key.push(',');
                }
                key.push_str(&arg.path_key());
            }
            key.push(']');
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with(TypeDefinition::leaf("System.Int32"))
            .with(TypeDefinition::leaf("System.String"))
            .with(
                TypeDefinition::builder("System.Tuple")
                    .generic_arity(2)
                    .member("Item1", TypeRef::parameter(0))
                    .member("Item2", TypeRef::parameter(1))
                    .build(),
            )
    }

    #[test]
    fn resolves_plain_type() {
        let catalog = catalog();
        let d = TypeDescriptor::resolve(&catalog, &"System.Int32".into(), None, "test").unwrap();
        assert_eq!(d.full_name(), "System.Int32");
        assert_eq!(d.path_key(), "System.Int32");
        assert_eq!(d.arity(), 0);
    }

    #[test]
    fn constructed_names_carry_arity() {
        let catalog = catalog();
        let tuple = TypeRef::generic(
            "System.Tuple",
            [TypeRef::named("System.Int32"), TypeRef::named("System.String")],
        );
        let d = TypeDescriptor::resolve(&catalog, &tuple, None, "test").unwrap();
        assert_eq!(d.full_name(), "System.Tuple`2");
        assert_eq!(d.path_key(), "System.Tuple`2[System.Int32,System.String]");
    }

    #[test]
    fn parameters_bind_to_context_arguments() {
        let catalog = catalog();
        let tuple = TypeRef::generic(
            "System.Tuple",
            [TypeRef::named("System.Int32"), TypeRef::named("System.String")],
        );
        let ctx = TypeDescriptor::resolve(&catalog, &tuple, None, "test").unwrap();
        let second =
            TypeDescriptor::resolve(&catalog, &TypeRef::parameter(1), Some(&ctx), "Item2").unwrap();
        assert_eq!(second.name(), "System.String");
    }

    #[test]
    fn unbound_parameter_is_an_error() {
        let catalog = catalog();
        let err =
            TypeDescriptor::resolve(&catalog, &TypeRef::parameter(0), None, "Ns/T.Value").unwrap_err();
        assert_eq!(
            err,
            HashError::UnboundParameter {
                index: 0,
                referenced_by: "Ns/T.Value".to_string()
            }
        );
    }

    #[test]
    fn unknown_type_is_unresolvable() {
        let catalog = catalog();
        let err = TypeDescriptor::resolve(&catalog, &"Ns/Missing".into(), None, "Ns/Person.Home")
            .unwrap_err();
        assert!(matches!(err, HashError::UnresolvableType { name, .. } if name == "Ns/Missing"));
    }

    #[test]
    fn arity_mismatch_is_reported() {
        let catalog = catalog();
        let bad = TypeRef::generic("System.Tuple", [TypeRef::named("System.Int32")]);
        let err = TypeDescriptor::resolve(&catalog, &bad, None, "test").unwrap_err();
        assert_eq!(
            err,
            HashError::GenericArityMismatch {
                name: "System.Tuple".to_string(),
                expected: 2,
                found: 1
            }
        );
    }
}
