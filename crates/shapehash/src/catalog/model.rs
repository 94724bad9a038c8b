// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type metadata model as exposed by a compiled-module reader.
//!
//! Definitions are generic *definitions* (`IDictionary` with arity 2); members
//! refer to their value types through [`TypeRef`], which may construct a
//! generic type or point at one of the declaring type's generic parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a member's value type.
///
/// In a JSON snapshot a named reference is an object
/// (`{"name": "System.Int32"}`) and a generic parameter is its bare
/// position (`0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    /// A named type, optionally constructed with generic arguments.
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<TypeRef>,
    },
    /// The n-th generic parameter of the declaring type definition.
    Parameter(usize),
}

impl TypeRef {
    /// Reference to a non-generic type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Reference to a constructed generic type.
    pub fn generic(name: impl Into<String>, arguments: impl IntoIterator<Item = TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Reference to a generic parameter of the declaring type.
    pub const fn parameter(index: usize) -> Self {
        TypeRef::Parameter(index)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, arguments } => {
                write!(f, "{}", name)?;
                if !arguments.is_empty() {
                    write!(f, "[")?;
                    for (idx, arg) in arguments.iter().enumerate() {
                        if idx > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }
            TypeRef::Parameter(index) => write!(f, "!{}", index),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::named(name)
    }
}

fn default_true() -> bool {
    true
}

/// A readable property or field declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDefinition {
    pub name: String,
    pub value_type: TypeRef,

    /// Carries the serialization opt-in marker.
    #[serde(default)]
    pub opt_in: bool,

    #[serde(default = "default_true")]
    pub public: bool,

    /// Has an accessible getter.
    #[serde(default = "default_true")]
    pub readable: bool,
}

impl MemberDefinition {
    /// Public, readable, unmarked member.
    pub fn new(name: impl Into<String>, value_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            opt_in: false,
            public: true,
            readable: true,
        }
    }

    /// Mark the member with the serialization opt-in marker.
    pub fn opt_in(mut self) -> Self {
        self.opt_in = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// A type definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Fully-qualified name without arity suffix (e.g. `System.Tuple`).
    pub name: String,

    #[serde(default)]
    pub generic_arity: usize,

    /// Names of implemented interfaces/contracts.
    #[serde(default)]
    pub contracts: Vec<String>,

    /// Declared members, in declaration order.
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
}

impl TypeDefinition {
    /// Start building a definition.
    pub fn builder(name: impl Into<String>) -> TypeDefinitionBuilder {
        TypeDefinitionBuilder {
            definition: TypeDefinition {
                name: name.into(),
                generic_arity: 0,
                contracts: Vec::new(),
                members: Vec::new(),
            },
        }
    }

    /// Definition with no members, contracts or generic parameters.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    pub fn member(&self, name: &str) -> Option<&MemberDefinition> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Fluent builder for [`TypeDefinition`].
#[derive(Debug)]
pub struct TypeDefinitionBuilder {
    definition: TypeDefinition,
}

impl TypeDefinitionBuilder {
    pub fn generic_arity(mut self, arity: usize) -> Self {
        self.definition.generic_arity = arity;
        self
    }

    /// Declare an implemented interface/contract.
    pub fn contract(mut self, name: impl Into<String>) -> Self {
        self.definition.contracts.push(name.into());
        self
    }

    /// Add a public, readable, unmarked member.
    pub fn member(self, name: impl Into<String>, value_type: impl Into<TypeRef>) -> Self {
        self.with_member(MemberDefinition::new(name, value_type))
    }

    /// Add a member carrying the opt-in marker.
    pub fn data_member(self, name: impl Into<String>, value_type: impl Into<TypeRef>) -> Self {
        self.with_member(MemberDefinition::new(name, value_type).opt_in())
    }

    pub fn with_member(mut self, member: MemberDefinition) -> Self {
        self.definition.members.push(member);
        self
    }

    pub fn build(self) -> TypeDefinition {
        self.definition
    }
}
