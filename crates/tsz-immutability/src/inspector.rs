//! The boundary between the classifier and the host type system.
//!
//! The classifier never builds or owns types. Everything it knows about a type
//! comes through a [`TypeInspector`], which adapts whatever representation the
//! host uses (a checker's interned types, the in-memory [`TypeGraph`], ...).
//!
//! [`TypeGraph`]: crate::type_graph::TypeGraph

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Stable identity of a type within one analysis session.
///
/// Two handles for the same logical type (including repeated expansions of a
/// recursive type) must yield the same identity. Used as the memoization key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity(pub u64);

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural category of a type, as far as immutability is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// `A | B | C`
    Union,
    /// `A & B & C`
    Intersection,
    /// `T extends U ? X : Y`
    Conditional,
    /// `[A, B]` or `readonly [A, B]`
    Tuple { readonly: bool },
    /// `T[]`, `readonly T[]`, `Array<T>`, `ReadonlyArray<T>`
    Array,
    /// Anything with call or construct signatures.
    Callable,
    /// Plain object types, interfaces and class instances.
    Object,
    /// Primitives, literals and everything else without structure.
    Primitive,
}

impl TypeCategory {
    pub const fn name(self) -> &'static str {
        match self {
            TypeCategory::Union => "union",
            TypeCategory::Intersection => "intersection",
            TypeCategory::Conditional => "conditional",
            TypeCategory::Tuple { .. } => "tuple",
            TypeCategory::Array => "array",
            TypeCategory::Callable => "callable",
            TypeCategory::Object => "object",
            TypeCategory::Primitive => "primitive",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An own property of an object-like type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo<H> {
    pub name: Arc<str>,
    /// `readonly` as seen through this type (after mapped-type modifiers).
    pub readonly_in_type: bool,
    pub is_method: bool,
    /// `#private` fields, unreachable from outside the declaring class.
    pub is_private: bool,
    /// `None` violates the inspector contract.
    pub declared_type: Option<H>,
}

/// Key type of an index signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    String,
    Number,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexSignatureInfo<H> {
    pub readonly: bool,
    pub value_type: H,
}

/// The names a type can be matched by in an override table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeNames {
    /// `Map`
    pub bare_name: Option<String>,
    /// `Map<string, number>`
    pub name_with_arguments: Option<String>,
    /// Name of the type alias the type was reached through.
    pub alias_name: Option<String>,
    pub alias_with_arguments: Option<String>,
}

impl TypeNames {
    /// Candidate names in matching order.
    pub fn candidates(&self) -> SmallVec<[&str; 4]> {
        [
            &self.bare_name,
            &self.name_with_arguments,
            &self.alias_name,
            &self.alias_with_arguments,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .collect()
    }

    pub fn is_anonymous(&self) -> bool {
        self.candidates().is_empty()
    }
}

/// Violations of the [`TypeInspector`] contract.
///
/// These never describe a property of the analysed code: a well-formed
/// adapter cannot produce them. They abort the query instead of degrading
/// the verdict to `Unknown`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InspectError {
    #[error("type handle {identity} does not belong to this inspector")]
    UnknownHandle { identity: TypeIdentity },

    #[error("type {identity} was reserved but never defined")]
    UndefinedType { identity: TypeIdentity },

    #[error("property `{property}` of type {identity} has no declared type")]
    MissingDeclaredType {
        identity: TypeIdentity,
        property: Arc<str>,
    },

    #[error("expected {expected} type for {identity}, found {found}")]
    CategoryMismatch {
        identity: TypeIdentity,
        expected: &'static str,
        found: TypeCategory,
    },
}

/// Structural facts about types of a host type system.
///
/// Sequences are returned in declaration order; the classifier's results are
/// only deterministic if the inspector's orders are.
pub trait TypeInspector {
    type Handle: Copy + fmt::Debug;

    fn identity(&self, ty: Self::Handle) -> TypeIdentity;

    fn category(&self, ty: Self::Handle) -> Result<TypeCategory, InspectError>;

    fn union_members(&self, ty: Self::Handle) -> Result<Vec<Self::Handle>, InspectError>;

    fn intersection_members(&self, ty: Self::Handle) -> Result<Vec<Self::Handle>, InspectError>;

    /// `(true_type, false_type)`
    fn conditional_branches(
        &self,
        ty: Self::Handle,
    ) -> Result<(Self::Handle, Self::Handle), InspectError>;

    /// Own properties. For intersections this is the merged view of all members.
    fn own_properties(
        &self,
        ty: Self::Handle,
    ) -> Result<Vec<PropertyInfo<Self::Handle>>, InspectError>;

    /// Type arguments of a generic instantiation; element types for arrays and tuples.
    fn type_arguments(&self, ty: Self::Handle) -> Result<Vec<Self::Handle>, InspectError>;

    fn index_signature(
        &self,
        ty: Self::Handle,
        kind: IndexKind,
    ) -> Result<Option<IndexSignatureInfo<Self::Handle>>, InspectError>;

    fn names_for_override_matching(&self, ty: Self::Handle) -> Result<TypeNames, InspectError>;
}
