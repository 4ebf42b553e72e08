//! An arena-backed [`TypeInspector`].
//!
//! `TypeGraph` stores a small structural model of TypeScript types: enough to
//! drive the classifier without a host checker. Tests and benchmarks build
//! their fixtures with it, and embedders without a type system of their own
//! can lower into it.
//!
//! ## Recursive types
//!
//! ```
//! use tsz_immutability::type_graph::{PrimitiveKind, PropertyDef, TypeData, TypeGraph, ObjectShape};
//!
//! // type List = { readonly next: List | null }
//! let mut graph = TypeGraph::new();
//! let list = graph.reserve();
//! let null = graph.primitive(PrimitiveKind::Null);
//! let next = graph.union(vec![list, null]);
//! graph
//!     .define(list, TypeData::Object(ObjectShape::new(vec![PropertyDef::readonly("next", next)])))
//!     .unwrap();
//! ```
//!
//! ## Synthetic members
//!
//! | Type | Name | Properties | Type arguments | Number index |
//! |------|------|------------|----------------|--------------|
//! | `T[]` | `Array` | `length` | `[T]` | `T` |
//! | `readonly T[]` | `ReadonlyArray` | `readonly length` | `[T]` | `readonly T` |
//! | `[A, B]` | | `0`, `1`, `length` | `[A, B]` | |
//! | `readonly [A, B]` | | `readonly 0`, `readonly 1`, `readonly length` | `[A, B]` | |
//!
//! Intersections are merged when they are built: a property is readonly
//! only if every declaration is, and conflicting declared types are
//! intersected. Each member set is interned, so merging `A & B` whose
//! properties again intersect `A` and `B` refers back to the same id. An
//! intersection over a reserved member is merged again once that member is
//! defined.

use crate::inspector::{
    IndexKind, IndexSignatureInfo, InspectError, PropertyInfo, TypeCategory, TypeIdentity,
    TypeInspector, TypeNames,
};
use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance IDs to `TypeGraph` instances.
/// Keeps identities from different graphs apart in a shared cache.
static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(1);

/// Nesting depth beyond which type names are abbreviated.
const MAX_DISPLAY_DEPTH: u32 = 4;

/// Property name -> combined flags and every distinct declared type.
type MergedProperties =
    IndexMap<Arc<str>, (PropertyFlags, SmallVec<[Option<TypeId>; 2]>), FxBuildHasher>;

/// Index of a type in its [`TypeGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
}

impl PrimitiveKind {
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Never => "never",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::BigInt => "bigint",
            PrimitiveKind::String => "string",
            PrimitiveKind::Symbol => "symbol",
        }
    }
}

bitflags! {
    /// Modifiers of a property declaration.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        const READONLY = 1 << 0;
        const METHOD = 1 << 1;
        /// `#name`
        const PRIVATE = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: Arc<str>,
    /// `None` models a broken declaration; inspecting it is an error.
    pub type_id: Option<TypeId>,
    pub flags: PropertyFlags,
}

impl PropertyDef {
    pub fn new(name: &str, type_id: TypeId, flags: PropertyFlags) -> Self {
        Self {
            name: Arc::from(name),
            type_id: Some(type_id),
            flags,
        }
    }

    /// `name: T`
    pub fn mutable(name: &str, type_id: TypeId) -> Self {
        Self::new(name, type_id, PropertyFlags::empty())
    }

    /// `readonly name: T`
    pub fn readonly(name: &str, type_id: TypeId) -> Self {
        Self::new(name, type_id, PropertyFlags::READONLY)
    }

    /// `name(): R`, where `type_id` is the method's function type.
    pub fn method(name: &str, type_id: TypeId) -> Self {
        Self::new(name, type_id, PropertyFlags::METHOD)
    }

    /// `#name: T`
    pub fn private(name: &str, type_id: TypeId) -> Self {
        Self::new(name, type_id, PropertyFlags::PRIVATE)
    }

    pub fn untyped(name: &str, flags: PropertyFlags) -> Self {
        Self {
            name: Arc::from(name),
            type_id: None,
            flags,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexSignature {
    pub value_type: TypeId,
    pub readonly: bool,
}

/// Members of an object-like type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectShape {
    /// Declared name of interfaces, classes and generic instantiations.
    pub name: Option<Arc<str>>,
    pub type_arguments: Vec<TypeId>,
    pub properties: Vec<PropertyDef>,
    pub string_index: Option<IndexSignature>,
    pub number_index: Option<IndexSignature>,
}

impl ObjectShape {
    /// An anonymous object literal type.
    pub fn new(properties: Vec<PropertyDef>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// A named type such as `interface Point` or `Map<K, V>`.
    pub fn named(name: &str, type_arguments: Vec<TypeId>, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: Some(Arc::from(name)),
            type_arguments,
            properties,
            ..Self::default()
        }
    }

    pub fn with_string_index(mut self, value_type: TypeId, readonly: bool) -> Self {
        self.string_index = Some(IndexSignature {
            value_type,
            readonly,
        });
        self
    }

    pub fn with_number_index(mut self, value_type: TypeId, readonly: bool) -> Self {
        self.number_index = Some(IndexSignature {
            value_type,
            readonly,
        });
        self
    }

    fn index(&self, kind: IndexKind) -> Option<IndexSignature> {
        match kind {
            IndexKind::String => self.string_index,
            IndexKind::Number => self.number_index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    Primitive(PrimitiveKind),
    Object(ObjectShape),
    /// Has call or construct signatures; the shape holds any own properties.
    Callable(ObjectShape),
    Array(ObjectShape),
    Tuple {
        shape: ObjectShape,
        readonly: bool,
    },
    Union(Vec<TypeId>),
    Intersection {
        members: Vec<TypeId>,
        /// Merged view of the members' properties and index signatures.
        merged: ObjectShape,
        /// A member that was reserved but not yet defined when the
        /// intersection was built.
        unresolved: Option<TypeId>,
    },
    Conditional {
        true_type: TypeId,
        false_type: TypeId,
    },
}

impl TypeData {
    pub const fn category(&self) -> TypeCategory {
        match self {
            TypeData::Primitive(_) => TypeCategory::Primitive,
            TypeData::Object(_) => TypeCategory::Object,
            TypeData::Callable(_) => TypeCategory::Callable,
            TypeData::Array(_) => TypeCategory::Array,
            TypeData::Tuple { readonly, .. } => TypeCategory::Tuple {
                readonly: *readonly,
            },
            TypeData::Union(_) => TypeCategory::Union,
            TypeData::Intersection { .. } => TypeCategory::Intersection,
            TypeData::Conditional { .. } => TypeCategory::Conditional,
        }
    }

    /// Own members, for object-like types.
    pub const fn shape(&self) -> Option<&ObjectShape> {
        match self {
            TypeData::Object(shape)
            | TypeData::Callable(shape)
            | TypeData::Array(shape)
            | TypeData::Tuple { shape, .. }
            | TypeData::Intersection { merged: shape, .. } => Some(shape),
            TypeData::Primitive(_) | TypeData::Union(_) | TypeData::Conditional { .. } => None,
        }
    }
}

#[derive(Clone, Debug)]
struct AliasInfo {
    name: Arc<str>,
    type_arguments: Vec<TypeId>,
}

/// Arena of types; `TypeId`s index into it.
///
/// A graph holds at most `u32::MAX` types.
#[derive(Debug)]
pub struct TypeGraph {
    graph_id: u32,
    types: Vec<Option<TypeData>>,
    primitives: FxHashMap<PrimitiveKind, TypeId>,
    aliases: FxHashMap<TypeId, AliasInfo>,
    /// Sorted, deduplicated member set -> intersection id.
    intersections: FxHashMap<Vec<TypeId>, TypeId>,
    /// Undefined member -> intersections waiting for it.
    dependents: FxHashMap<TypeId, SmallVec<[TypeId; 2]>>,
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraph {
    pub fn new() -> Self {
        let graph_id = NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed);
        trace!(graph_id, "TypeGraph::new");
        Self {
            graph_id,
            types: Vec::new(),
            primitives: FxHashMap::default(),
            aliases: FxHashMap::default(),
            intersections: FxHashMap::default(),
            dependents: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// # Panics
    ///
    /// When the graph already holds `u32::MAX` types.
    fn push(&mut self, data: Option<TypeData>) -> TypeId {
        let id = next_type_id(self.types.len());
        self.types.push(data);
        id
    }

    pub fn add(&mut self, data: TypeData) -> TypeId {
        self.push(Some(data))
    }

    /// Allocate an id to be filled in later with [`define`](Self::define).
    pub fn reserve(&mut self) -> TypeId {
        self.push(None)
    }

    /// Fill in a reserved id. Redefining an id replaces its data.
    ///
    /// Intersections built while `id` was still undefined are merged again.
    pub fn define(&mut self, id: TypeId, data: TypeData) -> Result<(), InspectError> {
        let identity = self.identity(id);
        let slot = self
            .types
            .get_mut(id.0 as usize)
            .ok_or(InspectError::UnknownHandle { identity })?;
        *slot = Some(data);
        self.resolve_dependents(id);
        Ok(())
    }

    pub fn get(&self, id: TypeId) -> Result<&TypeData, InspectError> {
        let identity = self.identity(id);
        match self.types.get(id.0 as usize) {
            Some(Some(data)) => Ok(data),
            Some(None) => Err(InspectError::UndefinedType { identity }),
            None => Err(InspectError::UnknownHandle { identity }),
        }
    }

    /// Interned: each kind has exactly one id.
    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeId {
        if let Some(&id) = self.primitives.get(&kind) {
            return id;
        }
        let id = self.add(TypeData::Primitive(kind));
        self.primitives.insert(kind, id);
        id
    }

    /// An anonymous object literal type.
    pub fn object(&mut self, properties: Vec<PropertyDef>) -> TypeId {
        self.add(TypeData::Object(ObjectShape::new(properties)))
    }

    pub fn object_shape(&mut self, shape: ObjectShape) -> TypeId {
        self.add(TypeData::Object(shape))
    }

    /// A plain function type without own properties.
    pub fn function(&mut self) -> TypeId {
        self.add(TypeData::Callable(ObjectShape::default()))
    }

    pub fn callable(&mut self, shape: ObjectShape) -> TypeId {
        self.add(TypeData::Callable(shape))
    }

    /// `T[]`
    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.array_like(element, false)
    }

    /// `readonly T[]`
    pub fn readonly_array(&mut self, element: TypeId) -> TypeId {
        self.array_like(element, true)
    }

    fn array_like(&mut self, element: TypeId, readonly: bool) -> TypeId {
        let number = self.primitive(PrimitiveKind::Number);
        let (name, flags) = if readonly {
            ("ReadonlyArray", PropertyFlags::READONLY)
        } else {
            ("Array", PropertyFlags::empty())
        };
        let shape = ObjectShape::named(
            name,
            vec![element],
            vec![PropertyDef::new("length", number, flags)],
        )
        .with_number_index(element, readonly);
        self.add(TypeData::Array(shape))
    }

    /// `[A, B, ...]`
    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.tuple_like(elements, false)
    }

    /// `readonly [A, B, ...]`
    pub fn readonly_tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.tuple_like(elements, true)
    }

    fn tuple_like(&mut self, elements: Vec<TypeId>, readonly: bool) -> TypeId {
        let number = self.primitive(PrimitiveKind::Number);
        let flags = if readonly {
            PropertyFlags::READONLY
        } else {
            PropertyFlags::empty()
        };
        let mut properties: Vec<PropertyDef> = elements
            .iter()
            .enumerate()
            .map(|(index, &element)| PropertyDef::new(&index.to_string(), element, flags))
            .collect();
        properties.push(PropertyDef::new("length", number, flags));
        let shape = ObjectShape {
            type_arguments: elements,
            properties,
            ..ObjectShape::default()
        };
        self.add(TypeData::Tuple { shape, readonly })
    }

    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.add(TypeData::Union(members))
    }

    /// `A & B & ...`, merged eagerly from the members' current definitions.
    ///
    /// Interned by member set: `A & B` and `B & A` share one id.
    pub fn intersection(&mut self, members: Vec<TypeId>) -> TypeId {
        let mut key = members.clone();
        key.sort_unstable();
        key.dedup();
        if let Some(&id) = self.intersections.get(&key) {
            return id;
        }
        // Reserved first so that merging can refer back to this intersection.
        let id = self.reserve();
        self.intersections.insert(key, id);
        self.merge_intersection(id, members);
        id
    }

    fn merge_intersection(&mut self, id: TypeId, members: Vec<TypeId>) {
        let mut unresolved = None;
        let mut shapes = Vec::with_capacity(members.len());
        for &member in &members {
            match self.types.get(member.0 as usize) {
                Some(Some(TypeData::Intersection {
                    unresolved: Some(_),
                    ..
                }))
                | Some(None)
                | None => {
                    unresolved.get_or_insert(member);
                }
                Some(Some(data)) => {
                    if let Some(shape) = data.shape() {
                        shapes.push(shape.clone());
                    }
                }
            }
        }
        let merged = self.merge_shapes(shapes);
        if let Some(member) = unresolved {
            trace!(intersection = id.0, member = member.0, "TypeGraph: waiting for member");
            self.dependents.entry(member).or_default().push(id);
        }
        if let Some(slot) = self.types.get_mut(id.0 as usize) {
            *slot = Some(TypeData::Intersection {
                members,
                merged,
                unresolved,
            });
        }
        if unresolved.is_none() {
            self.resolve_dependents(id);
        }
    }

    /// Merge again every intersection that was waiting for `id`.
    fn resolve_dependents(&mut self, id: TypeId) {
        let Some(waiting) = self.dependents.remove(&id) else {
            return;
        };
        for intersection in waiting {
            let members = match self.types.get(intersection.0 as usize) {
                Some(Some(TypeData::Intersection { members, .. })) => members.clone(),
                _ => continue,
            };
            self.merge_intersection(intersection, members);
        }
    }

    fn merge_shapes(&mut self, shapes: Vec<ObjectShape>) -> ObjectShape {
        let mut properties = MergedProperties::default();
        let mut string_index: SmallVec<[IndexSignature; 2]> = SmallVec::new();
        let mut number_index: SmallVec<[IndexSignature; 2]> = SmallVec::new();

        for shape in shapes {
            for property in shape.properties {
                match properties.get_mut(&property.name) {
                    Some((flags, types)) => {
                        let private = (*flags | property.flags) & PropertyFlags::PRIVATE;
                        *flags = (*flags & property.flags) | private;
                        if !types.contains(&property.type_id) {
                            types.push(property.type_id);
                        }
                    }
                    None => {
                        let mut types = SmallVec::new();
                        types.push(property.type_id);
                        properties.insert(property.name, (property.flags, types));
                    }
                }
            }
            string_index.extend(shape.string_index);
            number_index.extend(shape.number_index);
        }

        let properties = properties
            .into_iter()
            .map(|(name, (flags, types))| {
                let type_id = self.merge_declared_types(&types);
                PropertyDef {
                    name,
                    type_id,
                    flags,
                }
            })
            .collect();

        ObjectShape {
            name: None,
            type_arguments: Vec::new(),
            properties,
            string_index: self.merge_index_signatures(&string_index),
            number_index: self.merge_index_signatures(&number_index),
        }
    }

    fn merge_declared_types(&mut self, types: &[Option<TypeId>]) -> Option<TypeId> {
        let known: Option<Vec<TypeId>> = types.iter().copied().collect();
        match known?.as_slice() {
            [] => None,
            [single] => Some(*single),
            many => Some(self.intersection(many.to_vec())),
        }
    }

    fn merge_index_signatures(&mut self, signatures: &[IndexSignature]) -> Option<IndexSignature> {
        let (first, rest) = signatures.split_first()?;
        if rest.is_empty() {
            return Some(*first);
        }
        let readonly = signatures.iter().all(|signature| signature.readonly);
        let mut value_types: Vec<TypeId> = Vec::with_capacity(signatures.len());
        for signature in signatures {
            if !value_types.contains(&signature.value_type) {
                value_types.push(signature.value_type);
            }
        }
        let value_type = match value_types.as_slice() {
            [single] => *single,
            _ => self.intersection(value_types),
        };
        Some(IndexSignature {
            value_type,
            readonly,
        })
    }

    /// `T extends U ? X : Y`, represented by its two branches.
    pub fn conditional(&mut self, true_type: TypeId, false_type: TypeId) -> TypeId {
        self.add(TypeData::Conditional {
            true_type,
            false_type,
        })
    }

    /// Record that `id` was reached through `type Name<Args> = ...`.
    pub fn set_alias(&mut self, id: TypeId, name: &str, type_arguments: Vec<TypeId>) {
        self.aliases.insert(
            id,
            AliasInfo {
                name: Arc::from(name),
                type_arguments,
            },
        );
    }

    /// A TypeScript-like rendering of `id`, used for `Name<Args>` matching.
    pub fn display(&self, id: TypeId) -> String {
        self.display_at_depth(id, 0)
    }

    fn display_at_depth(&self, id: TypeId, depth: u32) -> String {
        if depth > MAX_DISPLAY_DEPTH {
            return "...".to_string();
        }
        if let Some(alias) = self.aliases.get(&id) {
            return self.with_arguments(&alias.name, &alias.type_arguments, depth);
        }
        let Ok(data) = self.get(id) else {
            return "?".to_string();
        };
        match data {
            TypeData::Primitive(kind) => kind.name().to_string(),
            TypeData::Union(members) => self.join(members, " | ", depth),
            TypeData::Intersection { members, .. } => self.join(members, " & ", depth),
            TypeData::Conditional {
                true_type,
                false_type,
            } => format!(
                "(? {} : {})",
                self.display_at_depth(*true_type, depth + 1),
                self.display_at_depth(*false_type, depth + 1)
            ),
            TypeData::Tuple { shape, readonly } => {
                let elements = self.join(&shape.type_arguments, ", ", depth);
                if *readonly {
                    format!("readonly [{elements}]")
                } else {
                    format!("[{elements}]")
                }
            }
            TypeData::Callable(shape) if shape.properties.is_empty() => "Function".to_string(),
            TypeData::Object(shape) | TypeData::Callable(shape) | TypeData::Array(shape) => {
                match &shape.name {
                    Some(name) => self.with_arguments(name, &shape.type_arguments, depth),
                    None => "{ ... }".to_string(),
                }
            }
        }
    }

    fn with_arguments(&self, name: &str, type_arguments: &[TypeId], depth: u32) -> String {
        if type_arguments.is_empty() {
            name.to_string()
        } else {
            format!("{name}<{}>", self.join(type_arguments, ", ", depth))
        }
    }

    fn join(&self, ids: &[TypeId], separator: &str, depth: u32) -> String {
        ids.iter()
            .map(|&id| self.display_at_depth(id, depth + 1))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn shape_of(&self, ty: TypeId) -> Result<Option<&ObjectShape>, InspectError> {
        let data = self.get(ty)?;
        if let TypeData::Intersection {
            unresolved: Some(member),
            ..
        } = data
        {
            return Err(InspectError::UndefinedType {
                identity: self.identity(*member),
            });
        }
        Ok(data.shape())
    }

    fn mismatch(&self, ty: TypeId, expected: &'static str) -> InspectError {
        match self.get(ty) {
            Ok(data) => InspectError::CategoryMismatch {
                identity: self.identity(ty),
                expected,
                found: data.category(),
            },
            Err(err) => err,
        }
    }
}

impl TypeInspector for TypeGraph {
    type Handle = TypeId;

    fn identity(&self, ty: TypeId) -> TypeIdentity {
        TypeIdentity((u64::from(self.graph_id) << 32) | u64::from(ty.0))
    }

    fn category(&self, ty: TypeId) -> Result<TypeCategory, InspectError> {
        Ok(self.get(ty)?.category())
    }

    fn union_members(&self, ty: TypeId) -> Result<Vec<TypeId>, InspectError> {
        match self.get(ty)? {
            TypeData::Union(members) => Ok(members.clone()),
            _ => Err(self.mismatch(ty, "union")),
        }
    }

    fn intersection_members(&self, ty: TypeId) -> Result<Vec<TypeId>, InspectError> {
        match self.get(ty)? {
            TypeData::Intersection { members, .. } => Ok(members.clone()),
            _ => Err(self.mismatch(ty, "intersection")),
        }
    }

    fn conditional_branches(&self, ty: TypeId) -> Result<(TypeId, TypeId), InspectError> {
        match self.get(ty)? {
            TypeData::Conditional {
                true_type,
                false_type,
            } => Ok((*true_type, *false_type)),
            _ => Err(self.mismatch(ty, "conditional")),
        }
    }

    fn own_properties(&self, ty: TypeId) -> Result<Vec<PropertyInfo<TypeId>>, InspectError> {
        let Some(shape) = self.shape_of(ty)? else {
            return Ok(Vec::new());
        };
        Ok(shape
            .properties
            .iter()
            .map(|property| PropertyInfo {
                name: property.name.clone(),
                readonly_in_type: property.flags.contains(PropertyFlags::READONLY),
                is_method: property.flags.contains(PropertyFlags::METHOD),
                is_private: property.flags.contains(PropertyFlags::PRIVATE),
                declared_type: property.type_id,
            })
            .collect())
    }

    fn type_arguments(&self, ty: TypeId) -> Result<Vec<TypeId>, InspectError> {
        Ok(self
            .shape_of(ty)?
            .map(|shape| shape.type_arguments.clone())
            .unwrap_or_default())
    }

    fn index_signature(
        &self,
        ty: TypeId,
        kind: IndexKind,
    ) -> Result<Option<IndexSignatureInfo<TypeId>>, InspectError> {
        Ok(self
            .shape_of(ty)?
            .and_then(|shape| shape.index(kind))
            .map(|signature| IndexSignatureInfo {
                readonly: signature.readonly,
                value_type: signature.value_type,
            }))
    }

    fn names_for_override_matching(&self, ty: TypeId) -> Result<TypeNames, InspectError> {
        let mut names = TypeNames::default();
        let shape = self.get(ty)?.shape();
        if let Some((name, type_arguments)) =
            shape.and_then(|shape| Some((shape.name.as_ref()?, &shape.type_arguments)))
        {
            names.bare_name = Some(name.to_string());
            if !type_arguments.is_empty() {
                names.name_with_arguments = Some(self.with_arguments(name, type_arguments, 0));
            }
        }
        if let Some(alias) = self.aliases.get(&ty) {
            names.alias_name = Some(alias.name.to_string());
            if !alias.type_arguments.is_empty() {
                names.alias_with_arguments =
                    Some(self.with_arguments(&alias.name, &alias.type_arguments, 0));
            }
        }
        Ok(names)
    }
}

fn next_type_id(len: usize) -> TypeId {
    match u32::try_from(len) {
        Ok(index) if index < u32::MAX => TypeId(index),
        _ => panic!("TypeGraph cannot hold more than {} types", u32::MAX),
    }
}

#[cfg(test)]
#[path = "tests/type_graph_tests.rs"]
mod type_graph_tests;
