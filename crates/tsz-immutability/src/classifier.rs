//! Immutability classification.
//!
//! [`ImmutabilityChecker`] walks a type's structure through a
//! [`TypeInspector`] and reduces it to one [`Immutability`] verdict:
//!
//! - **Unions and conditionals** are as strong as their weakest constituent.
//! - **Functions** without own properties are `Immutable`.
//! - **Tuples** are `Mutable` unless declared `readonly`; readonly tuples are
//!   handled like arrays.
//! - **Arrays** take a shallow verdict from their own members and clamp their
//!   elements' verdict against it.
//! - **Objects and intersections** are `Mutable` as soon as one own property is
//!   writable; otherwise they are at least `ReadonlyShallow` and at most the
//!   weakest of their property types, type arguments and index signatures.
//!   Methods cap the result at `ReadonlyDeep`.
//! - **Everything else** is `Immutable`.
//!
//! # Cycles
//!
//! A type is marked in progress before its structure is walked. Reaching it
//! again during its own computation yields the `Calculating` sentinel, which
//! ranks above `Immutable` and therefore never weakens the verdict it is
//! folded into. The sentinel is crate-private and never escapes a query: a
//! verdict made only of in-progress references is not cached, and one that
//! reaches the top level settles to `Immutable`.
//!
//! # Stack depth
//!
//! Recursion depth follows the nesting depth of the type graph. Each level
//! goes through [`stacker::maybe_grow`], so deeply nested generics grow the
//! stack instead of overflowing it.

use crate::cache::{ImmutabilityCache, default_cache};
use crate::inspector::{
    IndexKind, IndexSignatureInfo, InspectError, PropertyInfo, TypeCategory, TypeIdentity,
    TypeInspector,
};
use crate::lattice::{self, Immutability};
use crate::overrides::{OverrideTable, default_overrides};
use crate::query_trace;
use crate::recursion::InProgress;
use tracing::{debug, trace};

/// Remaining stack below which a new segment is allocated.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// An intermediate verdict.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Settled(Immutability),
    /// The type is still being computed further up the stack.
    /// Ranks above `Immutable`.
    Calculating,
}

impl Verdict {
    /// Lattice `min`; `Unknown` is the identity, `Calculating` loses to any known level.
    pub(crate) fn min(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Settled(a), Verdict::Settled(b)) => Verdict::Settled(lattice::min(a, b)),
            (Verdict::Calculating, Verdict::Settled(v))
            | (Verdict::Settled(v), Verdict::Calculating)
                if !v.is_unknown() =>
            {
                Verdict::Settled(v)
            }
            _ => Verdict::Calculating,
        }
    }

    /// Replace `Calculating` with `Immutable`.
    ///
    /// Exact whenever the result is afterwards `min`-ed against a known level.
    #[inline]
    pub(crate) fn assume_settled(self) -> Immutability {
        match self {
            Verdict::Settled(v) => v,
            Verdict::Calculating => Immutability::Immutable,
        }
    }
}

/// Classifies types reached through one [`TypeInspector`].
///
/// # Example
///
/// ```
/// use tsz_immutability::{Immutability, ImmutabilityCache, ImmutabilityChecker, OverrideTable};
/// use tsz_immutability::type_graph::{PrimitiveKind, PropertyDef, TypeGraph};
///
/// let mut graph = TypeGraph::new();
/// let number = graph.primitive(PrimitiveKind::Number);
/// let point = graph.object(vec![
///     PropertyDef::readonly("x", number),
///     PropertyDef::readonly("y", number),
/// ]);
///
/// let overrides = OverrideTable::default();
/// let cache = ImmutabilityCache::new();
/// let mut checker = ImmutabilityChecker::new(&graph)
///     .with_overrides(&overrides)
///     .with_cache(&cache);
/// assert_eq!(checker.type_immutability(point), Ok(Immutability::Immutable));
/// ```
pub struct ImmutabilityChecker<'a, I: TypeInspector + ?Sized> {
    inspector: &'a I,
    overrides: &'a OverrideTable,
    cache: &'a ImmutabilityCache,
    in_progress: InProgress<TypeIdentity>,
}

impl<'a, I: TypeInspector + ?Sized> ImmutabilityChecker<'a, I> {
    /// A checker using [`default_overrides`] and [`default_cache`].
    pub fn new(inspector: &'a I) -> Self {
        Self {
            inspector,
            overrides: default_overrides(),
            cache: default_cache(),
            in_progress: InProgress::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: &'a OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_cache(mut self, cache: &'a ImmutabilityCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &'a ImmutabilityCache {
        self.cache
    }

    /// The verdict for `ty`.
    ///
    /// Fails only when the inspector violates its contract.
    pub fn type_immutability(&mut self, ty: I::Handle) -> Result<Immutability, InspectError> {
        let identity = self.inspector.identity(ty);
        let query = query_trace::enabled().then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::classify_start(query_id, "type_immutability", identity);
            (query_id, self.cache.contains(identity))
        });

        let result = self.verdict(ty).map(|verdict| match verdict {
            Verdict::Settled(immutability) => immutability,
            Verdict::Calculating => {
                trace!(%identity, "immutability: settling self-referential verdict");
                Immutability::Immutable
            }
        });

        if let Some((query_id, cache_hit)) = query {
            match &result {
                Ok(immutability) => query_trace::classify_end(
                    query_id,
                    "type_immutability",
                    *immutability,
                    cache_hit,
                    self.in_progress.max_depth_seen(),
                ),
                Err(err) => query_trace::classify_error(query_id, "type_immutability", err),
            }
        }
        result
    }

    fn verdict(&mut self, ty: I::Handle) -> Result<Verdict, InspectError> {
        let identity = self.inspector.identity(ty);
        if let Some(cached) = self.cache.get(identity) {
            trace!(%identity, %cached, "immutability: cache hit");
            return Ok(Verdict::Settled(cached));
        }
        if self.in_progress.is_visiting(&identity) {
            trace!(%identity, "immutability: cycle");
            return Ok(Verdict::Calculating);
        }

        let overrides = self.overrides;
        let names = self.inspector.names_for_override_matching(ty)?;
        let rule = overrides.lookup(&names);
        if let Some(rule) = rule.filter(|rule| rule.is_unconditional()) {
            debug!(%identity, matcher = %rule.matcher, to = %rule.to, "immutability: override");
            self.cache.insert(identity, rule.to);
            return Ok(Verdict::Settled(rule.to));
        }

        let entered = self.in_progress.enter(identity);
        debug_assert!(entered.is_entered(), "{identity} entered twice");
        let computed = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.structural_verdict(ty)
        });
        self.in_progress.leave(identity);

        let result = match (computed?, rule) {
            (Verdict::Settled(natural), Some(rule)) => {
                let forced = rule.apply(natural);
                if forced != natural {
                    debug!(
                        %identity,
                        matcher = %rule.matcher,
                        %natural,
                        %forced,
                        "immutability: banded override"
                    );
                }
                Verdict::Settled(forced)
            }
            (verdict, _) => verdict,
        };

        if let Verdict::Settled(immutability) = result {
            self.cache.insert(identity, immutability);
        }
        Ok(result)
    }

    fn structural_verdict(&mut self, ty: I::Handle) -> Result<Verdict, InspectError> {
        let immutability = match self.inspector.category(ty)? {
            TypeCategory::Union => {
                let members = self.inspector.union_members(ty)?;
                return self.weakest(members);
            }
            TypeCategory::Conditional => {
                let (true_type, false_type) = self.inspector.conditional_branches(ty)?;
                return self.weakest([true_type, false_type]);
            }
            TypeCategory::Intersection | TypeCategory::Object => {
                self.object_immutability(ty, false)?
            }
            TypeCategory::Callable => {
                let properties = self.inspector.own_properties(ty)?;
                if properties.is_empty() {
                    Immutability::Immutable
                } else {
                    self.properties_immutability(ty, &properties, false)?
                }
            }
            TypeCategory::Tuple { readonly: false } => Immutability::Mutable,
            TypeCategory::Tuple { readonly: true } => self.array_immutability(ty, true)?,
            TypeCategory::Array => self.array_immutability(ty, false)?,
            TypeCategory::Primitive => Immutability::Immutable,
        };
        Ok(Verdict::Settled(immutability))
    }

    /// `min` over every constituent. Each one is classified, even after a
    /// `Mutable` constituent has been seen, so that all of them are cached.
    fn weakest(
        &mut self,
        constituents: impl IntoIterator<Item = I::Handle>,
    ) -> Result<Verdict, InspectError> {
        let mut result = Verdict::Settled(Immutability::Unknown);
        for constituent in constituents {
            result = result.min(self.verdict(constituent)?);
        }
        Ok(result)
    }

    fn array_immutability(
        &mut self,
        ty: I::Handle,
        is_tuple: bool,
    ) -> Result<Immutability, InspectError> {
        let shallow = self.object_immutability(ty, is_tuple)?;
        if shallow <= Immutability::Mutable {
            return Ok(Immutability::Mutable);
        }

        let mut elements = Verdict::Settled(Immutability::Unknown);
        for element in self.inspector.type_arguments(ty)? {
            elements = elements.min(self.verdict(element)?);
        }
        Ok(lattice::clamp(
            shallow,
            elements.assume_settled(),
            Immutability::ReadonlyShallow,
        ))
    }

    fn object_immutability(
        &mut self,
        ty: I::Handle,
        is_tuple: bool,
    ) -> Result<Immutability, InspectError> {
        let properties = self.inspector.own_properties(ty)?;
        self.properties_immutability(ty, &properties, is_tuple)
    }

    fn properties_immutability(
        &mut self,
        ty: I::Handle,
        properties: &[PropertyInfo<I::Handle>],
        is_tuple: bool,
    ) -> Result<Immutability, InspectError> {
        let mut max_immutability = Immutability::Immutable;
        let mut min_immutability = Immutability::Mutable;

        if !properties.is_empty() {
            for property in properties {
                if property.readonly_in_type
                    || (is_tuple && &*property.name == "length")
                    || property.is_private
                {
                    continue;
                }
                if property.is_method || self.is_function_typed(ty, property)? {
                    max_immutability = lattice::min(max_immutability, Immutability::ReadonlyDeep);
                    continue;
                }
                trace!(property = %property.name, "immutability: writable property");
                return Ok(Immutability::Mutable);
            }

            min_immutability = Immutability::ReadonlyShallow;

            for property in properties {
                let declared = self.declared_type(ty, property)?;
                let property_immutability = self.verdict(declared)?.assume_settled();
                max_immutability = lattice::min(max_immutability, property_immutability);
                if min_immutability >= max_immutability {
                    return Ok(min_immutability);
                }
            }
        }

        for argument in self.inspector.type_arguments(ty)? {
            let argument_immutability = self.verdict(argument)?.assume_settled();
            max_immutability = lattice::min(max_immutability, argument_immutability);
            if min_immutability >= max_immutability {
                return Ok(min_immutability);
            }
        }

        for kind in [IndexKind::String, IndexKind::Number] {
            let signature = self.inspector.index_signature(ty, kind)?;
            let index_immutability = self.index_signature_immutability(signature)?;
            max_immutability = lattice::min(max_immutability, index_immutability);
            if min_immutability >= max_immutability {
                return Ok(min_immutability);
            }
        }

        Ok(lattice::max(min_immutability, max_immutability))
    }

    fn index_signature_immutability(
        &mut self,
        signature: Option<IndexSignatureInfo<I::Handle>>,
    ) -> Result<Immutability, InspectError> {
        Ok(match signature {
            None => Immutability::Unknown,
            Some(signature) if !signature.readonly => Immutability::Mutable,
            Some(signature) => lattice::max(
                Immutability::ReadonlyShallow,
                self.verdict(signature.value_type)?.assume_settled(),
            ),
        })
    }

    /// A plain function signature: callable, with no own properties.
    fn is_function_typed(
        &self,
        owner: I::Handle,
        property: &PropertyInfo<I::Handle>,
    ) -> Result<bool, InspectError> {
        let declared = self.declared_type(owner, property)?;
        if self.inspector.category(declared)? != TypeCategory::Callable {
            return Ok(false);
        }
        Ok(self.inspector.own_properties(declared)?.is_empty())
    }

    fn declared_type(
        &self,
        owner: I::Handle,
        property: &PropertyInfo<I::Handle>,
    ) -> Result<I::Handle, InspectError> {
        property
            .declared_type
            .ok_or_else(|| InspectError::MissingDeclaredType {
                identity: self.inspector.identity(owner),
                property: property.name.clone(),
            })
    }
}

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod classifier_tests;
