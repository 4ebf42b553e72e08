//! One-shot queries.
//!
//! Each function builds an [`ImmutabilityChecker`] for a single query.
//! `None` for `overrides` or `cache` selects [`default_overrides`] or
//! [`default_cache`].
//!
//! [`default_overrides`]: crate::overrides::default_overrides
//! [`default_cache`]: crate::cache::default_cache

use crate::cache::ImmutabilityCache;
use crate::classifier::ImmutabilityChecker;
use crate::inspector::{InspectError, TypeInspector};
use crate::lattice::Immutability;
use crate::overrides::OverrideTable;

/// The [`Immutability`] of `ty`.
pub fn get_type_immutability<I: TypeInspector + ?Sized>(
    inspector: &I,
    ty: I::Handle,
    overrides: Option<&OverrideTable>,
    cache: Option<&ImmutabilityCache>,
) -> Result<Immutability, InspectError> {
    let mut checker = ImmutabilityChecker::new(inspector);
    if let Some(overrides) = overrides {
        checker = checker.with_overrides(overrides);
    }
    if let Some(cache) = cache {
        checker = checker.with_cache(cache);
    }
    checker.type_immutability(ty)
}

/// Whether `ty` is [`Immutability::Immutable`].
pub fn is_immutable_type<I: TypeInspector + ?Sized>(
    inspector: &I,
    ty: I::Handle,
    overrides: Option<&OverrideTable>,
    cache: Option<&ImmutabilityCache>,
) -> Result<bool, InspectError> {
    get_type_immutability(inspector, ty, overrides, cache).map(Immutability::is_immutable)
}

/// Whether `ty` is at least [`Immutability::ReadonlyDeep`].
pub fn is_readonly_deep_type<I: TypeInspector + ?Sized>(
    inspector: &I,
    ty: I::Handle,
    overrides: Option<&OverrideTable>,
    cache: Option<&ImmutabilityCache>,
) -> Result<bool, InspectError> {
    get_type_immutability(inspector, ty, overrides, cache).map(Immutability::is_readonly_deep)
}

/// Whether `ty` is at least [`Immutability::ReadonlyShallow`].
pub fn is_readonly_shallow_type<I: TypeInspector + ?Sized>(
    inspector: &I,
    ty: I::Handle,
    overrides: Option<&OverrideTable>,
    cache: Option<&ImmutabilityCache>,
) -> Result<bool, InspectError> {
    get_type_immutability(inspector, ty, overrides, cache).map(Immutability::is_readonly_shallow)
}

/// Whether `ty` is [`Immutability::Mutable`].
pub fn is_mutable_type<I: TypeInspector + ?Sized>(
    inspector: &I,
    ty: I::Handle,
    overrides: Option<&OverrideTable>,
    cache: Option<&ImmutabilityCache>,
) -> Result<bool, InspectError> {
    get_type_immutability(inspector, ty, overrides, cache).map(Immutability::is_mutable)
}

#[cfg(test)]
#[path = "../tests/predicates_tests.rs"]
mod predicates_tests;
