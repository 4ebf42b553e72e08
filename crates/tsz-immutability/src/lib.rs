//! Deep immutability classification for static types.
//!
//! Given a type from a host type system, decide how deeply a value of that
//! type can be mutated through any reference to it:
//!
//! ```text
//! Mutable < ReadonlyShallow < ReadonlyDeep < Immutable      (plus Unknown)
//! ```
//!
//! - [`lattice`]: the verdict domain and its `min`/`max`/`clamp` algebra
//! - [`inspector`]: the [`TypeInspector`] capability the classifier consumes
//! - [`overrides`]: name-matched rules forcing a verdict
//! - [`classifier`]: the cycle-safe, memoized structural walk
//! - [`predicates`]: boolean convenience queries
//! - [`cache`]: the shared memo table
//! - [`config`]: serde-backed override configuration
//! - [`type_graph`]: an in-memory inspector for fixtures and embedders
//!
//! Static analysis only: no runtime values are inspected, and immutability is
//! a property of a type's shape, not of aliasing.

pub mod cache;
pub mod classifier;
pub mod config;
pub mod inspector;
pub mod lattice;
pub mod overrides;
pub mod predicates;
mod query_trace;
pub mod recursion;
pub mod type_graph;

pub use cache::{ImmutabilityCache, default_cache};
pub use classifier::ImmutabilityChecker;
pub use config::{ConfigError, ImmutabilityConfig, OverrideSpec, TypeSpecifier};
pub use inspector::{
    IndexKind, IndexSignatureInfo, InspectError, PropertyInfo, TypeCategory, TypeIdentity,
    TypeInspector, TypeNames,
};
pub use lattice::{Immutability, ParseImmutabilityError};
pub use overrides::{ImmutabilityOverride, OverrideTable, TypeMatcher, default_overrides};
pub use predicates::{
    get_type_immutability, is_immutable_type, is_mutable_type, is_readonly_deep_type,
    is_readonly_shallow_type,
};
