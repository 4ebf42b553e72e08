//! The immutability lattice.
//!
//! Verdicts are totally ordered `Mutable < ReadonlyShallow < ReadonlyDeep < Immutable`.
//! `Unknown` sits outside that order: it carries no information, so [`min`] and
//! [`max`] treat it as an identity element and every threshold predicate is
//! `false` for it.
//!
//! ```text
//!   Immutable        no reachable state can be mutated
//!       |
//!   ReadonlyDeep     nothing reachable is writable, but methods may close over state
//!       |
//!   ReadonlyShallow  own members are read-only, nested values may not be
//!       |
//!   Mutable          at least one own member is writable
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How deeply a value of a given type can be mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Immutability {
    /// No information.
    Unknown,
    Mutable,
    ReadonlyShallow,
    ReadonlyDeep,
    Immutable,
}

impl Immutability {
    /// All verdicts, `Unknown` first and then from weakest to strongest.
    pub const ALL: [Immutability; 5] = [
        Immutability::Unknown,
        Immutability::Mutable,
        Immutability::ReadonlyShallow,
        Immutability::ReadonlyDeep,
        Immutability::Immutable,
    ];

    /// Position in the total order, `None` for `Unknown`.
    #[inline]
    pub(crate) const fn rank(self) -> Option<u8> {
        match self {
            Immutability::Unknown => None,
            Immutability::Mutable => Some(1),
            Immutability::ReadonlyShallow => Some(2),
            Immutability::ReadonlyDeep => Some(3),
            Immutability::Immutable => Some(4),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Immutability::Unknown => "Unknown",
            Immutability::Mutable => "Mutable",
            Immutability::ReadonlyShallow => "ReadonlyShallow",
            Immutability::ReadonlyDeep => "ReadonlyDeep",
            Immutability::Immutable => "Immutable",
        }
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Immutability::Unknown)
    }

    /// `self >= Immutable`.
    #[inline]
    pub const fn is_immutable(self) -> bool {
        matches!(self, Immutability::Immutable)
    }

    /// `self >= ReadonlyDeep`.
    #[inline]
    pub const fn is_readonly_deep(self) -> bool {
        matches!(self, Immutability::ReadonlyDeep | Immutability::Immutable)
    }

    /// `self >= ReadonlyShallow`.
    #[inline]
    pub const fn is_readonly_shallow(self) -> bool {
        matches!(
            self,
            Immutability::ReadonlyShallow | Immutability::ReadonlyDeep | Immutability::Immutable
        )
    }

    /// `self <= Mutable`.
    #[inline]
    pub const fn is_mutable(self) -> bool {
        matches!(self, Immutability::Mutable)
    }
}

/// `Unknown` is incomparable with every other verdict.
impl PartialOrd for Immutability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Immutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised verdict name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown immutability level `{0}`")]
pub struct ParseImmutabilityError(pub String);

impl FromStr for Immutability {
    type Err = ParseImmutabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Immutability::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseImmutabilityError(s.to_string()))
    }
}

/// The weaker of two verdicts, ignoring `Unknown`.
pub fn min(a: Immutability, b: Immutability) -> Immutability {
    match (a.rank(), b.rank()) {
        (None, _) => b,
        (_, None) => a,
        (Some(x), Some(y)) => {
            if x <= y {
                a
            } else {
                b
            }
        }
    }
}

/// The stronger of two verdicts, ignoring `Unknown`.
pub fn max(a: Immutability, b: Immutability) -> Immutability {
    match (a.rank(), b.rank()) {
        (None, _) => b,
        (_, None) => a,
        (Some(x), Some(y)) => {
            if x >= y {
                a
            } else {
                b
            }
        }
    }
}

/// `max(low, min(value, high))`.
///
/// When `low <= high` the result always lies in `[low, high]`. The array rule
/// calls this with `low` above `high`, in which case `low` wins.
pub fn clamp(low: Immutability, value: Immutability, high: Immutability) -> Immutability {
    max(low, min(value, high))
}

#[cfg(test)]
#[path = "../tests/lattice_tests.rs"]
mod lattice_tests;
