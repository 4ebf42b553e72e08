//! Name-matched overrides that force a type to a fixed verdict.
//!
//! Rules are scanned in order and the first one whose matcher accepts any of a
//! type's [`TypeNames`] wins. A rule without `from` replaces the verdict
//! outright, before the type's structure is ever looked at. A rule with `from`
//! only replaces a naturally computed verdict that falls inside the closed
//! band between `from` and `to`.

use crate::inspector::TypeNames;
use crate::lattice::Immutability;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// How a rule recognises a type.
#[derive(Clone, Debug)]
pub enum TypeMatcher {
    /// Exact match against any candidate name.
    Name(String),
    /// Regex search against any candidate name.
    Pattern(Regex),
}

impl TypeMatcher {
    pub fn name(name: impl Into<String>) -> Self {
        TypeMatcher::Name(name.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(TypeMatcher::Pattern)
    }

    pub fn matches(&self, names: &TypeNames) -> bool {
        names.candidates().into_iter().any(|candidate| match self {
            TypeMatcher::Name(name) => candidate == name,
            TypeMatcher::Pattern(pattern) => pattern.is_match(candidate),
        })
    }
}

impl fmt::Display for TypeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMatcher::Name(name) => write!(f, "name `{name}`"),
            TypeMatcher::Pattern(pattern) => write!(f, "pattern /{}/", pattern.as_str()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImmutabilityOverride {
    pub matcher: TypeMatcher,
    pub to: Immutability,
    pub from: Option<Immutability>,
}

impl ImmutabilityOverride {
    /// A rule that always forces `to`.
    pub fn new(matcher: TypeMatcher, to: Immutability) -> Self {
        Self {
            matcher,
            to,
            from: None,
        }
    }

    /// Restrict the rule to computed verdicts between `from` and `to`.
    pub fn with_from(mut self, from: Immutability) -> Self {
        self.from = Some(from);
        self
    }

    #[inline]
    pub fn is_unconditional(&self) -> bool {
        self.from.is_none()
    }

    /// Whether `computed` lies in the closed band between `from` and `to`.
    ///
    /// Unconditional rules accept everything. `Unknown` is outside every band.
    pub fn covers(&self, computed: Immutability) -> bool {
        let Some(from) = self.from else {
            return true;
        };
        let (low, high) = if from <= self.to {
            (from, self.to)
        } else {
            (self.to, from)
        };
        low <= computed && computed <= high
    }

    /// The verdict after applying this rule to a naturally computed one.
    pub fn apply(&self, computed: Immutability) -> Immutability {
        if self.covers(computed) {
            self.to
        } else {
            computed
        }
    }
}

/// Ordered override rules. Order is significant: the first match wins.
#[derive(Clone, Debug)]
pub struct OverrideTable {
    rules: Vec<ImmutabilityOverride>,
}

impl OverrideTable {
    /// A table with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_rules(rules: Vec<ImmutabilityOverride>) -> Self {
        Self { rules }
    }

    /// Builder: append a rule after the existing ones.
    pub fn with_rule(mut self, rule: ImmutabilityOverride) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: ImmutabilityOverride) {
        self.rules.push(rule);
    }

    /// Append every rule of `other` after the existing ones.
    pub fn extend(&mut self, other: &OverrideTable) {
        self.rules.extend(other.rules.iter().cloned());
    }

    pub fn rules(&self) -> &[ImmutabilityOverride] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching any of `names`.
    pub fn lookup(&self, names: &TypeNames) -> Option<&ImmutabilityOverride> {
        if names.is_anonymous() {
            return None;
        }
        self.rules.iter().find(|rule| rule.matcher.matches(names))
    }
}

/// `Map` and `Set` are mutable collections whose mutating methods would
/// otherwise only cap them at `ReadonlyDeep`.
impl Default for OverrideTable {
    fn default() -> Self {
        Self::from_rules(vec![
            ImmutabilityOverride::new(TypeMatcher::name("Map"), Immutability::Mutable),
            ImmutabilityOverride::new(TypeMatcher::name("Set"), Immutability::Mutable),
        ])
    }
}

static DEFAULT_OVERRIDES: OnceLock<OverrideTable> = OnceLock::new();

/// The process-wide default rules, built on first use.
pub fn default_overrides() -> &'static OverrideTable {
    DEFAULT_OVERRIDES.get_or_init(OverrideTable::default)
}

#[cfg(test)]
#[path = "../tests/overrides_tests.rs"]
mod overrides_tests;
