use std::{
    cmp::Ordering,
    collections::{btree_set, BTreeSet},
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use itertools::Itertools;

/// A single automaton state, identified by its name.
///
/// States produced by the powerset renaming additionally carry an `alias`,
/// the ordered list of origin-state names the canonical state stands for.
/// Equality, ordering and hashing are all defined over the display form
/// (`name` alone, or `name({a,b})` when aliased), so two independently
/// constructed states with the same name and alias are interchangeable.
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    alias: Option<Vec<String>>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        State {
            name: name.into(),
            alias: None,
        }
    }

    /// Creates a canonical state remembering the origin states it packs.
    /// The alias is fixed at construction and never mutated afterwards.
    pub fn with_alias(name: impl Into<String>, alias: Vec<String>) -> Self {
        State {
            name: name.into(),
            alias: Some(alias),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&[String]> {
        self.alias.as_deref()
    }

    /// Checks if the alias packs a state with the given name.
    /// Unaliased states pack nothing.
    pub fn alias_contains(&self, name: &str) -> bool {
        match &self.alias {
            Some(alias) => alias.iter().any(|a| a == name),
            None => false,
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, "({{{}}})", alias.iter().join(","))?;
        }
        Ok(())
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.alias, &other.alias) {
            // Unaliased states display as their bare name.
            (None, None) => self.name.cmp(&other.name),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// A sorted, duplicate-free set of states.
///
/// The set doubles as a map key through [StateSet::key], a canonical
/// order-independent derivation (sorted display forms joined by `,`) used
/// consistently for entry merging, visited checks and alias assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateSet(BTreeSet<State>);

impl StateSet {
    pub fn new() -> Self {
        StateSet(BTreeSet::new())
    }

    pub fn singleton(state: State) -> Self {
        let mut set = StateSet::new();
        set.insert(state);
        set
    }

    /// Inserts a state, returning false if it was already present.
    pub fn insert(&mut self, state: State) -> bool {
        self.0.insert(state)
    }

    pub fn contains(&self, state: &State) -> bool {
        self.0.contains(state)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, State> {
        self.0.iter()
    }

    /// First state in display order. Meaningful mostly for singleton sets.
    pub fn first(&self) -> Option<&State> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unions another set into self.
    pub fn extend_with(&mut self, other: &StateSet) {
        for state in other.iter() {
            self.insert(state.clone());
        }
    }

    /// The sorted display forms of the members, as used for aliases.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|s| s.to_string()).collect()
    }

    /// Canonical map key for this set, independent of insertion order.
    pub fn key(&self) -> String {
        self.names().join(",")
    }

    pub fn intersects(&self, other: &StateSet) -> bool {
        self.0.iter().any(|s| other.contains(s))
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(","))
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<T: IntoIterator<Item = State>>(iter: T) -> Self {
        StateSet(iter.into_iter().collect())
    }
}

impl IntoIterator for StateSet {
    type Item = State;
    type IntoIter = btree_set::IntoIter<State>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
