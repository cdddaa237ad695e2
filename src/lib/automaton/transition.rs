use std::fmt::{self, Display};

use hashbrown::HashMap;

use super::{
    state::{State, StateSet},
    EPSILON,
};

/// One row of a transition-function table:
/// being in every state of `present` and reading `input` leads to `next`.
///
/// In an ε-NFA relation `present` is a singleton; during subset construction
/// it is a literal set of origin states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEntry {
    pub present: StateSet,
    pub input: char,
    pub next: StateSet,
}

impl TransitionEntry {
    pub fn new(present: StateSet, input: char, next: StateSet) -> Self {
        TransitionEntry {
            present,
            input,
            next,
        }
    }

    /// The merge key: entries with equal keys describe the same table cell.
    pub fn key(&self) -> (String, char) {
        (self.present.key(), self.input)
    }
}

impl Display for TransitionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = if self.input == EPSILON {
            "epsilon".to_string()
        } else {
            format!("'{}'", self.input)
        };
        write!(f, "delta({}, {}) = {}", self.present, input, self.next)
    }
}

/// A transition-function table.
///
/// Entries are kept in insertion order (canonical renaming depends on first
/// encounter order) with a keyed index on top, so merge-on-insert is a direct
/// lookup instead of a scan. The index maintains the invariant that at most
/// one entry exists per (present-set, input) pair.
#[derive(Debug, Clone, Default)]
pub struct TransitionRelation {
    entries: Vec<TransitionEntry>,
    index: HashMap<(String, char), usize>,
}

impl TransitionRelation {
    pub fn new() -> Self {
        TransitionRelation::default()
    }

    /// Adds an entry, unioning its next-set into an existing entry with the
    /// same (present, input) key instead of duplicating the row.
    pub fn insert(&mut self, entry: TransitionEntry) {
        match self.index.get(&entry.key()) {
            Some(&i) => self.entries[i].next.extend_with(&entry.next),
            None => {
                self.index.insert(entry.key(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, present_key: &str, input: char) -> Option<&TransitionEntry> {
        self.index
            .get(&(present_key.to_owned(), input))
            .map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, present_key: &str, input: char) -> bool {
        self.index.contains_key(&(present_key.to_owned(), input))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct successors of a single state under `input`. Looks up the entry
    /// keyed by the singleton set of `state`, which is how ε-NFA relations
    /// are keyed.
    pub fn next_states(&self, state: &State, input: char) -> StateSet {
        self.get(&state.to_string(), input)
            .map(|entry| entry.next.clone())
            .unwrap_or_default()
    }

    /// Union of the direct successors of every member of `states` under
    /// `input`.
    pub fn next_states_of_set(&self, states: &StateSet, input: char) -> StateSet {
        let mut next = StateSet::new();
        for state in states.iter() {
            next.extend_with(&self.next_states(state, input));
        }
        next
    }

    /// The inputs some entry keyed by the singleton set of `state` accepts,
    /// in entry order.
    pub fn accepted_inputs<'a>(&'a self, state: &State) -> impl Iterator<Item = char> + 'a {
        let key = state.to_string();
        self.entries
            .iter()
            .filter(move |entry| entry.present.key() == key)
            .map(|entry| entry.input)
    }
}
