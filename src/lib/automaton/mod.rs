use std::{collections::BTreeSet, fmt::Debug};

use itertools::Itertools;

use self::{
    state::{State, StateSet},
    transition::TransitionRelation,
};

pub mod config;
pub mod spec;
pub mod state;
pub mod transition;

/// The reserved input symbol denoting a spontaneous transition.
/// It never appears in the alphabet of a converted DFA.
pub const EPSILON: char = '$';

/// A finite automaton: state set, alphabet, transition relation, one initial
/// state and a (possibly empty) final-state set.
///
/// Instances are built through [config::AutomatonConfig] (which validates all
/// references) or by the converter, and are read-only afterwards.
#[derive(Clone)]
pub struct Automaton {
    states: StateSet,
    alphabet: BTreeSet<char>,
    transitions: TransitionRelation,
    initial: State,
    finals: StateSet,
}

impl Automaton {
    pub(crate) fn from_parts(
        states: StateSet,
        alphabet: BTreeSet<char>,
        transitions: TransitionRelation,
        initial: State,
        finals: StateSet,
    ) -> Self {
        Automaton {
            states,
            alphabet,
            transitions,
            initial,
            finals,
        }
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// The alphabet without the epsilon symbol, in sorted order.
    pub fn input_symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied().filter(|&c| c != EPSILON)
    }

    pub fn transitions(&self) -> &TransitionRelation {
        &self.transitions
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    pub fn is_final(&self, state: &State) -> bool {
        self.finals.contains(state)
    }

    /// Computes the set of states reachable from `state` using only epsilon
    /// transitions. With `include_self` the state itself is part of the
    /// result; without it, the state only appears if an epsilon cycle leads
    /// back to it.
    ///
    /// The traversal keeps an explicit visited set and never re-enters a
    /// visited state, so cyclic epsilon relations terminate. The result is
    /// sorted by state order.
    pub fn epsilon_closure(&self, state: &State, include_self: bool) -> StateSet {
        let mut closure = StateSet::new();
        if include_self {
            closure.insert(state.clone());
        }

        let mut visited = StateSet::new();
        let mut stack = vec![state.clone()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }

            for next in self.transitions.next_states(&current, EPSILON) {
                closure.insert(next.clone());
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }

        closure
    }
}

impl Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("states", &self.states.names())
            .field("alphabet", &self.alphabet.iter().join(","))
            .field(
                "transitions",
                &self.transitions.iter().map(|e| e.to_string()).collect_vec(),
            )
            .field("initial_state", &self.initial.to_string())
            .field("final_states", &self.finals.names())
            .finish()
    }
}
