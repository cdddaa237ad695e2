//! Converts an ε-NFA into an equivalent DFA via the subset construction.
//!
//! Three strictly sequential phases: [eliminate_epsilon] builds an
//! epsilon-free transition relation keyed by closure sets,
//! [subset_construction] explores the reachable state-sets breadth-first,
//! and [canonicalize] renames each distinct set to a fresh `qN` state.
//! The input automaton is never mutated.

use std::collections::{BTreeMap, VecDeque};

use anyhow::bail;
use hashbrown::{HashMap, HashSet};

use crate::automaton::{
    state::{State, StateSet},
    transition::{TransitionEntry, TransitionRelation},
    Automaton, EPSILON,
};

/// The result of epsilon elimination: a relation without epsilon entries,
/// keyed by closure sets, plus the closure table the subset construction
/// uses to look up successors of single states.
#[derive(Debug, Clone)]
pub struct EpsilonFree {
    pub relation: TransitionRelation,
    pub closures: BTreeMap<State, StateSet>,
}

/// Runs the full conversion pipeline.
pub fn epsilon_nfa_to_dfa(nfa: &Automaton) -> anyhow::Result<Automaton> {
    let epsilon_free = eliminate_epsilon(nfa);
    let subsets = subset_construction(nfa, &epsilon_free)?;
    Ok(canonicalize(nfa, &epsilon_free, &subsets))
}

/// Builds an equivalent epsilon-free transition relation.
///
/// For every original state `s` with closure `C`: each non-epsilon input
/// accepted by some member of `C` yields the entry
/// `(C, input, union of direct successors of every member of C)`.
/// Members accepting the same input collapse into one merged entry because
/// entries are keyed by (present-set, input).
pub fn eliminate_epsilon(nfa: &Automaton) -> EpsilonFree {
    let mut relation = TransitionRelation::new();
    let mut closures = BTreeMap::new();

    for state in nfa.states().iter() {
        let closure = nfa.epsilon_closure(state, true);

        for member in closure.iter() {
            for input in nfa.transitions().accepted_inputs(member) {
                if input == EPSILON {
                    continue;
                }

                let next = nfa.transitions().next_states_of_set(&closure, input);
                relation.insert(TransitionEntry::new(closure.clone(), input, next));
            }
        }

        closures.insert(state.clone(), closure);
    }

    EpsilonFree { relation, closures }
}

/// Explores all state-sets reachable from the closure of the initial state,
/// breadth-first, and returns their outgoing transitions. The result is the
/// DFA relation still expressed over literal state-sets.
///
/// A candidate `(present, input)` that was already finalized or queued is
/// discarded, which bounds the exploration by the power set of the original
/// states and guarantees termination. Empty next-sets are kept and explored
/// like any other subset.
///
/// Fails if the initial closure has no outgoing entries at all; a DFA
/// without a single transition out of its start state signals a malformed
/// automaton or an alphabet mismatch.
pub fn subset_construction(
    nfa: &Automaton,
    epsilon_free: &EpsilonFree,
) -> anyhow::Result<TransitionRelation> {
    let initial_closure = &epsilon_free.closures[nfa.initial()];
    let seed_key = initial_closure.key();

    let mut queue = VecDeque::new();
    let mut seen: HashSet<(String, char)> = HashSet::new();

    for input in nfa.input_symbols() {
        if let Some(entry) = epsilon_free.relation.get(&seed_key, input) {
            seen.insert((seed_key.clone(), input));
            queue.push_back(entry.clone());
        }
    }

    if queue.is_empty() {
        bail!(
            "no transition out of the initial closure {}; cannot seed the subset construction",
            initial_closure
        );
    }

    let mut finalized = TransitionRelation::new();

    while let Some(entry) = queue.pop_front() {
        let current = entry.next.clone();
        finalized.insert(entry);

        for input in nfa.input_symbols() {
            if !seen.insert((current.key(), input)) {
                continue;
            }

            let mut target = StateSet::new();
            for state in current.iter() {
                let closure_key = epsilon_free.closures[state].key();
                if let Some(entry) = epsilon_free.relation.get(&closure_key, input) {
                    target.extend_with(&entry.next);
                }
            }

            queue.push_back(TransitionEntry::new(current.clone(), input, target));
        }
    }

    Ok(finalized)
}

/// Renames every distinct state-set in the finalized relation to a fresh
/// canonical state `q0, q1, ...`, in first-encounter order, recording the
/// member names as the canonical state's alias.
///
/// The DFA's initial state is the canonical state of the initial closure;
/// a canonical state is final iff the epsilon closure of at least one of
/// its subset members contains an original final state. Subsets hold raw
/// successor unions, so a member that only reaches a final state through
/// epsilon edges still makes its subset accepting.
pub fn canonicalize(
    nfa: &Automaton,
    epsilon_free: &EpsilonFree,
    subsets: &TransitionRelation,
) -> Automaton {
    let mut canonical: HashMap<String, State> = HashMap::new();
    let mut finals = StateSet::new();
    let mut num = 0;

    for entry in subsets.iter() {
        for set in [&entry.present, &entry.next] {
            let key = set.key();
            if !canonical.contains_key(&key) {
                let state = State::with_alias(format!("q{num}"), set.names());
                num += 1;

                if set
                    .iter()
                    .any(|s| epsilon_free.closures[s].intersects(nfa.finals()))
                {
                    finals.insert(state.clone());
                }

                canonical.insert(key, state);
            }
        }
    }

    let mut relation = TransitionRelation::new();
    for entry in subsets.iter() {
        let present = StateSet::singleton(canonical[&entry.present.key()].clone());
        let next = StateSet::singleton(canonical[&entry.next.key()].clone());
        relation.insert(TransitionEntry::new(present, entry.input, next));
    }

    let states: StateSet = canonical.values().cloned().collect();

    let initial = canonical[&epsilon_free.closures[nfa.initial()].key()].clone();

    let alphabet = nfa.input_symbols().collect();

    Automaton::from_parts(states, alphabet, relation, initial, finals)
}
