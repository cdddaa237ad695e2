use crate::automaton::{state::StateSet, Automaton};

pub mod same_language;

/// Simulates an automaton on a word over the non-epsilon alphabet.
///
/// Runs the usual set simulation: start from the closure of the initial
/// state, follow the direct successors of the current set for each symbol
/// and close the result again. This handles deterministic and
/// non-deterministic machines alike, so converted DFAs and their source
/// ε-NFAs can be compared word by word.
pub fn accepts(automaton: &Automaton, word: &[char]) -> bool {
    let mut current = automaton.epsilon_closure(automaton.initial(), true);

    for &symbol in word {
        let direct = automaton.transitions().next_states_of_set(&current, symbol);

        if direct.is_empty() {
            return false;
        }

        let mut next = StateSet::new();
        for state in direct.iter() {
            next.extend_with(&automaton.epsilon_closure(state, true));
        }

        current = next;
    }

    let accepted = current.iter().any(|state| automaton.is_final(state));
    accepted
}
