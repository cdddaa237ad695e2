use itertools::{repeat_n, Itertools};

use super::accepts;
use crate::automaton::Automaton;

/// Checks if two automata accept the same language.
/// This is done by checking if the non-epsilon alphabets are the same and
/// then checking if the automata accept the same words up to a certain
/// length. An ε-NFA and its converted DFA compare over the same alphabet
/// because the epsilon symbol is excluded on both sides.
pub fn same_language(a: &Automaton, b: &Automaton, max_word_length: usize) -> bool {
    let alphabet = a.input_symbols().collect_vec();
    if alphabet != b.input_symbols().collect_vec() {
        return false;
    }

    for i in 0..max_word_length {
        let combinations = repeat_n(alphabet.iter(), i).multi_cartesian_product();

        for word in combinations {
            let word: Vec<char> = word.into_iter().copied().collect_vec();
            if accepts(a, &word) != accepts(b, &word) {
                return false;
            }
        }
    }

    true
}

pub fn assert_same_language(a: &Automaton, b: &Automaton, max_word_length: usize) {
    let alphabet = a.input_symbols().collect_vec();
    if alphabet != b.input_symbols().collect_vec() {
        panic!("Alphabets are not the same");
    }

    for i in 0..max_word_length {
        let combinations = repeat_n(alphabet.iter(), i).multi_cartesian_product();

        for word in combinations {
            let word: Vec<char> = word.into_iter().copied().collect_vec();
            match (accepts(a, &word), accepts(b, &word)) {
                (true, false) => {
                    panic!(
                        "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                        word
                    );
                }
                (false, true) => {
                    panic!(
                        "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                        word
                    );
                }
                _ => {}
            }
        }
    }
}
