use std::collections::BTreeSet;

use anyhow::bail;

use super::{
    state::{State, StateSet},
    transition::{TransitionEntry, TransitionRelation},
    Automaton,
};

/// One transition expression of the form `present, input -> {next, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionExpr {
    pub present: String,
    pub input: char,
    pub next: Vec<String>,
}

/// Shorthand for building a [TransitionExpr].
pub fn rule(present: &str, input: char, next: &[&str]) -> TransitionExpr {
    TransitionExpr {
        present: present.to_string(),
        input,
        next: next.iter().map(|s| s.to_string()).collect(),
    }
}

/// Plain description of an automaton, validated as a whole by [build].
///
/// All fields are by name; [build] resolves every reference upfront and
/// fails with a descriptive error on an undefined name or a missing field,
/// so the converter can assume a structurally valid machine.
///
/// [build]: AutomatonConfig::build
#[derive(Debug, Clone, Default)]
pub struct AutomatonConfig {
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub initial: String,
    pub finals: Vec<String>,
    pub transitions: Vec<TransitionExpr>,
}

impl AutomatonConfig {
    pub fn new(
        states: &[&str],
        alphabet: &[char],
        initial: &str,
        finals: &[&str],
        transitions: Vec<TransitionExpr>,
    ) -> Self {
        AutomatonConfig {
            states: states.iter().map(|s| s.to_string()).collect(),
            alphabet: alphabet.to_vec(),
            initial: initial.to_string(),
            finals: finals.iter().map(|s| s.to_string()).collect(),
            transitions,
        }
    }

    /// Validates the description and produces the automaton.
    ///
    /// Duplicate `(present, input)` expressions are merged by unioning their
    /// next-state sets, so the resulting relation has at most one entry per
    /// key. The relation may be non-deterministic and may use [EPSILON]
    /// provided the symbol is declared in the alphabet.
    ///
    /// [EPSILON]: super::EPSILON
    pub fn build(&self) -> anyhow::Result<Automaton> {
        if self.states.is_empty() {
            bail!("missing automaton argument: states");
        }
        if self.alphabet.is_empty() {
            bail!("missing automaton argument: alphabet");
        }
        if self.initial.is_empty() {
            bail!("missing automaton argument: initial state");
        }
        if self.finals.is_empty() {
            bail!("missing automaton argument: final states");
        }

        let states: StateSet = self.states.iter().map(State::new).collect();
        let alphabet: BTreeSet<char> = self.alphabet.iter().copied().collect();

        let initial = self.resolve(&states, &self.initial, "initial state")?;
        let mut finals = StateSet::new();
        for name in &self.finals {
            finals.insert(self.resolve(&states, name, "final state")?);
        }

        let mut relation = TransitionRelation::new();
        for expr in &self.transitions {
            let present = self.resolve(&states, &expr.present, "present state")?;
            if !alphabet.contains(&expr.input) {
                bail!(
                    "input symbol '{}' in transition for state `{}` is not in the alphabet",
                    expr.input,
                    expr.present
                );
            }

            let mut next = StateSet::new();
            for name in &expr.next {
                next.insert(self.resolve(&states, name, "next state")?);
            }

            relation.insert(TransitionEntry::new(
                StateSet::singleton(present),
                expr.input,
                next,
            ));
        }

        Ok(Automaton::from_parts(
            states, alphabet, relation, initial, finals,
        ))
    }

    fn resolve(&self, states: &StateSet, name: &str, role: &str) -> anyhow::Result<State> {
        let state = State::new(name);
        if !states.contains(&state) {
            bail!("{} not found by name: {}", role, name);
        }
        Ok(state)
    }
}
