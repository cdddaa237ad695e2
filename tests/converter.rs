use nfa2dfa::{
    automaton::{
        config::{rule, AutomatonConfig},
        state::{State, StateSet},
        Automaton,
    },
    converter::{eliminate_epsilon, epsilon_nfa_to_dfa, subset_construction},
    validation::{
        accepts,
        same_language::{assert_same_language, same_language},
    },
};

fn set(names: &[&str]) -> StateSet {
    names.iter().map(|n| State::new(*n)).collect()
}

/// The classroom subset-construction example: no epsilon transitions,
/// accepts every word over {0,1} whose second-to-last symbol is 1.
fn classroom_example() -> Automaton {
    AutomatonConfig::new(
        &["p", "q", "r"],
        &['0', '1', '$'],
        "p",
        &["r"],
        vec![
            rule("p", '0', &["p"]),
            rule("p", '1', &["p", "q"]),
            rule("q", '0', &["r"]),
            rule("q", '1', &["r"]),
        ],
    )
    .build()
    .unwrap()
}

/// ε-NFA accepting 0^n 1 through epsilon edges A -> C, B -> D, C -> D.
fn epsilon_example() -> Automaton {
    AutomatonConfig::new(
        &["A", "B", "C", "D", "E"],
        &['0', '1', '$'],
        "A",
        &["E"],
        vec![
            rule("A", '0', &["B"]),
            rule("A", '$', &["C"]),
            rule("B", '$', &["D"]),
            rule("C", '$', &["D"]),
            rule("C", '1', &["E"]),
            rule("D", '0', &["D"]),
            rule("D", '1', &["E"]),
        ],
    )
    .build()
    .unwrap()
}

#[test]
fn test_elimination_is_noop_without_epsilon() {
    let nfa = classroom_example();
    let epsilon_free = eliminate_epsilon(&nfa);

    // All closures are singletons, so the relation mirrors the original.
    assert_eq!(epsilon_free.relation.len(), 4);
    for entry in epsilon_free.relation.iter() {
        assert_eq!(entry.present.len(), 1);
    }
    assert_eq!(
        epsilon_free.relation.get("p", '1').unwrap().next,
        set(&["p", "q"])
    );
}

#[test]
fn test_elimination_keys_by_closure_sets() {
    let nfa = epsilon_example();
    let epsilon_free = eliminate_epsilon(&nfa);

    assert_eq!(epsilon_free.closures[&State::new("A")], set(&["A", "C", "D"]));

    // Entries are keyed by the closure of their source state; the next-set
    // unions the direct successors of every closure member.
    assert_eq!(
        epsilon_free.relation.get("A,C,D", '0').unwrap().next,
        set(&["B", "D"])
    );
    assert_eq!(
        epsilon_free.relation.get("A,C,D", '1').unwrap().next,
        set(&["E"])
    );
    assert_eq!(
        epsilon_free.relation.get("B,D", '0').unwrap().next,
        set(&["D"])
    );

    // Two entries each for the closures of A, B, C and D; E accepts nothing.
    assert_eq!(epsilon_free.relation.len(), 8);
    for entry in epsilon_free.relation.iter() {
        assert_ne!(entry.input, '$');
    }
}

#[test]
fn test_classroom_example_dfa() {
    let nfa = classroom_example();
    let dfa = epsilon_nfa_to_dfa(&nfa).unwrap();

    assert_eq!(dfa.states().len(), 4);
    assert!(!dfa.alphabet().contains(&'$'));

    // Canonical names are assigned in first-encounter order over the
    // finalized entries.
    let aliases: Vec<(String, Vec<String>)> = dfa
        .states()
        .iter()
        .map(|s| (s.name().to_string(), s.alias().unwrap().to_vec()))
        .collect();
    assert_eq!(
        aliases,
        vec![
            ("q0".to_string(), vec!["p".to_string()]),
            ("q1".to_string(), vec!["p".to_string(), "q".to_string()]),
            ("q2".to_string(), vec!["p".to_string(), "r".to_string()]),
            (
                "q3".to_string(),
                vec!["p".to_string(), "q".to_string(), "r".to_string()]
            ),
        ]
    );

    assert_eq!(dfa.initial().name(), "q0");

    // Final states are exactly those whose alias packs `r`.
    let finals: Vec<&str> = dfa.finals().iter().map(|s| s.name()).collect();
    assert_eq!(finals, vec!["q2", "q3"]);

    let moves: Vec<(String, char, String)> = dfa
        .transitions()
        .iter()
        .map(|e| {
            (
                e.present.first().unwrap().name().to_string(),
                e.input,
                e.next.first().unwrap().name().to_string(),
            )
        })
        .collect();
    let expected = [
        ("q0", '0', "q0"),
        ("q0", '1', "q1"),
        ("q1", '0', "q2"),
        ("q1", '1', "q3"),
        ("q2", '0', "q0"),
        ("q2", '1', "q1"),
        ("q3", '0', "q2"),
        ("q3", '1', "q3"),
    ];
    assert_eq!(moves.len(), expected.len());
    for (from, input, to) in expected {
        assert!(moves.contains(&(from.to_string(), input, to.to_string())));
    }

    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_dfa_is_total_and_deterministic() {
    let dfa = epsilon_nfa_to_dfa(&classroom_example()).unwrap();

    // Exactly one entry per reachable (state, input) pair.
    let inputs: Vec<char> = dfa.input_symbols().collect();
    assert_eq!(dfa.transitions().len(), dfa.states().len() * inputs.len());

    for state in dfa.states().iter() {
        for &input in &inputs {
            let entry = dfa.transitions().get(&state.to_string(), input).unwrap();
            assert_eq!(entry.next.len(), 1);
        }
    }
}

#[test]
fn test_epsilon_example_dfa() {
    let nfa = epsilon_example();
    let dfa = epsilon_nfa_to_dfa(&nfa).unwrap();

    // Subsets {A,C,D}, {B,D}, {E}, {D} and the dead subset {}.
    assert_eq!(dfa.states().len(), 5);
    assert_eq!(dfa.initial().alias().unwrap(), ["A", "C", "D"]);

    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_dead_subset_loops_to_itself() {
    let dfa = epsilon_nfa_to_dfa(&epsilon_example()).unwrap();

    let dead = dfa
        .states()
        .iter()
        .find(|s| s.alias().unwrap().is_empty())
        .unwrap();
    assert!(!dfa.is_final(dead));

    for input in dfa.input_symbols() {
        let entry = dfa.transitions().get(&dead.to_string(), input).unwrap();
        assert_eq!(entry.next.first().unwrap(), dead);
    }
}

#[test]
fn test_termination_bound() {
    let nfa = classroom_example();
    let dfa = epsilon_nfa_to_dfa(&nfa).unwrap();
    assert!(dfa.states().len() <= 1 << nfa.states().len());

    let nfa = epsilon_example();
    let dfa = epsilon_nfa_to_dfa(&nfa).unwrap();
    assert!(dfa.states().len() <= 1 << nfa.states().len());
}

#[test]
fn test_canonical_naming_is_stable() {
    let nfa = classroom_example();

    let first = epsilon_nfa_to_dfa(&nfa).unwrap();
    let second = epsilon_nfa_to_dfa(&nfa).unwrap();

    assert_eq!(format!("{:?}", first), format!("{:?}", second));
}

#[test]
fn test_epsilon_edge_into_final_state() {
    // s1 reaches the final state s2 by epsilon alone, so the subset {s1}
    // accepts even though s2 is not a member.
    let nfa = AutomatonConfig::new(
        &["s0", "s1", "s2"],
        &['a', '$'],
        "s0",
        &["s2"],
        vec![rule("s0", 'a', &["s1"]), rule("s1", '$', &["s2"])],
    )
    .build()
    .unwrap();

    assert!(accepts(&nfa, &['a']));

    let dfa = epsilon_nfa_to_dfa(&nfa).unwrap();
    assert!(accepts(&dfa, &['a']));

    let accepting = dfa
        .states()
        .iter()
        .find(|s| s.alias().unwrap() == ["s1"])
        .unwrap();
    assert!(dfa.is_final(accepting));
    assert!(!dfa.is_final(dfa.initial()));

    assert_same_language(&nfa, &dfa, 4);
}

#[test]
fn test_conversion_fails_without_initial_transition() {
    // Only an epsilon cycle; the initial closure accepts no real input.
    let nfa = AutomatonConfig::new(
        &["A", "B"],
        &['a', '$'],
        "A",
        &["B"],
        vec![rule("A", '$', &["B"]), rule("B", '$', &["A"])],
    )
    .build()
    .unwrap();

    let epsilon_free = eliminate_epsilon(&nfa);
    assert!(epsilon_free.relation.is_empty());

    let err = epsilon_nfa_to_dfa(&nfa).unwrap_err();
    assert!(err.to_string().contains("no transition out of the initial closure"));

    // The phase itself reports the same failure.
    assert!(subset_construction(&nfa, &epsilon_free).is_err());
}

#[test]
fn test_same_language_distinguishes_automata() {
    let penultimate_one = classroom_example();
    let zeros_then_one = epsilon_example();

    // Same non-epsilon alphabet, different languages ("1" separates them).
    assert!(!same_language(&penultimate_one, &zeros_then_one, 4));
    assert!(same_language(&penultimate_one, &penultimate_one, 4));
}
