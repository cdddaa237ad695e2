use nfa2dfa::automaton::config::{rule, AutomatonConfig};

#[test]
fn test_build_valid_automaton() {
    let nfa = AutomatonConfig::new(
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
    .unwrap();

    assert_eq!(nfa.states().len(), 3);
    assert_eq!(nfa.initial().name(), "p");
    assert_eq!(nfa.finals().len(), 1);
    assert_eq!(nfa.transitions().len(), 4);
}

#[test]
fn test_undefined_initial_state() {
    let err = AutomatonConfig::new(&["p"], &['0'], "x", &["p"], vec![])
        .build()
        .unwrap_err();

    assert!(err.to_string().contains("initial state not found by name: x"));
}

#[test]
fn test_undefined_final_state() {
    let err = AutomatonConfig::new(&["p"], &['0'], "p", &["x"], vec![])
        .build()
        .unwrap_err();

    assert!(err.to_string().contains("final state not found by name: x"));
}

#[test]
fn test_undefined_present_state() {
    let err = AutomatonConfig::new(&["p"], &['0'], "p", &["p"], vec![rule("x", '0', &["p"])])
        .build()
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("present state not found by name: x"));
}

#[test]
fn test_undefined_next_state() {
    let err = AutomatonConfig::new(&["p"], &['0'], "p", &["p"], vec![rule("p", '0', &["x"])])
        .build()
        .unwrap_err();

    assert!(err.to_string().contains("next state not found by name: x"));
}

#[test]
fn test_undeclared_input_symbol() {
    let err = AutomatonConfig::new(&["p"], &['0'], "p", &["p"], vec![rule("p", '1', &["p"])])
        .build()
        .unwrap_err();

    assert!(err.to_string().contains("not in the alphabet"));
}

#[test]
fn test_missing_fields() {
    let missing_states = AutomatonConfig::new(&[], &['0'], "p", &["p"], vec![]);
    assert!(missing_states.build().is_err());

    let missing_alphabet = AutomatonConfig::new(&["p"], &[], "p", &["p"], vec![]);
    assert!(missing_alphabet.build().is_err());

    let missing_initial = AutomatonConfig::new(&["p"], &['0'], "", &["p"], vec![]);
    assert!(missing_initial.build().is_err());

    let missing_finals = AutomatonConfig::new(&["p"], &['0'], "p", &[], vec![]);
    assert!(missing_finals.build().is_err());
}

#[test]
fn test_epsilon_must_be_declared() {
    // `$` in a rule but not in the alphabet is an upfront validation error.
    let err = AutomatonConfig::new(
        &["p", "q"],
        &['0', '1'],
        "p",
        &["q"],
        vec![rule("p", '$', &["q"])],
    )
    .build()
    .unwrap_err();

    assert!(err.to_string().contains("not in the alphabet"));
}
