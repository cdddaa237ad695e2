use std::{env, fs};

use anyhow::Context;
use itertools::Itertools;
use nfa2dfa::{
    automaton::{
        config::{rule, AutomatonConfig},
        spec::{AutomatonSpec, ToSpecFormat},
        Automaton,
    },
    converter,
    logger::{LogLevel, Logger},
};

fn main() -> anyhow::Result<()> {
    let logger = Logger::new(LogLevel::Info, "nfa2dfa");

    let nfa = match env::args().nth(1) {
        Some(path) => {
            logger.info(&format!("loading automaton from file: {path}"));
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read automaton spec from `{path}`"))?;
            AutomatonSpec::parse(&text)?.to_automaton()?
        }
        None => {
            logger.info("no file specified, converting the built-in example");
            builtin_example()?
        }
    };

    log_automaton(&logger, "NFA", &nfa);

    for state in nfa.states().iter() {
        let closure = nfa.epsilon_closure(state, true);
        logger.info(&format!("closure({state}) = {closure}"));
    }

    let dfa = converter::epsilon_nfa_to_dfa(&nfa)?;

    logger.empty(LogLevel::Info);
    log_automaton(&logger, "DFA", &dfa);
    logger.debug(&dfa.to_spec_format());

    Ok(())
}

/// The classic classroom example: accepts every word over {0,1} whose
/// second-to-last symbol is 1.
fn builtin_example() -> anyhow::Result<Automaton> {
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
}

fn log_automaton(logger: &Logger, name: &str, automaton: &Automaton) {
    logger
        .object(name)
        .add_field("states", automaton.states().to_string())
        .add_field("alphabet", automaton.alphabet().iter().join(","))
        .add_field(
            "transitions",
            automaton
                .transitions()
                .iter()
                .map(|e| e.to_string())
                .join("\n    "),
        )
        .add_field("initial", automaton.initial().to_string())
        .add_field("final", automaton.finals().to_string())
        .log(LogLevel::Info);
}
