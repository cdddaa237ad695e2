/// In this file, we parse textual `spec` representations of automata.
///
/// An example ε-NFA spec is as follows:
/// /// ```
/// /// states
/// ///     p q r
/// /// alphabet
/// ///     0 1 $
/// /// initial
/// ///     p
/// /// final
/// ///     r
/// /// rules
/// ///     f(p, 0) = {p};
/// ///     f(p, 1) = {p, q};
/// ///     f(q, 0) = {q};
/// ///     f(q, 1) = {r};
/// /// ```
///
/// `$` is the reserved epsilon symbol; it may be used in rules as long as it
/// is declared in the alphabet. The right-hand side of a rule is a set of
/// states; the braces may be dropped for a single state.
///
/// Parsing only decomposes the text. Name resolution and well-formedness
/// checks happen in [AutomatonConfig::build], so a malformed description and
/// an undefined reference surface as different errors.
use anyhow::bail;
use itertools::Itertools;
use nom::{
    Parser,
    bytes::complete::tag,
    character::complete::space1,
    error::{ErrorKind, ParseError},
};

use super::{
    Automaton,
    config::{AutomatonConfig, TransitionExpr},
};

fn opt_whitespace<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    nom::character::complete::multispace0(input)
}

fn whitespace<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    nom::character::complete::multispace1(input)
}

fn separator<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, (), E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, _) = opt_whitespace(input)?;
    Ok((input, ()))
}

fn state_name<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    nom::character::complete::alphanumeric1(input)
}

// A single input symbol. Anything goes except whitespace and the punctuation
// the grammar itself uses.
fn symbol<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, char, E> {
    let (rest, c) = nom::character::complete::anychar(input)?;
    if c.is_whitespace() || "(){};,=".contains(c) {
        return Err(nom::Err::Error(E::from_error_kind(input, ErrorKind::Char)));
    }
    Ok((rest, c))
}

// E.g., p q r
fn set_of_states<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<&'a str>, E> {
    nom::multi::separated_list1(space1, state_name).parse(input)
}

fn states<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, Vec<&'a str>, E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("states")(input)?;
    let (input, _) = whitespace(input)?;

    set_of_states(input)
}

#[test]
fn test_states_1() {
    let input = r#"
    states
        p q r
    "#;

    let (_, states) = states::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(states, vec!["p", "q", "r"]);
}

fn alphabet<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, Vec<char>, E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("alphabet")(input)?;
    let (input, _) = whitespace(input)?;

    nom::multi::separated_list1(space1, symbol).parse(input)
}

#[test]
fn test_alphabet_1() {
    let input = r#"
    alphabet
        0 1 $
    "#;

    let (_, alphabet) = alphabet::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(alphabet, vec!['0', '1', '$']);
}

fn initial<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("initial")(input)?;
    let (input, _) = whitespace(input)?;

    state_name(input)
}

fn final_states<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<&'a str>, E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("final")(input)?;
    let (input, _) = whitespace(input)?;

    set_of_states(input)
}

fn braced_set<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<&'a str>, E> {
    let (input, _) = tag("{")(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, names) = nom::multi::separated_list1(separator, state_name).parse(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("}")(input)?;

    Ok((input, names))
}

#[derive(Debug, Clone)]
pub struct RuleSpec<'a> {
    pub present: &'a str,
    pub input: char,
    pub next: Vec<&'a str>,
}

// E.g., f(p, 1) = {p, q};
fn rule<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, RuleSpec<'a>, E> {
    let (input, _) = tag("f")(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("(")(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, present) = state_name(input)?;
    let (input, _) = separator(input)?;
    let (input, sym) = symbol(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag(")")(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("=")(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, next) =
        nom::branch::alt((braced_set, nom::combinator::map(state_name, |s| vec![s])))
            .parse(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag(";")(input)?;

    Ok((
        input,
        RuleSpec {
            present,
            input: sym,
            next,
        },
    ))
}

#[test]
fn test_rule_1() {
    let input = "f(p, 1) = {p, q};";
    let (_, rule) = rule::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(rule.present, "p");
    assert_eq!(rule.input, '1');
    assert_eq!(rule.next, vec!["p", "q"]);
}

#[test]
fn test_rule_2() {
    let input = "f(A, $) = C;";
    let (_, rule) = rule::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(rule.present, "A");
    assert_eq!(rule.input, '$');
    assert_eq!(rule.next, vec!["C"]);
}

fn rules<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<RuleSpec<'a>>, E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag("rules")(input)?;
    let (input, _) = whitespace(input)?;

    nom::multi::many1(nom::sequence::terminated(rule, opt_whitespace)).parse(input)
}

#[derive(Debug, Clone)]
pub struct AutomatonSpec<'a> {
    pub states: Vec<&'a str>,
    pub alphabet: Vec<char>,
    pub initial: &'a str,
    pub final_states: Vec<&'a str>,
    pub rules: Vec<RuleSpec<'a>>,
}

impl<'a> AutomatonSpec<'a> {
    fn p(input: &'a str) -> nom::IResult<&'a str, AutomatonSpec<'a>, nom::error::Error<&'a str>> {
        let (input, states) = states(input)?;
        let (input, alphabet) = alphabet(input)?;
        let (input, initial) = initial(input)?;
        let (input, final_states) = final_states(input)?;
        let (input, rules) = rules(input)?;
        let (input, _) = opt_whitespace(input)?;

        Ok((
            input,
            AutomatonSpec {
                states,
                alphabet,
                initial,
                final_states,
                rules,
            },
        ))
    }

    pub fn parse(input: &'a str) -> anyhow::Result<AutomatonSpec<'a>> {
        match Self::p(input) {
            Ok((rest, spec)) => {
                if !rest.is_empty() {
                    bail!("failed to parse automaton spec: trailing input at `{rest}`");
                }
                Ok(spec)
            }
            Err(e) => Err(anyhow::anyhow!("failed to parse automaton spec: {}", e)),
        }
    }

    pub fn to_config(&self) -> AutomatonConfig {
        AutomatonConfig {
            states: self.states.iter().map(|s| s.to_string()).collect(),
            alphabet: self.alphabet.clone(),
            initial: self.initial.to_string(),
            finals: self.final_states.iter().map(|s| s.to_string()).collect(),
            transitions: self
                .rules
                .iter()
                .map(|r| TransitionExpr {
                    present: r.present.to_string(),
                    input: r.input,
                    next: r.next.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn to_automaton(&self) -> anyhow::Result<Automaton> {
        self.to_config().build()
    }
}

#[test]
fn test_spec_1() {
    let spec_str = r#"
    states
        p q r
    alphabet
        0 1 $
    initial
        p
    final
        r
    rules
        f(p, 0) = {p};
        f(p, 1) = {p, q};
        f(q, 0) = r;
        f(q, 1) = r;"#;

    let spec = AutomatonSpec::parse(spec_str).unwrap();
    assert_eq!(spec.states, vec!["p", "q", "r"]);
    assert_eq!(spec.alphabet, vec!['0', '1', '$']);
    assert_eq!(spec.initial, "p");
    assert_eq!(spec.final_states, vec!["r"]);
    assert_eq!(spec.rules.len(), 4);
    assert_eq!(spec.rules[1].next, vec!["p", "q"]);
}

#[test]
fn test_spec_2_trailing_garbage() {
    let spec_str = r#"
    states
        p
    alphabet
        0
    initial
        p
    final
        p
    rules
        f(p, 0) = p;
    whatever"#;

    assert!(AutomatonSpec::parse(spec_str).is_err());
}

pub trait ToSpecFormat {
    fn to_spec_format(&self) -> String;
}

impl ToSpecFormat for Automaton {
    fn to_spec_format(&self) -> String {
        let mut spec = String::new();

        spec.push_str("states\n    ");
        spec.push_str(&self.states().iter().map(|s| s.name()).join(" "));
        spec.push('\n');

        spec.push_str("alphabet\n    ");
        spec.push_str(&self.alphabet().iter().join(" "));
        spec.push('\n');

        spec.push_str("initial\n    ");
        spec.push_str(self.initial().name());
        spec.push('\n');

        spec.push_str("final\n    ");
        spec.push_str(&self.finals().iter().map(|s| s.name()).join(" "));
        spec.push('\n');

        spec.push_str("rules\n");
        for entry in self.transitions().iter() {
            let present = entry
                .present
                .first()
                .map(|s| s.name().to_string())
                .unwrap_or_default();
            let next = entry.next.iter().map(|s| s.name()).join(", ");
            spec.push_str(&format!(
                "    f({}, {}) = {{{}}};\n",
                present, entry.input, next
            ));
        }

        spec
    }
}

#[test]
fn test_spec_roundtrip() {
    use crate::automaton::config::rule;

    let nfa = AutomatonConfig::new(
        &["p", "q", "r"],
        &['0', '1', '$'],
        "p",
        &["r"],
        vec![
            rule("p", '0', &["p"]),
            rule("p", '1', &["p", "q"]),
            rule("q", '$', &["r"]),
        ],
    )
    .build()
    .unwrap();

    let rendered = nfa.to_spec_format();
    let spec = AutomatonSpec::parse(&rendered).unwrap();
    assert_eq!(spec.states, vec!["p", "q", "r"]);
    assert_eq!(spec.alphabet, vec!['$', '0', '1']);
    assert_eq!(spec.initial, "p");
    assert_eq!(spec.final_states, vec!["r"]);
    assert_eq!(spec.rules.len(), 3);
}
