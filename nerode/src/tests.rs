use crate::dfa::Dfa;
use crate::parser;
use crate::parser::RegexParseError;
use crate::InputError;
use ::regex::Regex as LibRegex;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn pipeline(pattern: &str) -> (crate::nfa::Nfa, Dfa, Dfa) {
    let nfa = parser::regex(pattern).unwrap().to_nfa();
    let dfa = nfa.to_dfa();
    let minimal = dfa.minimize();
    (nfa, dfa, minimal)
}

#[test]
fn concatenation_insertion() {
    assert_eq!(parser::regex("ab").unwrap().normalized_pattern(), "a.b");
    assert_eq!(
        parser::regex("ε|a*b").unwrap().normalized_pattern(),
        "ε|a*.b"
    );
    assert_eq!(
        parser::regex("(0|(1(01*(00)*0)*1)*)*")
            .unwrap()
            .normalized_pattern(),
        "(0|(1.(0.1*.(0.0)*.0)*.1)*)*"
    );
}

#[test]
fn postfix_conversion() {
    assert_eq!(parser::regex("ε|a*.b").unwrap().postfix_pattern(), "εa*b.|");
    assert_eq!(
        parser::regex("(0|(1.(0.1*.(0.0)*.0)*.1)*)*")
            .unwrap()
            .postfix_pattern(),
        "0101*00.*0...*1..*|*"
    );
    // normalization and postfix conversion commute with the raw surface form
    assert_eq!(
        parser::regex("(0|(1(01*(00)*0)*1)*)*")
            .unwrap()
            .postfix_pattern(),
        "0101*00.*0...*1..*|*"
    );
}

#[test]
fn whitespace_is_discarded() {
    let spaced = parser::regex(" a | b ").unwrap();
    let tight = parser::regex("a|b").unwrap();
    assert_eq!(spaced.normalized_pattern(), tight.normalized_pattern());
    assert_eq!(spaced.postfix_pattern(), tight.postfix_pattern());
}

#[test]
fn parse_errors() {
    assert_eq!(parser::regex(""), Err(RegexParseError::EmptyPattern));
    assert_eq!(parser::regex("   "), Err(RegexParseError::EmptyPattern));
    assert_eq!(parser::regex("()"), Err(RegexParseError::EmptyGroup));
    assert_eq!(parser::regex("a()b"), Err(RegexParseError::EmptyGroup));
    assert_eq!(parser::regex("(a|b"), Err(RegexParseError::UnmatchedOpenParen));
    assert_eq!(parser::regex("((a)"), Err(RegexParseError::UnmatchedOpenParen));
    assert_eq!(parser::regex("a)"), Err(RegexParseError::UnmatchedCloseParen));
    assert_eq!(parser::regex(")"), Err(RegexParseError::UnmatchedCloseParen));
    assert_eq!(parser::regex("a|"), Err(RegexParseError::MissingOperand('|')));
    assert_eq!(parser::regex("|a"), Err(RegexParseError::MissingOperand('|')));
    assert_eq!(parser::regex("a||b"), Err(RegexParseError::MissingOperand('|')));
    assert_eq!(parser::regex("*a"), Err(RegexParseError::MissingOperand('*')));
    assert_eq!(parser::regex(".b"), Err(RegexParseError::MissingOperand('.')));
}

#[test]
fn empty_string_pattern() {
    let nfa = parser::regex("ε").unwrap().to_nfa();
    assert!(nfa.accepts("").unwrap());
    // the alphabet of ε is empty, so any symbol at all is unknown
    assert_eq!(nfa.accepts("a"), Err(InputError::UnknownSymbol('a')));

    let dfa = nfa.to_dfa();
    assert!(dfa.accepts("").unwrap());
    assert_eq!(dfa.minimize().states().len(), 1);
}

#[test]
fn singleton_pattern() {
    let (nfa, dfa, minimal) = pipeline("a");
    for automaton in [&dfa, &minimal] {
        assert!(automaton.accepts("a").unwrap());
        assert!(!automaton.accepts("").unwrap());
        assert!(!automaton.accepts("aa").unwrap());
    }
    assert!(nfa.accepts("a").unwrap());
    assert!(!nfa.accepts("aa").unwrap());
}

#[test]
fn kleene_star_pattern() {
    let (nfa, dfa, minimal) = pipeline("a*");
    for accepted in ["", "a", "aaaa", "aaaaaaaaa"] {
        assert!(nfa.accepts(accepted).unwrap());
        assert!(dfa.accepts(accepted).unwrap());
        assert!(minimal.accepts(accepted).unwrap());
    }
    // b is not part of the alphabet of a*, so it errors rather than rejects
    assert_eq!(nfa.accepts("b"), Err(InputError::UnknownSymbol('b')));
    assert_eq!(dfa.accepts("ab"), Err(InputError::UnknownSymbol('b')));
    // ε is a meta-symbol and never valid input
    assert_eq!(nfa.accepts("ε"), Err(InputError::NullSymbol));
    assert_eq!(dfa.accepts("ε"), Err(InputError::NullSymbol));
}

#[test]
fn alternation_pattern() {
    let (nfa, dfa, minimal) = pipeline("a|b");
    for accepted in ["a", "b"] {
        assert!(nfa.accepts(accepted).unwrap());
        assert!(dfa.accepts(accepted).unwrap());
        assert!(minimal.accepts(accepted).unwrap());
    }
    for rejected in ["", "ab", "ba", "bb", "aa"] {
        assert!(!nfa.accepts(rejected).unwrap());
        assert!(!dfa.accepts(rejected).unwrap());
        assert!(!minimal.accepts(rejected).unwrap());
    }
}

#[test]
fn concatenation_pattern() {
    let (nfa, dfa, minimal) = pipeline("a.b");
    assert!(nfa.accepts("ab").unwrap());
    assert!(dfa.accepts("ab").unwrap());
    assert!(minimal.accepts("ab").unwrap());
    for rejected in ["", "a", "b", "ba", "aa"] {
        assert!(!nfa.accepts(rejected).unwrap());
        assert!(!dfa.accepts(rejected).unwrap());
        assert!(!minimal.accepts(rejected).unwrap());
    }
}

#[test]
fn empty_string_alternative_pattern() {
    let (nfa, dfa, minimal) = pipeline("ε|a*.b");
    for accepted in ["", "b", "ab", "aab"] {
        assert!(nfa.accepts(accepted).unwrap());
        assert!(dfa.accepts(accepted).unwrap());
        assert!(minimal.accepts(accepted).unwrap());
    }
    for rejected in ["a", "aa", "bb"] {
        assert!(!nfa.accepts(rejected).unwrap());
        assert!(!dfa.accepts(rejected).unwrap());
        assert!(!minimal.accepts(rejected).unwrap());
    }
}

#[test]
fn nested_repetition_pattern() {
    let (nfa, dfa, minimal) = pipeline("(0|(1(01*(00)*0)*1)*)*");
    for accepted in [
        "", "0", "00", "11", "000", "011", "110", "0000", "0011", "0110", "1001", "1100",
        "1111", "00000",
    ] {
        assert!(nfa.accepts(accepted).unwrap(), "should accept '{accepted}'");
        assert!(dfa.accepts(accepted).unwrap(), "should accept '{accepted}'");
        assert!(
            minimal.accepts(accepted).unwrap(),
            "should accept '{accepted}'"
        );
    }
    for rejected in ["1", "10", "01"] {
        assert!(!nfa.accepts(rejected).unwrap(), "should reject '{rejected}'");
        assert!(!dfa.accepts(rejected).unwrap(), "should reject '{rejected}'");
        assert!(
            !minimal.accepts(rejected).unwrap(),
            "should reject '{rejected}'"
        );
    }
}

#[test]
fn kleene_plus_and_optional() {
    let (nfa, dfa, minimal) = pipeline("(ab)+");
    for automaton in [&dfa, &minimal] {
        assert!(automaton.accepts("ab").unwrap());
        assert!(automaton.accepts("ababab").unwrap());
        assert!(!automaton.accepts("").unwrap());
        assert!(!automaton.accepts("aba").unwrap());
    }
    assert!(nfa.accepts("abab").unwrap());

    let optional = parser::regex("ab?").unwrap().to_nfa().to_dfa();
    assert!(optional.accepts("a").unwrap());
    assert!(optional.accepts("ab").unwrap());
    assert!(!optional.accepts("abb").unwrap());

    // A+ accepts the same language as A.A*, and A? the same as A|ε
    let plus = parser::regex("a+").unwrap().to_nfa().to_dfa();
    let unrolled = parser::regex("a.a*").unwrap().to_nfa().to_dfa();
    assert!(plus.equivalent_to(&unrolled));
    let question = parser::regex("a?").unwrap().to_nfa().to_dfa();
    let spelled_out = parser::regex("a|ε").unwrap().to_nfa().to_dfa();
    assert!(question.equivalent_to(&spelled_out));
}

#[test]
fn subset_construction_assigns_start_id_zero() {
    let (_, dfa, minimal) = pipeline("(a|b)*a");
    assert_eq!(dfa.start(), 0);
    assert!(dfa.states().contains(&0));
    assert!(minimal.equivalent_to(&dfa));
}

#[test]
fn trap_state_completion() {
    // a|b is stuck after its first symbol, so the construction needs a trap state
    let (_, dfa, _) = pipeline("a|b");
    let trap = dfa.trap().expect("a|b should need a trap state");
    assert!(!dfa.is_accepting(trap));
    for &state in dfa.states() {
        for &symbol in dfa.alphabet() {
            let successor = dfa
                .transition(state, symbol)
                .expect("the completed transition function should be total");
            assert!(dfa.states().contains(&successor));
        }
    }
    for &symbol in dfa.alphabet() {
        assert_eq!(dfa.transition(trap, symbol), Some(trap));
    }

    // (a|b)* can always keep reading, so the construction is total on its own
    let (_, dfa, _) = pipeline("(a|b)*");
    assert_eq!(dfa.trap(), None);
    for &state in dfa.states() {
        for &symbol in dfa.alphabet() {
            assert!(dfa.transition(state, symbol).is_some());
        }
    }
}

#[test]
fn minimized_alternation_has_three_states() {
    let (_, dfa, minimal) = pipeline("a|b");
    // one state reading the first symbol, one accepting state, one trap state
    assert_eq!(minimal.states().len(), 3);
    assert!(minimal.states().len() <= dfa.states().len());
    assert!(minimal.equivalent_to(&dfa));
}

#[test]
fn minimal_state_counts_match_language_index() {
    assert_eq!(pipeline("a*").2.states().len(), 1);
    assert_eq!(pipeline("(a|b)*").2.states().len(), 1);
    assert_eq!(pipeline("a|b").2.states().len(), 3);
    // "", "a", "ab" and the dead class
    assert_eq!(pipeline("a.b").2.states().len(), 4);
}

#[test]
fn dfa_equivalence() {
    let (_, left, _) = pipeline("a|b");
    let (_, right, _) = pipeline("b|a");
    assert!(left.equivalent_to(&right));

    let (_, star, _) = pipeline("a*");
    let (_, plus, _) = pipeline("a+");
    assert!(!star.equivalent_to(&plus)); // the empty string separates them

    // different alphabets are never equivalent
    let (_, ab, _) = pipeline("a.b");
    assert!(!ab.equivalent_to(&star));
}

#[test]
fn evaluators_step_symbol_by_symbol() {
    let (nfa, dfa, _) = pipeline("a*b");

    let mut eval = nfa.evaluator();
    assert!(!eval.is_accepting());
    eval.step('a').unwrap();
    eval.step('a').unwrap();
    assert!(!eval.is_accepting());
    eval.step('b').unwrap();
    assert!(eval.is_accepting());

    let mut eval = dfa.evaluator();
    assert_eq!(eval.current_state(), dfa.start());
    eval.step('b').unwrap();
    assert!(eval.is_accepting());
    // stepping past the accept state of a*b can only land in the trap
    eval.step('b').unwrap();
    assert!(!eval.is_accepting());
    assert_eq!(eval.step('a'), Ok(dfa.trap().unwrap()));
}

#[test]
fn tables_render_every_state() {
    let (nfa, dfa, _) = pipeline("a|b");
    let table = nfa.to_table();
    assert!(table.contains('→'));
    assert!(table.contains('ε'));
    assert!(table.contains('*'));

    let table = dfa.ascii_table();
    assert!(table.contains("->"));
    for &state in dfa.states() {
        assert!(table.contains(&state.to_string()));
    }
}

proptest! {
    /// Tests that normalization is idempotent: normalizing an already-normalized
    /// pattern changes nothing
    #[test]
    fn normalization_idempotent(pattern in random_regex()) {
        let normalized = parser::regex(&pattern).unwrap().normalized_pattern();
        let again = parser::regex(&normalized).unwrap().normalized_pattern();
        prop_assert_eq!(normalized, again);
    }

    /// Tests that every stage of the pipeline accepts exactly the strings matched by the
    /// regex crate, anchored to the full string
    #[test]
    fn pipeline_agrees_with_reference_regex(
        pattern in random_regex(),
        tests in prop::collection::vec("[a-d]{0,8}", 20)
    ) {
        let regex = parser::regex(&pattern).unwrap();
        let nfa = regex.to_nfa();
        let dfa = nfa.to_dfa();
        let minimal = dfa.minimize();
        let lib_regex = LibRegex::new(&format!("^({pattern})$")).unwrap();

        let alphabet = pattern
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect::<HashSet<_>>();

        for test in tests.iter() {
            // the automata error on symbols outside their alphabet, so restrict the
            // sample strings to symbols appearing in the pattern
            let input = test
                .chars()
                .filter(|c| alphabet.contains(c))
                .collect::<String>();
            let expected = lib_regex.is_match(&input);
            prop_assert_eq!(nfa.accepts(&input).unwrap(), expected, "nfa on '{}'", input);
            prop_assert_eq!(dfa.accepts(&input).unwrap(), expected, "dfa on '{}'", input);
            prop_assert_eq!(minimal.accepts(&input).unwrap(), expected, "minimal dfa on '{}'", input);
        }
    }

    /// Tests that minimizing a pipeline DFA preserves its language, never grows it, and is
    /// idempotent
    #[test]
    fn minimization_properties(pattern in random_regex()) {
        let dfa = parser::regex(&pattern).unwrap().to_nfa().to_dfa();
        let minimal = dfa.minimize();
        prop_assert!(minimal.states().len() <= dfa.states().len());
        prop_assert!(minimal.equivalent_to(&dfa), "minimized DFA should be equivalent to original");
        prop_assert!(dfa.equivalent_to(&minimal), "original DFA should be equivalent to minimized");
        let twice = minimal.minimize();
        prop_assert_eq!(twice.states().len(), minimal.states().len());
        prop_assert!(twice.equivalent_to(&minimal));
    }

    /// Tests that minimization also behaves on arbitrary total DFAs, not just the ones the
    /// subset construction produces
    #[test]
    fn dfa_minimize_eq(dfa in total_dfa(25)) {
        let minimal = dfa.minimize();
        prop_assert!(minimal.states().len() <= dfa.states().len());
        prop_assert!(minimal.equivalent_to(&dfa), "minimized DFA should be equivalent to original");
        prop_assert!(dfa.equivalent_to(&minimal), "original DFA should be equivalent to minimized");
        let twice = minimal.minimize();
        prop_assert_eq!(twice.states().len(), minimal.states().len());
    }
}

const ALPHABET: [char; 3] = ['a', 'b', 'c'];

prop_compose! {
    fn total_dfa(max_states: usize)
        (num_states in 1..max_states)
        (
            accepting in prop::collection::vec(any::<bool>(), num_states..=num_states),
            transitions in prop::collection::vec(
                prop::collection::vec(0..num_states, ALPHABET.len()..=ALPHABET.len()),
                num_states..=num_states,
            )
        )
    -> Dfa {
        let mut map = HashMap::new();
        for (state, row) in transitions.iter().enumerate() {
            for (idx, &successor) in row.iter().enumerate() {
                map.insert((state, ALPHABET[idx]), successor);
            }
        }

        Dfa {
            states: (0..transitions.len()).collect(),
            alphabet: ALPHABET.iter().copied().collect(),
            transitions: map,
            start: 0,
            accepting: accepting
                .iter()
                .enumerate()
                .filter_map(|(state, &accepting)| accepting.then_some(state))
                .collect(),
            trap: None,
        }
    }
}

fn random_regex() -> impl Strategy<Value = String> {
    "[a-d]".prop_recursive(4, 32, 8, |inner| {
        prop_oneof![
            10 => prop::collection::vec(inner.clone(), 1..5)
                .prop_map(|vec| format!("({})", vec.join(""))),
            10 => prop::collection::vec(inner.clone(), 1..5).prop_map(|vec| vec.join("|")),
            3 => inner.clone().prop_map(|r| format!("({r})*")),
            3 => inner.clone().prop_map(|r| format!("({r})+")),
            3 => inner.clone().prop_map(|r| format!("({r})?")),
        ]
    })
}
