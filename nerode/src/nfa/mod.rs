//! # Nondeterministic Finite Automaton with ε-moves
//! The NFA module includes the [Nfa] struct, which represents a
//! [Nondeterministic finite automaton](https://en.wikipedia.org/wiki/Nondeterministic_finite_automaton)
//! in Thompson form: exactly one start state, exactly one accept state, and possible
//! ε-moves. The only way to create such an instance is by compiling a regular expression
//! with [Regex::to_nfa](crate::regex::Regex::to_nfa).
//!
//! ## Checking word acceptance
//! The most basic operation is to check whether a string is accepted by the automaton or
//! not, which is done by [Nfa::accepts]. Internally, a [NfaEvaluator] is constructed,
//! which keeps track of the set of states the automaton is in during the evaluation of a
//! string (always closed under ε-moves). To step through a string symbol by symbol, see
//! [Nfa::evaluator].
//!
//! Input strings are sequences of symbols of the alphabet. Two inputs are rejected with an
//! error rather than a verdict: strings containing the meta-symbol `ε`, and strings
//! containing symbols outside the automaton's alphabet.
//!
//! ```
//! use nerode::parser;
//! use nerode::InputError;
//!
//! let nfa = parser::regex("(a|b)*c").unwrap().to_nfa();
//! assert!(nfa.accepts("abbac").unwrap());
//! assert!(nfa.accepts("c").unwrap());
//! assert!(!nfa.accepts("abba").unwrap());
//! // ε never appears in input strings, and d is not in the alphabet
//! assert_eq!(nfa.accepts("ε"), Err(InputError::NullSymbol));
//! assert_eq!(nfa.accepts("abd"), Err(InputError::UnknownSymbol('d')));
//! ```
//!
//! ## Conversion
//! The NFA can be converted to a DFA using [Nfa::to_dfa]. This uses a reduced
//! [powerset construction](https://en.wikipedia.org/wiki/Powerset_construction) (or subset
//! construction): every state of the resulting DFA corresponds to a set of states of the
//! NFA, and only sets actually reachable from the start state are explored. Even so, the
//! construction is exponential in the worst case. The resulting DFA is total: if some
//! state is missing an outgoing transition for some symbol, a single trap state is added
//! to receive all such transitions.
//!
//! ```
//! use nerode::parser;
//!
//! let nfa = parser::regex("(ab)+").unwrap().to_nfa();
//! let dfa = nfa.to_dfa();
//! assert!(dfa.accepts("abab").unwrap());
//! assert!(!dfa.accepts("aba").unwrap());
//! ```

use crate::dfa::Dfa;
use crate::table::Table;
use crate::{InputError, StateId};
pub use eval::NfaEvaluator;
use std::collections::{BTreeSet, HashMap};

pub mod eval;
mod powerset;

/// A transition label: either a proper symbol of the alphabet, or the empty transition `ε`
/// which consumes no input. `ε` is never a member of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Epsilon,
    Symbol(char),
}

/// A nondeterministic finite automaton in Thompson form, denoted by its states, alphabet,
/// transition relation, start state and accept state. An absent entry in the transition
/// relation means "no transition". Instances are immutable once returned by their builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: BTreeSet<StateId>,
    pub(crate) alphabet: BTreeSet<char>,
    pub(crate) transitions: HashMap<(StateId, Label), BTreeSet<StateId>>,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
}

impl Nfa {
    /// Gets the states of this NFA
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    /// Gets the alphabet of this NFA (`ε` excluded)
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Gets the start state of this NFA
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Gets the accept state of this NFA
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// Gets the full transition relation of this NFA
    pub fn transitions(&self) -> &HashMap<(StateId, Label), BTreeSet<StateId>> {
        &self.transitions
    }

    /// Gets the successors of a state for one label, if it has any
    pub fn transition(&self, state: StateId, label: Label) -> Option<&BTreeSet<StateId>> {
        self.transitions.get(&(state, label))
    }

    /// Gives the ε-closure of a state: the set of states reachable from it using zero or
    /// more ε-transitions, including the state itself. Cycles in the ε-graph are permitted.
    ///
    /// ```
    /// use nerode::parser;
    ///
    /// let nfa = parser::regex("a*").unwrap().to_nfa();
    /// let closure = nfa.closure(nfa.start());
    /// assert!(closure.contains(&nfa.start()));
    /// // a* accepts the empty string, so the accept state is ε-reachable from the start
    /// assert!(closure.contains(&nfa.accept()));
    /// ```
    pub fn closure(&self, state: StateId) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::from([state]);
        let mut frontier = vec![state];
        while let Some(state) = frontier.pop() {
            if let Some(targets) = self.transitions.get(&(state, Label::Epsilon)) {
                for &target in targets {
                    if closure.insert(target) {
                        frontier.push(target);
                    }
                }
            }
        }
        closure
    }

    /// Checks if this automaton accepts the given string. This is equivalent to getting the
    /// evaluator, stepping it over the string and checking if it is accepting.
    pub fn accepts(&self, input: &str) -> Result<bool, InputError> {
        let mut eval = self.evaluator();
        eval.step_multiple(input)?;
        Ok(eval.is_accepting())
    }

    /// Gets an evaluator, which is a struct that is used to evaluate strings with the
    /// automaton
    pub fn evaluator(&self) -> NfaEvaluator<'_> {
        self.into()
    }

    /// Converts this NFA to a DFA using the subset construction. DFA states are numbered
    /// in discovery order, the state numbered 0 is guaranteed to be the start state, and
    /// the transition function of the result is total: missing transitions are redirected
    /// to a single fresh trap state, which is only introduced when actually needed.
    pub fn to_dfa(&self) -> Dfa {
        powerset::SubsetConstruction::new(self).run()
    }

    /// Generates a table of this NFA suitable for printing
    pub fn to_table(&self) -> String {
        self.gen_table("ε", "→")
    }

    /// Generates a table of this NFA suitable for printing, with the epsilon column headed
    /// "eps" and the start state marked with "->"
    pub fn ascii_table(&self) -> String {
        self.gen_table("eps", "->")
    }

    fn gen_table(&self, eps: &str, arrow: &str) -> String {
        let mut table = Table::default();

        let mut header = vec![String::new(), String::new(), String::new(), eps.to_string()];
        header.extend(self.alphabet.iter().map(|symbol| symbol.to_string()));
        table.push_row(header);

        for &state in &self.states {
            let mut row = vec![
                if state == self.start { arrow.to_string() } else { String::new() },
                if state == self.accept { "*".to_string() } else { String::new() },
                state.to_string(),
            ];
            row.push(self.target_set_string(state, Label::Epsilon));
            for &symbol in &self.alphabet {
                row.push(self.target_set_string(state, Label::Symbol(symbol)));
            }
            table.push_row(row);
        }
        table.render(" ")
    }

    fn target_set_string(&self, state: StateId, label: Label) -> String {
        let targets = self
            .transitions
            .get(&(state, label))
            .map(|targets| {
                targets
                    .iter()
                    .map(|target| target.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        format!("{{{targets}}}")
    }

    /// Adds one transition to the relation, keeping any targets already present
    pub(crate) fn add_transition(&mut self, src: StateId, label: Label, dst: StateId) {
        self.transitions.entry((src, label)).or_default().insert(dst);
    }

    /// Renumbers every state of this NFA through the given mapping. The mapping must be
    /// injective over the current states.
    pub(crate) fn remap_states(self, mapper: impl Fn(StateId) -> StateId) -> Nfa {
        let Nfa {
            states,
            alphabet,
            transitions,
            start,
            accept,
        } = self;
        Nfa {
            states: states.into_iter().map(&mapper).collect(),
            alphabet,
            transitions: transitions
                .into_iter()
                .map(|((src, label), targets)| {
                    ((mapper(src), label), targets.into_iter().map(&mapper).collect())
                })
                .collect(),
            start: mapper(start),
            accept: mapper(accept),
        }
    }

    /// Merges the states, alphabet and transitions of another NFA into this one, keeping
    /// this NFA's start and accept states. The state ranges are expected to be disjoint
    /// except where composition identifies states on purpose.
    pub(crate) fn merge(&mut self, other: Nfa) {
        self.states.extend(other.states);
        self.alphabet.extend(other.alphabet);
        for ((src, label), targets) in other.transitions {
            self.transitions
                .entry((src, label))
                .or_default()
                .extend(targets);
        }
    }
}
