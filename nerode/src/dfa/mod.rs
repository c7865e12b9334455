//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct, which represents a total
//! [Deterministic finite automaton](https://en.wikipedia.org/wiki/Deterministic_finite_automaton):
//! for every state and every symbol of the alphabet there is exactly one successor state.
//! The only way to create such an instance is by converting a [Nfa](crate::nfa::Nfa::to_dfa)
//! to a DFA (which completes the transition function with a trap state where needed) or by
//! minimizing another DFA.
//!
//! ## Checking word acceptance
//! Word acceptance works just like for NFAs, except that the automaton is in exactly one
//! state at every point of the evaluation. See [Dfa::accepts] and [Dfa::evaluator].
//!
//! ## Minimization
//! A DFA can be minimized by [Dfa::minimize], which returns the unique (up to state
//! renaming) smallest DFA accepting the same language. Unreachable states are discarded
//! first; the remaining states are then split into equivalence classes by partition
//! refinement: starting from the accepting/non-accepting partition, a block is split
//! whenever two of its members disagree, for some symbol, on the block their successor
//! belongs to, until a full pass changes nothing. The number of states of the result
//! equals the Myhill–Nerode index of the language.
//!
//! ```
//! use nerode::parser;
//!
//! let dfa = parser::regex("a|b").unwrap().to_nfa().to_dfa();
//! let minimal = dfa.minimize();
//! // one state reading the first symbol, one accepting state, one trap state
//! assert_eq!(minimal.states().len(), 3);
//! assert!(minimal.equivalent_to(&dfa));
//! // minimization is idempotent
//! assert_eq!(minimal.minimize().states().len(), minimal.states().len());
//! ```
//!
//! ## Checking equivalence
//! Two DFAs are equivalent if and only if they have the same alphabet and accept the same
//! language. [Dfa::equivalent_to] explores pairs of states reachable by the same input in
//! both automata and rejects as soon as one of a pair is accepting while the other is not,
//! without constructing any new automaton.

use crate::table::Table;
use crate::{InputError, StateId};
pub use eval::DfaEvaluator;
use std::collections::{BTreeSet, HashMap, HashSet};

pub mod eval;
mod partition;

/// A deterministic finite automaton, defined by its states, alphabet, total transition
/// function, start state and set of accepting states. If the transition function had to be
/// completed during construction, the trap state that received the missing transitions is
/// recorded. Instances are immutable once returned by their builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) states: BTreeSet<StateId>,
    pub(crate) alphabet: BTreeSet<char>,
    pub(crate) transitions: HashMap<(StateId, char), StateId>,
    pub(crate) start: StateId,
    pub(crate) accepting: BTreeSet<StateId>,
    pub(crate) trap: Option<StateId>,
}

impl Dfa {
    /// Gets the states of this DFA
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    /// Gets the alphabet of this DFA
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Gets the start state of this DFA
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Gets the accepting states of this DFA
    pub fn accepting(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    /// Checks if the given state is accepting
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    /// Gets the trap state of this DFA, if the transition function had to be completed
    /// with one
    pub fn trap(&self) -> Option<StateId> {
        self.trap
    }

    /// Gets the full transition function of this DFA
    pub fn transitions(&self) -> &HashMap<(StateId, char), StateId> {
        &self.transitions
    }

    /// Gets the successor of a state for one symbol
    pub fn transition(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&(state, symbol)).copied()
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
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Finds the states reachable from the start state by some input
    pub fn reachable_states(&self) -> BTreeSet<StateId> {
        let mut reachable = BTreeSet::from([self.start]);
        let mut frontier = vec![self.start];
        while let Some(state) = frontier.pop() {
            for &symbol in &self.alphabet {
                if let Some(&next) = self.transitions.get(&(state, symbol)) {
                    if reachable.insert(next) {
                        frontier.push(next);
                    }
                }
            }
        }
        reachable
    }

    /// Produces the minimal DFA accepting the same language as this one. Unreachable
    /// states are discarded, the remaining states are split into equivalence classes by
    /// partition refinement, and one state is emitted per class. The classes are numbered
    /// by their least member, the class of the old start state becomes the new start
    /// state, and a class intersecting the old accepting set is accepting.
    pub fn minimize(&self) -> Dfa {
        let reachable = self.reachable_states();
        let blocks = partition::refine(self, &reachable);

        let mut class_of = HashMap::with_capacity(reachable.len());
        for (class, block) in blocks.iter().enumerate() {
            for &state in block {
                class_of.insert(state, class);
            }
        }

        let mut transitions = HashMap::new();
        for (class, block) in blocks.iter().enumerate() {
            let representative = *block
                .iter()
                .next()
                .expect("partition blocks are never empty");
            for &symbol in &self.alphabet {
                let successor = self
                    .transition(representative, symbol)
                    .expect("the transition function should be total");
                transitions.insert((class, symbol), class_of[&successor]);
            }
        }

        let accepting = blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.iter().any(|state| self.accepting.contains(state)))
            .map(|(class, _)| class)
            .collect();

        Dfa {
            states: (0..blocks.len()).collect(),
            alphabet: self.alphabet.clone(),
            transitions,
            start: class_of[&self.start],
            accepting,
            trap: self.trap.and_then(|trap| class_of.get(&trap).copied()),
        }
    }

    /// Checks if this DFA is equivalent to another DFA, that is, if they accept the same
    /// language. If the automatons have different alphabets they are never equivalent, but
    /// the number of states and the state numbering doesn't matter.
    pub fn equivalent_to(&self, other: &Dfa) -> bool {
        if self.alphabet != other.alphabet {
            return false;
        }

        // explore pairs of states reached by the same input in both automata
        let mut to_explore = vec![(self.start, other.start)];
        let mut explored = HashSet::from([(self.start, other.start)]);

        while let Some((s1, s2)) = to_explore.pop() {
            if self.accepting.contains(&s1) != other.accepting.contains(&s2) {
                return false;
            }
            for &symbol in &self.alphabet {
                let d1 = self
                    .transition(s1, symbol)
                    .expect("the transition function should be total");
                let d2 = other
                    .transition(s2, symbol)
                    .expect("the transition function should be total");
                if explored.insert((d1, d2)) {
                    to_explore.push((d1, d2));
                }
            }
        }
        true
    }

    /// Generates a table of this DFA suitable for printing
    pub fn to_table(&self) -> String {
        self.gen_table("→")
    }

    /// Generates a table of this DFA suitable for printing, with the start state marked
    /// with "->"
    pub fn ascii_table(&self) -> String {
        self.gen_table("->")
    }

    fn gen_table(&self, arrow: &str) -> String {
        let mut table = Table::default();

        let mut header = vec![String::new(), String::new(), String::new()];
        header.extend(self.alphabet.iter().map(|symbol| symbol.to_string()));
        table.push_row(header);

        for &state in &self.states {
            let mut row = vec![
                if state == self.start { arrow.to_string() } else { String::new() },
                if self.accepting.contains(&state) { "*".to_string() } else { String::new() },
                state.to_string(),
            ];
            for &symbol in &self.alphabet {
                let successor = self
                    .transition(state, symbol)
                    .expect("the transition function should be total");
                row.push(successor.to_string());
            }
            table.push_row(row);
        }
        table.render(" ")
    }
}
