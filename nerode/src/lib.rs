//!# nerode
//!
//! `nerode` is a Rust library implementing the classic regular-expression compilation pipeline:
//! a regex over a character alphabet is normalized into explicit postfix form, compiled to an
//! ε-NFA by Thompson's construction, made deterministic by the subset (powerset) construction,
//! and finally minimized by partition refinement. Every stage of the pipeline can be queried
//! with an input string for an accept/reject verdict.
//!
//! ## Usage
//!
//! ```rust
//! use nerode::parser;
//!
//! fn main() {
//!     // The empty string, or any number of a:s followed by a single b
//!     let regex = parser::regex("ε|a*b").unwrap();
//!     assert_eq!(regex.normalized_pattern(), "ε|a*.b");
//!     assert_eq!(regex.postfix_pattern(), "εa*b.|");
//!
//!     let nfa = regex.to_nfa();
//!     assert!(nfa.accepts("").unwrap());
//!     assert!(nfa.accepts("aab").unwrap());
//!     assert!(!nfa.accepts("aa").unwrap());
//!
//!     let dfa = nfa.to_dfa();
//!     let minimal = dfa.minimize();
//!     assert!(minimal.accepts("aab").unwrap());
//!     assert!(!minimal.accepts("bb").unwrap());
//!     assert!(minimal.states().len() <= dfa.states().len());
//! }
//! ```
//!
//! ## Pipeline
//!
//! The pipeline is a chain of immutable values: each stage consumes the previous stage's
//! output and returns a new automaton, and no stage shares mutable state with another.
//!
//! * [Parsing regular expressions](parser::regex) into normalized and postfix form
//! * [Converting regular expressions to ε-NFAs](regex::Regex::to_nfa) by Thompson's
//!   construction
//! * [Converting NFAs to DFAs](nfa::Nfa::to_dfa) by the subset construction, completed
//!   with a trap state where needed
//! * [Minimizing DFAs](dfa::Dfa::minimize) by partition refinement
//! * Checking if a string is accepted by a [NFA](nfa::Nfa::accepts) or [DFA](dfa::Dfa::accepts)
//! * [Step-by-step evaluation of a string](dfa::Dfa::evaluator)
//! * [Checking whether two DFAs are equivalent](dfa::Dfa::equivalent_to)
//! * Rendering a transition table of a [NFA](nfa::Nfa::to_table) or [DFA](dfa::Dfa::to_table)
//!
//! ## Syntax
//!
//! The surface syntax is the mathematical notation for regular expressions: concatenation is
//! implicit (`ab` means "a then b"), `|` is alternation, `*`/`+`/`?` are the postfix repetition
//! operators, parentheses group, and `ε` denotes the empty string. Whitespace is discarded.
//! Every other character is a literal symbol of the input alphabet. An explicit concatenation
//! operator `.` is accepted on input and is inserted internally during normalization;
//! `ε` is a meta-symbol and is never part of the alphabet itself.

use thiserror::Error;

pub mod dfa;
pub mod nfa;
pub mod parser;
pub mod regex;
mod table;

/// Identifier of an automaton state. State identifiers are small non-negative integers,
/// dense in practice but not required to be contiguous.
pub type StateId = usize;

/// Errors raised by the recognizers when an input string cannot be evaluated at all.
/// A recognizer error never produces a partial verdict and leaves the automaton untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The input contained a symbol outside the automaton's alphabet.
    #[error("Symbol '{0}' is not part of the input alphabet")]
    UnknownSymbol(char),
    /// The input contained `ε`, which denotes the empty transition and never
    /// appears in input strings.
    #[error("Input strings may not contain the null symbol 'ε'")]
    NullSymbol,
}

#[cfg(test)]
mod tests;
