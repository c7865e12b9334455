//! # nerode-draw
//! Graphviz (DOT) serialization for the automata built by [nerode]. The functions here are
//! pure serializers: they emit a graph description with one node per state, a double border
//! for accepting states, a separate point-shaped anchor node marking the start state, edges
//! grouped by (source, destination) and labeled with the comma-joined sorted symbols
//! producing them, and dashed edges for ε-transitions. Rendering the description is
//! delegated to external Graphviz tooling (`dot -Tsvg`, an online viewer, etc.).
//!
//! ```
//! use nerode::parser;
//! use nerode_draw::{nfa_to_dot, DotOptions};
//!
//! let nfa = parser::regex("a|b").unwrap().to_nfa();
//! let dot = nfa_to_dot(&nfa, &DotOptions::default().with_comment("NFA".to_string()));
//! assert!(dot.starts_with("// NFA"));
//! assert!(dot.contains("doublecircle"));
//! ```

use nerode::dfa::Dfa;
use nerode::nfa::{Label, Nfa};
use nerode::StateId;
use paste::paste;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

macro_rules! define_dot_options {
    ($name:ident {
        $($field:ident : $ty:ty = $def:expr,)*
    }) => {
        pub struct $name {
            $($field: $ty,)*
        }

        impl $name {
            pub fn new($($field: $ty,)*) -> Self {
                Self {
                    $($field,)*
                }
            }

            paste! {
                $(
                pub fn [< with_ $field >](mut self, val: $ty) -> Self {
                    self.$field = val;
                    self
                }
                )*
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(
                    $($def,)*
                )
            }
        }
    }
}

define_dot_options! {
    DotOptions {
        comment: String = String::new(),
        font_name: String = "Helvetica,Arial,sans-serif".to_string(),
        arrow_head: String = "vee".to_string(),
        // graphs above this state count are laid out top-to-bottom with extra rank spacing
        large_layout_threshold: usize = 10,
        rank_separation: String = "1.2".to_string(),
        large_font_size: u32 = 10,
    }
}

/// Serializes a NFA to a Graphviz digraph. ε-edges are drawn dashed; edges for proper
/// symbols are grouped per state pair and labeled with their sorted symbols.
pub fn nfa_to_dot(nfa: &Nfa, options: &DotOptions) -> String {
    let mut symbol_edges: BTreeMap<(StateId, StateId), BTreeSet<char>> = BTreeMap::new();
    let mut epsilon_edges: BTreeSet<(StateId, StateId)> = BTreeSet::new();
    for ((src, label), targets) in nfa.transitions() {
        for &dst in targets {
            match label {
                Label::Epsilon => {
                    epsilon_edges.insert((*src, dst));
                }
                Label::Symbol(symbol) => {
                    symbol_edges.entry((*src, dst)).or_default().insert(*symbol);
                }
            }
        }
    }

    let mut dot = String::new();
    header(&mut dot, nfa.states().len(), options);
    anchor(&mut dot, nfa.start());
    for &state in nfa.states() {
        let shape = if state == nfa.accept() { "doublecircle" } else { "circle" };
        writeln!(dot, "    {state} [shape={shape}];").unwrap();
    }
    for ((src, dst), symbols) in &symbol_edges {
        writeln!(dot, "    {src} -> {dst} [label=\"{}\"];", join_symbols(symbols)).unwrap();
    }
    for (src, dst) in &epsilon_edges {
        writeln!(dot, "    {src} -> {dst} [style=dashed, label=\"ε\"];").unwrap();
    }
    dot.push_str("}\n");
    dot
}

/// Serializes a DFA to a Graphviz digraph, grouping parallel edges per state pair and
/// labeling them with their sorted symbols.
pub fn dfa_to_dot(dfa: &Dfa, options: &DotOptions) -> String {
    let mut edges: BTreeMap<(StateId, StateId), BTreeSet<char>> = BTreeMap::new();
    for (&(src, symbol), &dst) in dfa.transitions() {
        edges.entry((src, dst)).or_default().insert(symbol);
    }

    let mut dot = String::new();
    header(&mut dot, dfa.states().len(), options);
    anchor(&mut dot, dfa.start());
    for &state in dfa.states() {
        let shape = if dfa.is_accepting(state) { "doublecircle" } else { "circle" };
        writeln!(dot, "    {state} [shape={shape}];").unwrap();
    }
    for ((src, dst), symbols) in &edges {
        writeln!(dot, "    {src} -> {dst} [label=\"{}\"];", join_symbols(symbols)).unwrap();
    }
    dot.push_str("}\n");
    dot
}

fn header(dot: &mut String, state_count: usize, options: &DotOptions) {
    if !options.comment.is_empty() {
        writeln!(dot, "// {}", options.comment).unwrap();
    }
    dot.push_str("digraph {\n");
    if state_count > options.large_layout_threshold {
        writeln!(
            dot,
            "    rankdir=TB; ranksep={}; fontsize={};",
            options.rank_separation, options.large_font_size
        )
        .unwrap();
    } else {
        dot.push_str("    rankdir=LR;\n");
    }
    writeln!(dot, "    node [fontname=\"{}\"];", options.font_name).unwrap();
    writeln!(
        dot,
        "    edge [fontname=\"{}\", arrowhead={}];",
        options.font_name, options.arrow_head
    )
    .unwrap();
}

// the start state is pointed at by an invisible anchor node
fn anchor(dot: &mut String, start: StateId) {
    dot.push_str("    init [shape=point, width=0, height=0, label=\"\"];\n");
    writeln!(dot, "    init -> {start};").unwrap();
}

fn join_symbols(symbols: &BTreeSet<char>) -> String {
    symbols
        .iter()
        .map(|symbol| symbol.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nerode::parser;

    #[test]
    fn nfa_dot_marks_start_accept_and_epsilon() {
        let nfa = parser::regex("a|b").unwrap().to_nfa();
        let dot = nfa_to_dot(&nfa, &DotOptions::default());
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains(&format!("init -> {};", nfa.start())));
        assert!(dot.contains(&format!("{} [shape=doublecircle];", nfa.accept())));
        assert!(dot.contains("style=dashed"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn dfa_dot_groups_parallel_edges() {
        let dfa = parser::regex("(a|b)*").unwrap().to_nfa().to_dfa().minimize();
        // a single state looping to itself on both symbols gives one grouped edge
        assert_eq!(dfa.states().len(), 1);
        let dot = dfa_to_dot(&dfa, &DotOptions::default());
        assert!(dot.contains("[label=\"a, b\"]"));
        assert!(dot.contains("rankdir=LR;"));
    }

    #[test]
    fn large_automata_switch_to_vertical_layout() {
        let nfa = parser::regex("(a|b)*c(a|b)*c").unwrap().to_nfa();
        assert!(nfa.states().len() > 10);
        let dot = nfa_to_dot(&nfa, &DotOptions::default());
        assert!(dot.contains("rankdir=TB;"));
    }
}
