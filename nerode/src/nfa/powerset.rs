use crate::dfa::Dfa;
use crate::nfa::{Label, Nfa};
use crate::StateId;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Scratch state for one run of the subset construction. The closure cache, the
/// subset-to-id map and the work queue live here and are released when [run] returns.
pub(crate) struct SubsetConstruction<'a> {
    nfa: &'a Nfa,
    closures: HashMap<StateId, BTreeSet<StateId>>,
    subset_ids: HashMap<Vec<StateId>, StateId>,
    accepting: BTreeSet<StateId>,
    transitions: HashMap<(StateId, char), StateId>,
}

impl<'a> SubsetConstruction<'a> {
    pub(crate) fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            closures: HashMap::new(),
            subset_ids: HashMap::new(),
            accepting: BTreeSet::new(),
            transitions: HashMap::new(),
        }
    }

    pub(crate) fn run(mut self) -> Dfa {
        let nfa = self.nfa;
        let mut queue = VecDeque::new();

        let start = self.closure(nfa.start);
        let id = self.add_subset(&start);
        queue.push_back((id, start));

        while let Some((id, subset)) = queue.pop_front() {
            for &symbol in &nfa.alphabet {
                let targets = self.move_set(&subset, symbol);
                if targets.is_empty() {
                    // completed by the trap state afterwards
                    continue;
                }
                let key: Vec<StateId> = targets.iter().copied().collect();
                let next = match self.subset_ids.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = self.add_subset(&targets);
                        queue.push_back((fresh, targets));
                        fresh
                    }
                };
                self.transitions.insert((id, symbol), next);
            }
        }

        let trap = self.complete_with_trap();
        let mut states: BTreeSet<StateId> = (0..self.subset_ids.len()).collect();
        states.extend(trap);

        Dfa {
            states,
            alphabet: nfa.alphabet.clone(),
            transitions: self.transitions,
            start: 0,
            accepting: self.accepting,
            trap,
        }
    }

    /// Allocates a DFA state for a subset of NFA states. Ids are assigned in discovery
    /// order, so the start subset gets id 0. The subset is keyed by its sorted id list.
    fn add_subset(&mut self, subset: &BTreeSet<StateId>) -> StateId {
        let id = self.subset_ids.len();
        self.subset_ids.insert(subset.iter().copied().collect(), id);
        if subset.contains(&self.nfa.accept) {
            self.accepting.insert(id);
        }
        id
    }

    /// Computes `move(S, σ)`: every state reachable from a member of the subset by one
    /// σ-transition, expanded with its ε-closure
    fn move_set(&mut self, subset: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
        let nfa = self.nfa;
        let mut result = BTreeSet::new();
        for &state in subset {
            if let Some(targets) = nfa.transitions.get(&(state, Label::Symbol(symbol))) {
                for &target in targets {
                    result.extend(self.closure(target));
                }
            }
        }
        result
    }

    fn closure(&mut self, state: StateId) -> BTreeSet<StateId> {
        if let Some(closure) = self.closures.get(&state) {
            return closure.clone();
        }
        let closure = self.nfa.closure(state);
        self.closures.insert(state, closure.clone());
        closure
    }

    /// Redirects every missing (state, symbol) entry to a single fresh trap state with a
    /// self-loop on every symbol. If the construction is already total, no trap state is
    /// introduced.
    fn complete_with_trap(&mut self) -> Option<StateId> {
        let trap = self.subset_ids.len();
        let mut needed = false;
        for state in 0..self.subset_ids.len() {
            for &symbol in &self.nfa.alphabet {
                if !self.transitions.contains_key(&(state, symbol)) {
                    self.transitions.insert((state, symbol), trap);
                    needed = true;
                }
            }
        }
        if needed {
            for &symbol in &self.nfa.alphabet {
                self.transitions.insert((trap, symbol), trap);
            }
            Some(trap)
        } else {
            None
        }
    }
}
