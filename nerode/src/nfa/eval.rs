use crate::nfa::{Label, Nfa};
use crate::{InputError, StateId};
use std::collections::{BTreeSet, HashMap};
use std::mem;

#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    closures: HashMap<StateId, BTreeSet<StateId>>,
    current: BTreeSet<StateId>,
}

impl<'a> NfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current.contains(&self.nfa.accept)
    }

    pub fn current_states(&self) -> &BTreeSet<StateId> {
        &self.current
    }

    pub fn step(&mut self, symbol: char) -> Result<(), InputError> {
        if symbol == 'ε' {
            return Err(InputError::NullSymbol);
        }
        if !self.nfa.alphabet.contains(&symbol) {
            return Err(InputError::UnknownSymbol(symbol));
        }

        let nfa = self.nfa;
        let current = mem::take(&mut self.current);
        let mut next = BTreeSet::new();
        for &state in &current {
            if let Some(targets) = nfa.transitions.get(&(state, Label::Symbol(symbol))) {
                for &target in targets {
                    next.extend(self.closure(target));
                }
            }
        }
        self.current = next;
        Ok(())
    }

    pub fn step_multiple(&mut self, input: &str) -> Result<(), InputError> {
        input.chars().try_for_each(|symbol| self.step(symbol))
    }

    fn closure(&mut self, state: StateId) -> BTreeSet<StateId> {
        if let Some(closure) = self.closures.get(&state) {
            return closure.clone();
        }
        let closure = self.nfa.closure(state);
        self.closures.insert(state, closure.clone());
        closure
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(value: &'a Nfa) -> Self {
        let mut evaluator = Self {
            nfa: value,
            closures: HashMap::new(),
            current: BTreeSet::new(),
        };
        evaluator.current = evaluator.closure(value.start);
        evaluator
    }
}
