use crate::dfa::Dfa;
use crate::{InputError, StateId};

#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current: StateId,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.dfa.accepting.contains(&self.current)
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn step(&mut self, symbol: char) -> Result<StateId, InputError> {
        if symbol == 'ε' {
            return Err(InputError::NullSymbol);
        }
        if !self.dfa.alphabet.contains(&symbol) {
            return Err(InputError::UnknownSymbol(symbol));
        }
        // the trap state only loops onto itself, so the lookup can be skipped
        if Some(self.current) != self.dfa.trap {
            self.current = self
                .dfa
                .transition(self.current, symbol)
                .expect("the transition function should be total");
        }
        Ok(self.current)
    }

    pub fn step_multiple(&mut self, input: &str) -> Result<StateId, InputError> {
        input.chars().try_for_each(|symbol| self.step(symbol).map(|_| ()))?;
        Ok(self.current)
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        Self {
            dfa: value,
            current: value.start,
        }
    }
}
