//! `=/2` and `\=/2`.

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    registry::{PredicateIdentifier, PredicateRegistry, TwoArgsFactory},
    solutions::{Goal, Solutions},
    state::State,
    term::Term,
};

pub const UNIFY: PredicateIdentifier = PredicateIdentifier::new(Atom::UNIFY, 2);
pub const NOT_UNIFIABLE: PredicateIdentifier = PredicateIdentifier::new(Atom::NOT_UNIFY, 2);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(UNIFY, TwoArgsFactory(Unify::create))?;
    registry.register(NOT_UNIFIABLE, TwoArgsFactory(NotUnifiable::create))
}

/// Unifies its arguments once and undoes the bindings when asked for a
/// second solution.
pub struct Unify {
    left: Term,
    right: Term,
    called: bool,
    undo: Option<State>,
}

impl Unify {
    pub fn new(left: Term, right: Term) -> Self {
        Self {
            left,
            right,
            called: false,
            undo: None,
        }
    }

    pub fn create(left: Term, right: Term) -> Goal {
        Box::new(Unify::new(left, right))
    }
}

impl Solutions for Unify {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        if std::mem::replace(&mut self.called, true) {
            self.abort();
            return Ok(false);
        }
        self.undo = self.left.unify_tentatively(&self.right);
        Ok(self.undo.is_some())
    }

    fn abort(&mut self) {
        if let Some(state) = self.undo.take() {
            state.restore();
        }
    }
}

/// Succeeds iff the arguments do not unify. Never leaves bindings behind.
pub struct NotUnifiable {
    left: Term,
    right: Term,
    called: bool,
}

impl NotUnifiable {
    pub fn create(left: Term, right: Term) -> Goal {
        Box::new(NotUnifiable {
            left,
            right,
            called: false,
        })
    }
}

impl Solutions for NotUnifiable {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        if std::mem::replace(&mut self.called, true) {
            return Ok(false);
        }
        match self.left.unify_tentatively(&self.right) {
            Some(state) => {
                state.restore();
                Ok(false)
            }
            None => Ok(true),
        }
    }
}
