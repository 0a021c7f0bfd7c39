//! `true/0`, `fail/0` and `!/0`.

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    registry::{NoArgsFactory, PredicateIdentifier, PredicateRegistry},
    solutions::{Goal, Solutions},
};

pub const TRUE: PredicateIdentifier = PredicateIdentifier::new(Atom::TRUE, 0);
pub const FAIL: PredicateIdentifier = PredicateIdentifier::new(Atom::FAIL, 0);
pub const CUT: PredicateIdentifier = PredicateIdentifier::new(Atom::CUT, 0);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(TRUE, NoArgsFactory(True::create))?;
    registry.register(FAIL, NoArgsFactory(Fail::create))?;
    registry.register(CUT, NoArgsFactory(Cut::create))
}

#[derive(Default)]
pub struct True {
    called: bool,
}

impl True {
    pub fn create() -> Goal {
        Box::<True>::default()
    }
}

impl Solutions for True {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        Ok(!std::mem::replace(&mut self.called, true))
    }
}

pub struct Fail;

impl Fail {
    pub fn create() -> Goal {
        Box::new(Fail)
    }
}

impl Solutions for Fail {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        Ok(false)
    }
}

/// Succeeds once. Asking for another solution fails committed, which makes
/// the enclosing conjunctions give up their remaining alternatives.
#[derive(Default)]
pub struct Cut {
    called: bool,
}

impl Cut {
    pub fn create() -> Goal {
        Box::<Cut>::default()
    }
}

impl Solutions for Cut {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        Ok(!std::mem::replace(&mut self.called, true))
    }

    fn choice_committed(&self) -> bool {
        self.called
    }
}
