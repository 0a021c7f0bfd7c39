//! `member/2`.
//!
//! ```prolog
//! member(X, [X|_]).
//! member(X, [_|Ys]) :- member(X, Ys).
//! ```

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    registry::{PredicateIdentifier, PredicateRegistry, TwoArgsFactory},
    solutions::{Goal, Solutions},
    state::State,
    term::Term,
};

pub const IDENTIFIER: PredicateIdentifier = PredicateIdentifier::new(Atom::MEMBER, 2);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(IDENTIFIER, TwoArgsFactory(Member::create))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Snapshot the element before the first attempt.
    Setup,
    /// Try the element against the head of the current list cell.
    Test,
    /// Undo the last attempt and move on to the tail.
    Advance,
    Exhausted,
}

/// Walks the list one cell at a time, unifying the element with each head.
///
/// The walk stops at the first tail that is not a list cell. An unbound
/// tail ends the search as well, open lists are not extended.
pub struct Member {
    element: Term,
    element_state: State,
    list: Term,
    head_state: State,
    tail: Term,
    step: Step,
}

impl Member {
    pub fn new(element: Term, list: Term) -> Self {
        Self {
            element,
            element_state: State::empty(),
            tail: list.clone(),
            list,
            head_state: State::empty(),
            step: Step::Setup,
        }
    }

    pub fn create(element: Term, list: Term) -> Goal {
        Box::new(Member::new(element, list))
    }

    fn undo_attempt(&self) {
        self.head_state.restore();
        self.element_state.restore();
    }
}

impl Solutions for Member {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        loop {
            match self.step {
                Step::Setup => {
                    self.element_state = self.element.manifest_state();
                    self.step = Step::Test;
                }
                Step::Test => {
                    let Some((head, tail)) = self.list.as_list_cell() else {
                        self.step = Step::Exhausted;
                        return Ok(false);
                    };
                    self.head_state = head.manifest_state();
                    self.tail = tail;
                    self.step = Step::Advance;
                    if self.element.unify(&head) {
                        return Ok(true);
                    }
                }
                Step::Advance => {
                    self.undo_attempt();
                    self.list = self.tail.clone();
                    self.step = Step::Test;
                }
                Step::Exhausted => return Ok(false),
            }
        }
    }

    fn abort(&mut self) {
        if self.step == Step::Advance {
            self.undo_attempt();
        }
        self.step = Step::Exhausted;
    }
}
