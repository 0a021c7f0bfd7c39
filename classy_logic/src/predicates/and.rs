//! Conjunction, `','/2`.

use std::rc::Rc;

use tracing::trace;

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    goal_stack::{GoalStack, SharedGoal},
    registry::{PredicateIdentifier, PredicateRegistry, TwoArgsFactory},
    solutions::{Goal, Solutions},
    term::Term,
};

pub const IDENTIFIER: PredicateIdentifier = PredicateIdentifier::new(Atom::COMMA, 2);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(IDENTIFIER, TwoArgsFactory(And::create))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Neither goal has been called yet.
    Start,
    /// Ask the left goal for its next solution.
    EvalLeft,
    /// Ask the right goal, created for the current left solution, for its
    /// next solution.
    EvalRight,
    Exhausted,
}

/// Solutions of `L, R`: every solution of `L` paired with all solutions `R`
/// has under that binding, left major.
///
/// The right goal is called anew for each solution of the left one. When
/// the right goal fails because of a cut the left goal is aborted and the
/// conjunction fails committed as well.
pub struct And {
    left: Term,
    right: Term,
    goals: GoalStack,
    step: Step,
    choice_committed: bool,
}

impl And {
    pub fn new(left: Term, right: Term) -> Self {
        Self {
            left,
            right,
            goals: GoalStack::empty(),
            step: Step::Start,
            choice_committed: false,
        }
    }

    pub fn create(left: Term, right: Term) -> Goal {
        Box::new(And::new(left, right))
    }

    fn top(&self) -> SharedGoal {
        let Some(top) = self.goals.peek() else {
            unreachable!("conjunction in step {:?} with an empty goal stack", self.step)
        };
        Rc::clone(top)
    }
}

impl Solutions for And {
    fn next(&mut self, registry: &PredicateRegistry) -> Result<bool, QueryError> {
        loop {
            match self.step {
                Step::Start => {
                    self.goals = self.goals.put(self.left.call(registry)?);
                    self.step = Step::EvalLeft;
                }
                Step::EvalLeft => {
                    let left = self.top();
                    let succeeded = left.borrow_mut().next(registry)?;
                    if !succeeded {
                        self.choice_committed = left.borrow().choice_committed();
                        self.goals = self.goals.pop();
                        self.step = Step::Exhausted;
                        trace!(left = %self.left, committed = self.choice_committed, "Conjunction exhausted");
                        return Ok(false);
                    }
                    self.goals = self.goals.put(self.right.call(registry)?);
                    self.step = Step::EvalRight;
                }
                Step::EvalRight => {
                    let right = self.top();
                    let succeeded = right.borrow_mut().next(registry)?;
                    if succeeded {
                        return Ok(true);
                    }
                    self.goals = self.goals.pop();
                    if right.borrow().choice_committed() {
                        trace!(right = %self.right, "Cut propagates out of conjunction");
                        self.top().borrow_mut().abort();
                        self.goals = self.goals.pop();
                        self.choice_committed = true;
                        self.step = Step::Exhausted;
                        return Ok(false);
                    }
                    self.step = Step::EvalLeft;
                }
                Step::Exhausted => return Ok(false),
            }
        }
    }

    fn abort(&mut self) {
        while let Some(goal) = self.goals.peek() {
            goal.borrow_mut().abort();
            self.goals = self.goals.pop();
        }
        self.step = Step::Exhausted;
    }

    fn choice_committed(&self) -> bool {
        self.choice_committed
    }
}
