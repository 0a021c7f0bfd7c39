//! Disjunction, `';'/2`.

use tracing::trace;

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    registry::{PredicateIdentifier, PredicateRegistry, TwoArgsFactory},
    solutions::{Goal, Solutions},
    term::Term,
};

pub const IDENTIFIER: PredicateIdentifier = PredicateIdentifier::new(Atom::SEMICOLON, 2);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(IDENTIFIER, TwoArgsFactory(Or::create))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Left,
    Right,
    Exhausted,
}

/// All solutions of the left goal followed by all solutions of the right
/// one. A cut in the left branch also discards the right branch.
pub struct Or {
    left: Term,
    right: Term,
    branch: Branch,
    current: Option<Goal>,
    choice_committed: bool,
}

impl Or {
    pub fn new(left: Term, right: Term) -> Self {
        Self {
            left,
            right,
            branch: Branch::Left,
            current: None,
            choice_committed: false,
        }
    }

    pub fn create(left: Term, right: Term) -> Goal {
        Box::new(Or::new(left, right))
    }
}

impl Solutions for Or {
    fn next(&mut self, registry: &PredicateRegistry) -> Result<bool, QueryError> {
        loop {
            if self.current.is_none() {
                let term = match self.branch {
                    Branch::Left => &self.left,
                    Branch::Right => &self.right,
                    Branch::Exhausted => return Ok(false),
                };
                self.current = Some(term.call(registry)?);
            }
            let Some(goal) = self.current.as_mut() else {
                unreachable!("disjunction branch {:?} without a goal", self.branch)
            };
            if goal.next(registry)? {
                return Ok(true);
            }
            let committed = goal.choice_committed();
            self.current = None;
            self.branch = match self.branch {
                Branch::Left if !committed => Branch::Right,
                _ => Branch::Exhausted,
            };
            if committed {
                trace!("Cut propagates out of disjunction");
                self.choice_committed = true;
                return Ok(false);
            }
        }
    }

    fn abort(&mut self) {
        if let Some(mut goal) = self.current.take() {
            goal.abort();
        }
        self.branch = Branch::Exhausted;
    }

    fn choice_committed(&self) -> bool {
        self.choice_committed
    }
}

#[cfg(test)]
mod tests {
    use super::Or;
    use crate::{
        atom::Atom,
        predicates::builtins,
        solutions::Solutions,
        term::Term,
    };

    fn member(element: &Term, items: Vec<Term>) -> Term {
        Term::compound("member", vec![element.clone(), Term::list(items)])
    }

    #[test]
    fn left_solutions_come_first() {
        let x = Term::var();
        let mut goal = Or::new(
            member(&x, vec![Term::int(1), Term::int(2)]),
            Term::compound("=", vec![x.clone(), Term::int(3)]),
        );
        let mut seen = Vec::new();
        while goal.next(builtins()).unwrap() {
            seen.push(x.as_int().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(x.is_var());
        assert!(!goal.next(builtins()).unwrap());
    }

    #[test]
    fn cut_in_left_branch_skips_right_branch() {
        let x = Term::var();
        let left = Term::compound(
            Atom::COMMA,
            vec![member(&x, vec![Term::int(1), Term::int(2)]), Term::atom("!")],
        );
        let mut goal = Or::new(left, Term::compound("=", vec![x.clone(), Term::int(3)]));
        assert!(goal.next(builtins()).unwrap());
        assert_eq!(x, Term::int(1));
        assert!(!goal.next(builtins()).unwrap());
        assert!(goal.choice_committed());
        assert!(x.is_var());
    }

    #[test]
    fn abort_undoes_current_branch() {
        let x = Term::var();
        let mut goal = Or::new(Term::atom("fail"), member(&x, vec![Term::int(1)]));
        assert!(goal.next(builtins()).unwrap());
        assert!(!x.is_var());
        goal.abort();
        assert!(x.is_var());
        assert!(!goal.next(builtins()).unwrap());
    }
}
