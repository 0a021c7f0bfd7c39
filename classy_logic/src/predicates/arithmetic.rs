//! `is/2` and the arithmetic comparisons.

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    registry::{PredicateIdentifier, PredicateRegistry, TwoArgsFactory},
    solutions::{Goal, Solutions},
    state::State,
    term::Term,
};

pub const IS: PredicateIdentifier = PredicateIdentifier::new(Atom::IS, 2);
pub const EQUAL: PredicateIdentifier = PredicateIdentifier::new(Atom::ARITH_EQ, 2);
pub const NOT_EQUAL: PredicateIdentifier = PredicateIdentifier::new(Atom::ARITH_NE, 2);
pub const LESS: PredicateIdentifier = PredicateIdentifier::new(Atom::LESS, 2);
pub const LESS_OR_EQUAL: PredicateIdentifier = PredicateIdentifier::new(Atom::LESS_EQ, 2);
pub const GREATER: PredicateIdentifier = PredicateIdentifier::new(Atom::GREATER, 2);
pub const GREATER_OR_EQUAL: PredicateIdentifier = PredicateIdentifier::new(Atom::GREATER_EQ, 2);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(IS, TwoArgsFactory(Is::create))?;
    registry.register(EQUAL, TwoArgsFactory(|l, r| Compare::create(l, r, |x, y| x == y)))?;
    registry.register(NOT_EQUAL, TwoArgsFactory(|l, r| Compare::create(l, r, |x, y| x != y)))?;
    registry.register(LESS, TwoArgsFactory(|l, r| Compare::create(l, r, |x, y| x < y)))?;
    registry.register(
        LESS_OR_EQUAL,
        TwoArgsFactory(|l, r| Compare::create(l, r, |x, y| x <= y)),
    )?;
    registry.register(GREATER, TwoArgsFactory(|l, r| Compare::create(l, r, |x, y| x > y)))?;
    registry.register(
        GREATER_OR_EQUAL,
        TwoArgsFactory(|l, r| Compare::create(l, r, |x, y| x >= y)),
    )
}

/// `Result is Expression`.
pub struct Is {
    result: Term,
    expression: Term,
    called: bool,
    undo: Option<State>,
}

impl Is {
    pub fn create(result: Term, expression: Term) -> Goal {
        Box::new(Is {
            result,
            expression,
            called: false,
            undo: None,
        })
    }
}

impl Solutions for Is {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        if std::mem::replace(&mut self.called, true) {
            self.abort();
            return Ok(false);
        }
        let value = Term::int(self.expression.eval_int()?);
        self.undo = self.result.unify_tentatively(&value);
        Ok(self.undo.is_some())
    }

    fn abort(&mut self) {
        if let Some(state) = self.undo.take() {
            state.restore();
        }
    }
}

/// Compares the values of two arithmetic expressions.
pub struct Compare {
    left: Term,
    right: Term,
    holds: fn(i64, i64) -> bool,
    called: bool,
}

impl Compare {
    pub fn create(left: Term, right: Term, holds: fn(i64, i64) -> bool) -> Goal {
        Box::new(Compare {
            left,
            right,
            holds,
            called: false,
        })
    }
}

impl Solutions for Compare {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        if std::mem::replace(&mut self.called, true) {
            return Ok(false);
        }
        let left = self.left.eval_int()?;
        let right = self.right.eval_int()?;
        Ok((self.holds)(left, right))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::QueryError,
        predicates::builtins,
        solutions::Solutions,
        term::{Term, Variable},
    };

    fn run(name: &str, left: Term, right: Term) -> Result<bool, QueryError> {
        let mut goal = Term::compound(name, vec![left, right]).call(builtins())?;
        goal.next(builtins())
    }

    #[test]
    fn is_binds_result_until_backtracking() {
        let x = Variable::new();
        let expr = Term::compound("-", vec![Term::int(7), Term::int(3)]);
        let mut goal = Term::compound("is", vec![Term::Var(x.clone()), expr])
            .call(builtins())
            .unwrap();
        assert!(goal.next(builtins()).unwrap());
        assert_eq!(Term::Var(x.clone()), Term::int(4));
        assert!(!goal.next(builtins()).unwrap());
        assert!(!x.is_bound());
    }

    #[test]
    fn is_checks_bound_result() {
        let expr = || Term::compound("*", vec![Term::int(6), Term::int(7)]);
        assert_eq!(run("is", Term::int(42), expr()), Ok(true));
        assert_eq!(run("is", Term::int(41), expr()), Ok(false));
    }

    #[test]
    fn is_reports_unbound_expression() {
        assert_eq!(
            run("is", Term::var(), Term::compound("+", vec![Term::var(), Term::int(1)])),
            Err(QueryError::Instantiation)
        );
    }

    #[test]
    fn comparisons() {
        let one = || Term::int(1);
        let two = || Term::compound("+", vec![Term::int(1), Term::int(1)]);
        assert_eq!(run("<", one(), two()), Ok(true));
        assert_eq!(run("<", two(), one()), Ok(false));
        assert_eq!(run("=<", one(), one()), Ok(true));
        assert_eq!(run(">", two(), one()), Ok(true));
        assert_eq!(run(">=", one(), two()), Ok(false));
        assert_eq!(run("=:=", two(), Term::int(2)), Ok(true));
        assert_eq!(run("=\\=", two(), Term::int(2)), Ok(false));
        assert_eq!(run("<", Term::var(), one()), Err(QueryError::Instantiation));
    }
}
