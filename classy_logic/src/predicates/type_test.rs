//! Type checking predicates such as `atom/1`.
//!
//! All of them follow the same deterministic pattern: the first call to
//! `next` evaluates the test, every later call fails. They never bind a
//! variable, so aborting them has nothing to undo.

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    registry::{OneArgFactory, PredicateIdentifier, PredicateRegistry},
    solutions::{Goal, Solutions},
    term::Term,
};

pub const ATOM: PredicateIdentifier = PredicateIdentifier::new(Atom::ATOM, 1);
pub const INTEGER: PredicateIdentifier = PredicateIdentifier::new(Atom::INTEGER, 1);
pub const VAR: PredicateIdentifier = PredicateIdentifier::new(Atom::VAR, 1);
pub const NONVAR: PredicateIdentifier = PredicateIdentifier::new(Atom::NONVAR, 1);
pub const COMPOUND: PredicateIdentifier = PredicateIdentifier::new(Atom::COMPOUND, 1);
pub const CALLABLE: PredicateIdentifier = PredicateIdentifier::new(Atom::CALLABLE, 1);

pub fn register(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    registry.register(ATOM, OneArgFactory(|t| TypeTest::create(t, Term::is_atom)))?;
    registry.register(INTEGER, OneArgFactory(|t| TypeTest::create(t, Term::is_int)))?;
    registry.register(VAR, OneArgFactory(|t| TypeTest::create(t, Term::is_var)))?;
    registry.register(NONVAR, OneArgFactory(|t| TypeTest::create(t, |t| !t.is_var())))?;
    registry.register(COMPOUND, OneArgFactory(|t| TypeTest::create(t, Term::is_compound)))?;
    registry.register(CALLABLE, OneArgFactory(|t| TypeTest::create(t, Term::is_callable)))
}

pub struct TypeTest {
    term: Term,
    test: fn(&Term) -> bool,
    called: bool,
}

impl TypeTest {
    pub fn new(term: Term, test: fn(&Term) -> bool) -> Self {
        Self {
            term,
            test,
            called: false,
        }
    }

    pub fn create(term: Term, test: fn(&Term) -> bool) -> Goal {
        Box::new(TypeTest::new(term, test))
    }
}

impl Solutions for TypeTest {
    fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
        if self.called {
            return Ok(false);
        }
        self.called = true;
        Ok((self.test)(&self.term))
    }
}

#[cfg(test)]
mod tests {
    use super::{TypeTest, ATOM};
    use crate::{
        predicates::builtins,
        solutions::Solutions,
        term::{Term, Variable},
    };

    fn atom_test(term: Term) -> TypeTest {
        TypeTest::new(term, Term::is_atom)
    }

    #[test]
    fn atom_succeeds_exactly_once() {
        let mut goal = atom_test(Term::atom("a"));
        assert!(goal.next(builtins()).unwrap());
        for _ in 0..3 {
            assert!(!goal.next(builtins()).unwrap());
        }
        assert!(!goal.choice_committed());
    }

    #[test]
    fn atom_rejects_compounds_forever() {
        let mut goal = atom_test(Term::compound("f", vec![Term::atom("a")]));
        for _ in 0..3 {
            assert!(!goal.next(builtins()).unwrap());
        }
        assert!(!goal.choice_committed());
    }

    #[test]
    fn atom_looks_through_bindings() {
        let x = Variable::new();
        x.bind(Term::nil());
        let mut goal = atom_test(Term::Var(x));
        assert!(goal.next(builtins()).unwrap());
    }

    #[test]
    fn registered_type_tests() {
        let check = |name: &str, arg: Term| {
            let mut goal = Term::compound(name, vec![arg]).call(builtins()).unwrap();
            goal.next(builtins()).unwrap()
        };
        assert!(builtins().contains(ATOM));
        assert!(check("atom", Term::atom("a")));
        assert!(!check("atom", Term::int(1)));
        assert!(check("integer", Term::int(1)));
        assert!(!check("integer", Term::atom("a")));
        assert!(check("var", Term::var()));
        assert!(!check("var", Term::int(1)));
        assert!(check("nonvar", Term::int(1)));
        assert!(!check("nonvar", Term::var()));
        assert!(check("compound", Term::list([Term::int(1)])));
        assert!(!check("compound", Term::nil()));
        assert!(check("callable", Term::atom("a")));
        assert!(!check("callable", Term::int(1)));
    }
}
