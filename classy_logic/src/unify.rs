use std::rc::Rc;

use crate::{state::State, term::Term};

impl Term {
    /// Make the two terms structurally equal by binding variables.
    ///
    /// Arguments are unified left to right and the first mismatch stops the
    /// traversal. Bindings made before the mismatch are left in place, use
    /// [`Term::unify_tentatively`] or a [`State`] taken beforehand to undo
    /// them. There is no occurs check.
    pub fn unify(&self, other: &Term) -> bool {
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((left, right)) = pending.pop() {
            match (left.deref(), right.deref()) {
                (Term::Var(x), Term::Var(y)) if x.same_as(&y) => {}
                (Term::Var(var), term) | (term, Term::Var(var)) => var.bind(term),
                (Term::Atom(a), Term::Atom(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Term::Int(a), Term::Int(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Term::Compound(a), Term::Compound(b)) => {
                    if Rc::ptr_eq(&a, &b) {
                        continue;
                    }
                    if a.functor() != b.functor() || a.arity() != b.arity() {
                        return false;
                    }
                    // reversed so that the first argument is popped first
                    pending.extend(
                        a.args()
                            .iter()
                            .cloned()
                            .zip(b.args().iter().cloned())
                            .rev(),
                    );
                }
                _ => return false,
            }
        }
        true
    }

    /// Unify and hand back the undo token on success. On failure every
    /// binding made along the way has already been undone.
    pub fn unify_tentatively(&self, other: &Term) -> Option<State> {
        let state = self.manifest_state().join(other.manifest_state());
        if self.unify(other) {
            Some(state)
        } else {
            state.restore();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::term::{Term, Variable};

    fn f(args: Vec<Term>) -> Term {
        Term::compound("f", args)
    }

    #[test]
    fn ground_terms_unify_iff_identical() {
        let samples = [
            Term::atom("a"),
            Term::atom("b"),
            Term::int(1),
            Term::int(2),
            f(vec![Term::atom("a")]),
            f(vec![Term::atom("b")]),
            f(vec![Term::atom("a"), Term::atom("a")]),
            Term::compound("g", vec![Term::atom("a")]),
            Term::list([Term::int(1), Term::int(2)]),
            Term::nil(),
        ];
        for (i, a) in samples.iter().enumerate() {
            for (j, b) in samples.iter().enumerate() {
                assert_eq!(a.unify(b), i == j, "unify({a}, {b})");
            }
        }
    }

    #[test]
    fn unbound_variable_binds_to_other_side() {
        let x = Variable::new();
        let term = f(vec![Term::int(1)]);
        assert!(Term::Var(x.clone()).unify(&term));
        assert_eq!(Term::Var(x), term);
    }

    #[test]
    fn variable_unifies_with_itself_without_binding() {
        let x = Variable::new();
        assert!(Term::Var(x.clone()).unify(&Term::Var(x.clone())));
        assert!(!x.is_bound());
    }

    #[test]
    fn aliased_variables_share_later_bindings() {
        let x = Variable::new();
        let y = Variable::new();
        assert!(Term::Var(x.clone()).unify(&Term::Var(y.clone())));
        assert!(Term::Var(y.clone()).unify(&Term::atom("z")));
        assert_eq!(Term::Var(x), Term::atom("z"));
    }

    #[test]
    fn arguments_unify_pairwise() {
        let x = Variable::new();
        let y = Variable::new();
        let left = f(vec![Term::Var(x.clone()), Term::atom("b")]);
        let right = f(vec![Term::atom("a"), Term::Var(y.clone())]);
        assert!(left.unify(&right));
        assert_eq!(Term::Var(x), Term::atom("a"));
        assert_eq!(Term::Var(y), Term::atom("b"));
    }

    #[test]
    fn partial_failure_leaves_earlier_bindings() {
        let x = Variable::new();
        let left = f(vec![Term::Var(x.clone()), Term::atom("b")]);
        let right = f(vec![Term::atom("a"), Term::atom("c")]);
        assert!(!left.unify(&right));
        assert!(x.is_bound());
    }

    #[test]
    fn tentative_unification_undoes_partial_failure() {
        let x = Variable::new();
        let left = f(vec![Term::Var(x.clone()), Term::atom("b")]);
        let right = f(vec![Term::atom("a"), Term::atom("c")]);
        assert!(left.unify_tentatively(&right).is_none());
        assert!(!x.is_bound());
    }

    #[test]
    fn tentative_unification_returns_undo_token() {
        let x = Variable::new();
        let y = Variable::new();
        let left = Term::list([Term::Var(x.clone()), Term::int(2)]);
        let right = Term::list([Term::int(1), Term::Var(y.clone())]);
        let undo = left.unify_tentatively(&right).expect("lists should unify");
        assert_eq!(left, Term::list([Term::int(1), Term::int(2)]));
        undo.restore();
        assert!(!x.is_bound());
        assert!(!y.is_bound());
    }

    #[test]
    fn functor_and_arity_must_match() {
        assert!(!f(vec![Term::var()]).unify(&Term::compound("g", vec![Term::var()])));
        assert!(!f(vec![Term::var()]).unify(&f(vec![Term::var(), Term::var()])));
        assert!(!Term::atom("f").unify(&f(vec![Term::var()])));
    }
}
