//! Snapshots of variable bindings.
//!
//! There is no global trail. A predicate that makes a tentative binding
//! captures the state of the terms it is about to unify and restores that
//! state when it backtracks or gets aborted.

use crate::term::{Term, Variable};

/// The binding a single variable had when the snapshot was taken.
#[derive(Clone, Debug)]
pub struct VariableState(Option<Term>);

impl Variable {
    pub fn manifest_state(&self) -> VariableState {
        VariableState(self.binding())
    }

    pub fn set_state(&self, state: VariableState) {
        self.replace_binding(state.0);
    }
}

/// Bindings of every variable that was still free in a term at the time the
/// snapshot was taken. Restoring unbinds exactly those variables, a state
/// can be restored any number of times.
#[derive(Clone, Debug, Default)]
#[must_use = "a state that is never restored cannot undo anything"]
pub struct State {
    saved: Vec<(Variable, VariableState)>,
}

impl State {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn join(mut self, other: State) -> State {
        self.saved.extend(other.saved);
        self
    }

    pub fn restore(&self) {
        for (var, state) in self.saved.iter().rev() {
            var.set_state(state.clone());
        }
    }

    /// Number of variables covered by this snapshot.
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Term {
    /// Capture the free variables of this term. Ground terms yield an empty
    /// state.
    pub fn manifest_state(&self) -> State {
        let mut saved = Vec::new();
        let mut pending = vec![self.clone()];
        while let Some(term) = pending.pop() {
            match term.deref() {
                Term::Var(var) => {
                    let state = var.manifest_state();
                    saved.push((var, state));
                }
                Term::Compound(compound) => pending.extend(compound.args().iter().cloned()),
                Term::Atom(_) | Term::Int(_) => {}
            }
        }
        State { saved }
    }
}

#[cfg(test)]
mod tests {
    use crate::term::{Term, Variable};

    #[test]
    fn variable_state_round_trip() {
        let x = Variable::new();
        let before = x.manifest_state();
        x.bind(Term::int(1));
        assert!(x.is_bound());
        x.set_state(before);
        assert!(!x.is_bound());
    }

    #[test]
    fn ground_terms_have_empty_state() {
        let term = Term::compound("f", vec![Term::atom("a"), Term::list([Term::int(1)])]);
        assert!(term.manifest_state().is_empty());
    }

    #[test]
    fn state_covers_nested_free_variables() {
        let x = Variable::new();
        let y = Variable::new();
        let term = Term::compound(
            "f",
            vec![Term::Var(x.clone()), Term::list([Term::Var(y.clone())])],
        );
        let state = term.manifest_state();
        assert_eq!(state.len(), 2);
        x.bind(Term::int(1));
        y.bind(Term::atom("b"));
        state.restore();
        assert!(!x.is_bound());
        assert!(!y.is_bound());
    }

    #[test]
    fn state_skips_variables_bound_before_the_snapshot() {
        let x = Variable::new();
        let y = Variable::new();
        x.bind(Term::Var(y.clone()));
        let state = Term::Var(x.clone()).manifest_state();
        y.bind(Term::int(5));
        state.restore();
        assert!(x.is_bound());
        assert!(!y.is_bound());
        assert!(Term::Var(x).is_var());
    }

    #[test]
    fn state_can_be_restored_repeatedly() {
        let x = Variable::new();
        let state = Term::Var(x.clone()).manifest_state();
        for value in 0..3 {
            x.bind(Term::int(value));
            state.restore();
        }
        assert!(!x.is_bound());
    }
}
