use std::{
    cell::RefCell,
    fmt,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    arith::ArithOp,
    atom::Atom,
    error::QueryError,
    registry::{PredicateIdentifier, PredicateRegistry},
    solutions::Goal,
};

/// A Prolog level value.
///
/// Terms are immutable, the only exception being the binding of a
/// [`Variable`]. Cloning a term is cheap, compound terms and variables are
/// shared, so a binding made through one clone is visible through all of
/// them.
#[derive(Clone)]
pub enum Term {
    Atom(Atom),
    Int(i64),
    Compound(Rc<Compound>),
    Var(Variable),
}

/// A functor applied to a fixed, non empty sequence of arguments.
pub struct Compound {
    functor: Atom,
    args: Box<[Term]>,
    /// Arithmetic operator denoted by the functor, resolved once when the
    /// term is built.
    op: Option<ArithOp>,
}

impl Compound {
    /// # Panics
    ///
    /// If `args` is empty, a functor without arguments is an atom.
    pub fn new(functor: Atom, args: Vec<Term>) -> Self {
        assert!(
            !args.is_empty(),
            "compound term {functor} needs at least one argument"
        );
        let op = ArithOp::resolve(functor, args.len());
        Compound {
            functor,
            args: args.into_boxed_slice(),
            op,
        }
    }

    pub fn functor(&self) -> Atom {
        self.functor
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// Argument at a zero based `index`.
    pub fn arg(&self, index: usize) -> Option<&Term> {
        self.args.get(index)
    }

    pub fn identifier(&self) -> PredicateIdentifier {
        PredicateIdentifier::new(self.functor, self.args.len())
    }

    pub(crate) fn arith_op(&self) -> Option<ArithOp> {
        self.op
    }

    pub fn is_list_cell(&self) -> bool {
        self.functor == Atom::DOT && self.args.len() == 2
    }

    /// Treat the compound as a goal. Whatever is registered under this
    /// term's functor and arity is instantiated with its arguments, this
    /// holds for arithmetic compounds as well.
    pub fn call(&self, registry: &PredicateRegistry) -> Result<Goal, QueryError> {
        registry.instantiate(self.identifier(), &self.args)
    }
}

impl Drop for Compound {
    // Same as the goal stack, long lists are unlinked through a work list
    // instead of being dropped recursively.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.args).into_vec();
        while let Some(term) = pending.pop() {
            match term {
                Term::Compound(compound) => {
                    if let Ok(mut compound) = Rc::try_unwrap(compound) {
                        pending.extend(std::mem::take(&mut compound.args).into_vec());
                    }
                }
                Term::Var(Variable(cell)) => {
                    if let Ok(cell) = Rc::try_unwrap(cell) {
                        pending.extend(cell.binding.into_inner());
                    }
                }
                Term::Atom(_) | Term::Int(_) => {}
            }
        }
    }
}

static NEXT_VARIABLE_ID: AtomicUsize = AtomicUsize::new(0);

/// A mutable binding cell shared by every term that mentions it.
#[derive(Clone)]
pub struct Variable(Rc<VarCell>);

struct VarCell {
    id: usize,
    binding: RefCell<Option<Term>>,
}

impl Variable {
    pub fn new() -> Self {
        Variable(Rc::new(VarCell {
            id: NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed),
            binding: RefCell::new(None),
        }))
    }

    pub fn id(&self) -> usize {
        self.0.id
    }

    pub fn binding(&self) -> Option<Term> {
        self.0.binding.borrow().clone()
    }

    pub fn is_bound(&self) -> bool {
        self.0.binding.borrow().is_some()
    }

    pub fn same_as(&self, other: &Variable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn bind(&self, value: Term) {
        debug_assert!(!self.is_bound(), "variable _G{} is already bound", self.0.id);
        self.replace_binding(Some(value));
    }

    pub(crate) fn replace_binding(&self, binding: Option<Term>) {
        *self.0.binding.borrow_mut() = binding;
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_G{}", self.0.id)
    }
}

impl Term {
    pub fn atom(name: &str) -> Term {
        Term::Atom(Atom::new(name))
    }

    pub fn int(value: i64) -> Term {
        Term::Int(value)
    }

    /// A compound term, or just the functor's atom when there are no
    /// arguments.
    pub fn compound(functor: impl Into<Atom>, args: Vec<Term>) -> Term {
        let functor = functor.into();
        if args.is_empty() {
            return Term::Atom(functor);
        }
        Term::Compound(Rc::new(Compound::new(functor, args)))
    }

    /// A fresh unbound variable.
    pub fn var() -> Term {
        Term::Var(Variable::new())
    }

    pub fn nil() -> Term {
        Term::Atom(Atom::NIL)
    }

    pub fn cons(head: Term, tail: Term) -> Term {
        Term::compound(Atom::DOT, vec![head, tail])
    }

    pub fn list(items: impl IntoIterator<Item = Term>) -> Term {
        Term::list_with_tail(items, Term::nil())
    }

    pub fn list_with_tail(items: impl IntoIterator<Item = Term>, tail: Term) -> Term {
        let items: Vec<Term> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(tail, |tail, head| Term::cons(head, tail))
    }

    /// Follow variable bindings until an unbound variable or a non
    /// variable term is reached.
    pub fn deref(&self) -> Term {
        let mut term = self.clone();
        loop {
            let next = match &term {
                Term::Var(var) => var.binding(),
                _ => None,
            };
            match next {
                Some(bound) => term = bound,
                None => return term,
            }
        }
    }

    /// A copy of this term with every bound variable replaced by its value.
    /// Unbound variables are kept as they are.
    pub fn resolve(&self) -> Term {
        enum Step {
            Visit(Term),
            Build(Rc<Compound>),
        }

        let mut pending = vec![Step::Visit(self.clone())];
        let mut resolved: Vec<Term> = Vec::new();
        while let Some(step) = pending.pop() {
            match step {
                Step::Visit(term) => match term.deref() {
                    Term::Compound(compound) => {
                        // reversed so that the first argument is resolved first
                        let args: Vec<Step> =
                            compound.args.iter().rev().cloned().map(Step::Visit).collect();
                        pending.push(Step::Build(compound));
                        pending.extend(args);
                    }
                    term => resolved.push(term),
                },
                Step::Build(compound) => {
                    let args = resolved.split_off(resolved.len() - compound.arity());
                    resolved.push(Term::Compound(Rc::new(Compound {
                        functor: compound.functor,
                        args: args.into_boxed_slice(),
                        op: compound.op,
                    })));
                }
            }
        }
        match resolved.pop() {
            Some(term) if resolved.is_empty() => term,
            _ => unreachable!("resolving a term did not yield exactly one result"),
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self.deref(), Term::Atom(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self.deref(), Term::Int(_))
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.deref(), Term::Compound(_))
    }

    pub fn is_var(&self) -> bool {
        matches!(self.deref(), Term::Var(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.deref(), Term::Atom(_) | Term::Compound(_))
    }

    pub fn as_atom(&self) -> Option<Atom> {
        match self.deref() {
            Term::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.deref() {
            Term::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Head and tail of the list cell this term is bound to.
    pub fn as_list_cell(&self) -> Option<(Term, Term)> {
        match self.deref() {
            Term::Compound(cell) if cell.is_list_cell() => {
                Some((cell.args[0].clone(), cell.args[1].clone()))
            }
            _ => None,
        }
    }

    /// Functor and arity of an atom or compound, atoms having arity 0.
    pub fn functor_arity(&self) -> Option<(Atom, usize)> {
        match self.deref() {
            Term::Atom(atom) => Some((atom, 0)),
            Term::Compound(compound) => Some((compound.functor, compound.arity())),
            _ => None,
        }
    }

    /// Argument at a zero based `index` of the compound this term is bound
    /// to.
    pub fn arg(&self, index: usize) -> Option<Term> {
        match self.deref() {
            Term::Compound(compound) => compound.arg(index).cloned(),
            _ => None,
        }
    }

    /// Functor and arity under which this term would be called.
    pub fn identifier(&self) -> Option<PredicateIdentifier> {
        match self.deref() {
            Term::Atom(atom) => Some(PredicateIdentifier::new(atom, 0)),
            Term::Compound(compound) => Some(compound.identifier()),
            _ => None,
        }
    }

    /// Treat the term as a goal and create a fresh activation of the
    /// predicate registered under its functor and arity.
    pub fn call(&self, registry: &PredicateRegistry) -> Result<Goal, QueryError> {
        match self.deref() {
            Term::Var(_) => Err(QueryError::Instantiation),
            Term::Int(_) => Err(QueryError::Type {
                expected: "callable",
                culprit: self.to_string(),
            }),
            Term::Atom(atom) => registry.instantiate(PredicateIdentifier::new(atom, 0), &[]),
            Term::Compound(compound) => compound.call(registry),
        }
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Term::Atom(atom)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Int(value)
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Self {
        Term::Var(var)
    }
}

/// Structural equality of the dereferenced terms. Variables are only equal
/// to themselves.
impl PartialEq for Term {
    fn eq(&self, other: &Term) -> bool {
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((left, right)) = pending.pop() {
            let equal = match (left.deref(), right.deref()) {
                (Term::Atom(a), Term::Atom(b)) => a == b,
                (Term::Int(a), Term::Int(b)) => a == b,
                (Term::Var(a), Term::Var(b)) => a.same_as(&b),
                (Term::Compound(a), Term::Compound(b)) => {
                    if !Rc::ptr_eq(&a, &b) {
                        if a.functor != b.functor || a.arity() != b.arity() {
                            return false;
                        }
                        pending.extend(a.args.iter().cloned().zip(b.args.iter().cloned()).rev());
                    }
                    true
                }
                _ => false,
            };
            if !equal {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.deref() {
            Term::Atom(atom) => write!(f, "{atom}"),
            Term::Int(value) => write!(f, "{value}"),
            Term::Var(var) => write!(f, "{var:?}"),
            Term::Compound(compound) if compound.is_list_cell() => {
                write!(f, "[{}", compound.args[0])?;
                let mut tail = compound.args[1].deref();
                loop {
                    let next = match &tail {
                        Term::Compound(cell) if cell.is_list_cell() => {
                            write!(f, ",{}", cell.args[0])?;
                            cell.args[1].deref()
                        }
                        Term::Atom(Atom::NIL) => break,
                        rest => {
                            write!(f, "|{rest}")?;
                            break;
                        }
                    };
                    tail = next;
                }
                f.write_str("]")
            }
            Term::Compound(compound) => {
                write!(f, "{}(", compound.functor)?;
                for (i, arg) in compound.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
