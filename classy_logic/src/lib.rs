//! Resolution engine for a Prolog like language.
//!
//! Goals are [`Term`]s. Calling a term looks its functor and arity up in a
//! [`PredicateRegistry`] and yields a [`Solutions`] activation that produces
//! one solution per call to `next`, backtracking in between. Bindings are
//! made in place and undone through [`State`] snapshots instead of a trail.
//!
//! ```
//! use classy_logic::{predicates::builtins, Query, Term};
//!
//! let x = Term::var();
//! let goal = Term::compound("member", vec![x.clone(), Term::list([Term::int(1), Term::int(2)])]);
//! let mut query = Query::new(&goal, builtins()).unwrap();
//! let found = query.collect(&[x]).unwrap();
//! assert_eq!(found, vec![vec![Term::int(1)], vec![Term::int(2)]]);
//! ```

pub mod arith;
pub mod atom;
pub mod error;
pub mod goal_stack;
pub mod predicates;
pub mod query;
pub mod registry;
pub mod solutions;
pub mod state;
pub mod term;
pub mod unify;

pub use atom::Atom;
pub use error::{ArithFault, QueryError, RegistryError};
pub use goal_stack::GoalStack;
pub use query::Query;
pub use registry::{
    ArgsFactory, DuplicatePolicy, NoArgsFactory, OneArgFactory, PredicateFactory,
    PredicateIdentifier, PredicateRegistry, RegistryConfig, TwoArgsFactory,
};
pub use solutions::{Goal, Solutions};
pub use state::{State, VariableState};
pub use term::{Compound, Term, Variable};
