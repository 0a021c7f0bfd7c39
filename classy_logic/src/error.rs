use thiserror::Error;

use crate::registry::PredicateIdentifier;

/// Reasons an arithmetic evaluation cannot produce a value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithFault {
    #[error("zero_divisor")]
    ZeroDivisor,
    #[error("int_overflow")]
    IntOverflow,
}

/// Errors in the program being evaluated, as opposed to a goal that simply
/// has no (more) solutions. They are never turned into backtracking and
/// travel up to whoever drives the query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown procedure {0}")]
    UnknownPredicate(PredicateIdentifier),
    #[error("Arguments are not sufficiently instantiated")]
    Instantiation,
    #[error("Type error: expected {expected}, found {culprit}")]
    Type {
        expected: &'static str,
        culprit: String,
    },
    #[error("Arithmetic: evaluation error: {0}")]
    Evaluation(#[from] ArithFault),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Predicate {0} is already registered")]
    Duplicate(PredicateIdentifier),
}
