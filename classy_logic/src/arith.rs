//! Integer evaluation of arithmetic expressions.
//!
//! Evaluation is a plain traversal of the term. It never binds a variable
//! and never consults the predicate registry.

use crate::{
    atom::Atom,
    error::{ArithFault, QueryError},
    term::Term,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    IntDiv,
    Mod,
    Min,
    Max,
    Neg,
    Abs,
}

impl ArithOp {
    /// The operator a functor of the given arity denotes, if any.
    pub fn resolve(functor: Atom, arity: usize) -> Option<ArithOp> {
        let op = match (functor, arity) {
            (Atom::PLUS, 2) => ArithOp::Add,
            (Atom::MINUS, 2) => ArithOp::Sub,
            (Atom::STAR, 2) => ArithOp::Mul,
            (Atom::INT_DIV, 2) => ArithOp::IntDiv,
            (Atom::MOD, 2) => ArithOp::Mod,
            (Atom::MIN, 2) => ArithOp::Min,
            (Atom::MAX, 2) => ArithOp::Max,
            (Atom::MINUS, 1) => ArithOp::Neg,
            (Atom::ABS, 1) => ArithOp::Abs,
            _ => return None,
        };
        Some(op)
    }

    pub fn apply_unary(self, x: i64) -> Result<i64, ArithFault> {
        match self {
            ArithOp::Neg => x.checked_neg().ok_or(ArithFault::IntOverflow),
            ArithOp::Abs => x.checked_abs().ok_or(ArithFault::IntOverflow),
            op => unreachable!("{op:?} is not a unary operator"),
        }
    }

    pub fn apply_binary(self, x: i64, y: i64) -> Result<i64, ArithFault> {
        match self {
            ArithOp::Add => x.checked_add(y).ok_or(ArithFault::IntOverflow),
            ArithOp::Sub => x.checked_sub(y).ok_or(ArithFault::IntOverflow),
            ArithOp::Mul => x.checked_mul(y).ok_or(ArithFault::IntOverflow),
            ArithOp::IntDiv => {
                if y == 0 {
                    return Err(ArithFault::ZeroDivisor);
                }
                x.checked_div(y).ok_or(ArithFault::IntOverflow)
            }
            ArithOp::Mod => {
                if y == 0 {
                    return Err(ArithFault::ZeroDivisor);
                }
                if y == -1 {
                    return Ok(0);
                }
                // result takes the sign of the divisor
                let r = x % y;
                if r != 0 && (r < 0) != (y < 0) {
                    Ok(r + y)
                } else {
                    Ok(r)
                }
            }
            ArithOp::Min => Ok(x.min(y)),
            ArithOp::Max => Ok(x.max(y)),
            op => unreachable!("{op:?} is not a binary operator"),
        }
    }
}

impl Term {
    /// Evaluate the term as an integer expression.
    pub fn eval_int(&self) -> Result<i64, QueryError> {
        match self.deref() {
            Term::Int(value) => Ok(value),
            Term::Var(_) => Err(QueryError::Instantiation),
            Term::Compound(compound) => match (compound.arith_op(), compound.args()) {
                (Some(op), [x]) => Ok(op.apply_unary(x.eval_int()?)?),
                (Some(op), [x, y]) => Ok(op.apply_binary(x.eval_int()?, y.eval_int()?)?),
                _ => Err(QueryError::Type {
                    expected: "evaluable",
                    culprit: compound.identifier().to_string(),
                }),
            },
            term @ Term::Atom(_) => Err(QueryError::Type {
                expected: "evaluable",
                culprit: format!("{term}/0"),
            }),
        }
    }
}
