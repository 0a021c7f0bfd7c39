use crate::{error::QueryError, registry::PredicateRegistry};

/// One activation of a goal, producing its solutions on demand.
///
/// An activation starts out not yet evaluated, produces solutions while
/// [`Solutions::next`] returns `Ok(true)` and is exhausted from the first
/// `Ok(false)` on. Every later call returns `Ok(false)` again. A solution is
/// not returned as a value, it is observable through the variables of the
/// goal's arguments.
///
/// When `next` reports `false` every binding made by the failed attempt has
/// been undone, unless [`Solutions::choice_committed`] is `true`. In that
/// case the caller is expected to abort whatever it still holds.
///
/// Implementations are explicit state machines. A call to `next` resumes
/// the machine where the previous call left it and never suspends.
pub trait Solutions {
    /// Advance to the next solution.
    fn next(&mut self, registry: &PredicateRegistry) -> Result<bool, QueryError>;

    /// Give up on this activation and undo the bindings of the current
    /// solution. The activation is exhausted afterwards.
    fn abort(&mut self) {}

    /// Whether the last failure happened because alternatives were cut
    /// away, as opposed to the search simply running out of them. Only
    /// meaningful after `next` returned `false`.
    fn choice_committed(&self) -> bool {
        false
    }
}

/// A boxed activation as handed out by the predicate registry.
pub type Goal = Box<dyn Solutions>;
