use std::{cell::RefCell, rc::Rc};

use crate::solutions::Goal;

/// An activation that can sit in several goal stacks at once.
pub type SharedGoal = Rc<RefCell<Goal>>;

/// Persistent stack of in progress activations.
///
/// Pushing and popping return a new stack and leave the receiver untouched,
/// so stacks taken at different points of a search share their common tail.
#[derive(Clone, Default)]
pub struct GoalStack(Option<Rc<Frame>>);

struct Frame {
    goal: SharedGoal,
    rest: GoalStack,
}

impl GoalStack {
    pub const EMPTY: GoalStack = GoalStack(None);

    pub fn empty() -> GoalStack {
        GoalStack::EMPTY
    }

    pub fn put(&self, goal: Goal) -> GoalStack {
        self.put_shared(Rc::new(RefCell::new(goal)))
    }

    pub fn put_shared(&self, goal: SharedGoal) -> GoalStack {
        GoalStack(Some(Rc::new(Frame {
            goal,
            rest: self.clone(),
        })))
    }

    pub fn peek(&self) -> Option<&SharedGoal> {
        self.0.as_ref().map(|frame| &frame.goal)
    }

    /// The stack below the top. Popping the empty stack yields the empty
    /// stack.
    pub fn pop(&self) -> GoalStack {
        match &self.0 {
            Some(frame) => frame.rest.clone(),
            None => GoalStack::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut frame = self.0.as_ref();
        while let Some(current) = frame {
            len += 1;
            frame = current.rest.0.as_ref();
        }
        len
    }
}

impl Drop for GoalStack {
    // Unlink frames one at a time, the default recursive drop would blow
    // the stack for long chains.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(frame) = next {
            match Rc::try_unwrap(frame) {
                Ok(mut frame) => next = frame.rest.0.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::GoalStack;
    use crate::{
        error::QueryError,
        registry::PredicateRegistry,
        solutions::{Goal, Solutions},
    };

    struct Marker;

    impl Solutions for Marker {
        fn next(&mut self, _: &PredicateRegistry) -> Result<bool, QueryError> {
            Ok(false)
        }
    }

    fn marker() -> Goal {
        Box::new(Marker)
    }

    #[test]
    fn empty_stack() {
        let stack = GoalStack::empty();
        assert!(stack.is_empty());
        assert!(stack.peek().is_none());
        assert!(stack.pop().is_empty());
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn put_does_not_modify_receiver() {
        let base = GoalStack::EMPTY.put(marker());
        let extended = base.put(marker());
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert!(!extended.is_empty());
    }

    #[test]
    fn branches_share_their_tail() {
        let base = GoalStack::EMPTY.put(marker());
        let left = base.put(marker());
        let right = base.put(marker());
        assert!(Rc::ptr_eq(
            left.pop().peek().unwrap(),
            right.pop().peek().unwrap()
        ));
        assert!(Rc::ptr_eq(left.pop().peek().unwrap(), base.peek().unwrap()));
        assert!(!Rc::ptr_eq(left.peek().unwrap(), right.peek().unwrap()));
    }

    #[test]
    fn pop_returns_previous_shape() {
        let one = GoalStack::EMPTY.put(marker());
        let two = one.put(marker());
        let popped = two.pop();
        assert_eq!(popped.len(), 1);
        assert!(Rc::ptr_eq(popped.peek().unwrap(), one.peek().unwrap()));
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn long_stacks_drop_without_recursion() {
        let mut stack = GoalStack::empty();
        for _ in 0..200_000 {
            stack = stack.put(marker());
        }
        assert_eq!(stack.len(), 200_000);
        drop(stack);
    }
}
