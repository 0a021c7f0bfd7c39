use tracing::debug;

use crate::{
    error::QueryError,
    registry::PredicateRegistry,
    solutions::Goal,
    term::Term,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Exhausted,
    Aborted,
}

/// Top level evaluation of a goal.
///
/// Owns the root activation and makes sure it gets aborted when the query
/// is dropped before running out of solutions or when evaluation fails
/// with an error, so that no variable of the goal stays bound.
pub struct Query<'r> {
    goal: Term,
    solutions: Goal,
    registry: &'r PredicateRegistry,
    status: Status,
    found: usize,
}

impl<'r> Query<'r> {
    #[tracing::instrument(skip(registry), fields(goal = %goal))]
    pub fn new(goal: &Term, registry: &'r PredicateRegistry) -> Result<Self, QueryError> {
        let solutions = goal.call(registry)?;
        debug!("Query started");
        Ok(Self {
            goal: goal.clone(),
            solutions,
            registry,
            status: Status::Running,
            found: 0,
        })
    }

    pub fn goal(&self) -> &Term {
        &self.goal
    }

    /// Advance to the next solution, readable through the goal's variables.
    pub fn next_solution(&mut self) -> Result<bool, QueryError> {
        if self.status != Status::Running {
            return Ok(false);
        }
        match self.solutions.next(self.registry) {
            Ok(true) => {
                self.found += 1;
                debug!(goal = %self.goal, solution = self.found, "Solution found");
                Ok(true)
            }
            Ok(false) => {
                if self.solutions.choice_committed() {
                    self.solutions.abort();
                }
                self.status = Status::Exhausted;
                debug!(goal = %self.goal, solutions = self.found, "Query exhausted");
                Ok(false)
            }
            Err(err) => {
                debug!(goal = %self.goal, %err, "Query failed");
                self.abort();
                Err(err)
            }
        }
    }

    /// Collect the resolved values of `vars` for every remaining solution.
    pub fn collect(&mut self, vars: &[Term]) -> Result<Vec<Vec<Term>>, QueryError> {
        let mut solutions = Vec::new();
        while self.next_solution()? {
            solutions.push(vars.iter().map(Term::resolve).collect());
        }
        Ok(solutions)
    }

    /// Stop the query and undo the bindings of the current solution.
    pub fn abort(&mut self) {
        if self.status == Status::Running {
            debug!(goal = %self.goal, "Query aborted");
            self.solutions.abort();
            self.status = Status::Aborted;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.status != Status::Running
    }

    /// Solutions produced so far.
    pub fn solutions_found(&self) -> usize {
        self.found
    }
}

impl Drop for Query<'_> {
    fn drop(&mut self) {
        self.abort();
    }
}
