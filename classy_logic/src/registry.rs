use std::{collections::HashMap, fmt};

use tracing::{debug, warn};

use crate::{
    atom::Atom,
    error::{QueryError, RegistryError},
    solutions::Goal,
    term::Term,
};

/// Functor and arity of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredicateIdentifier {
    pub functor: Atom,
    pub arity: usize,
}

impl PredicateIdentifier {
    pub const fn new(functor: Atom, arity: usize) -> Self {
        Self { functor, arity }
    }
}

impl fmt::Display for PredicateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.functor, self.arity)
    }
}

/// Creates a fresh activation of a predicate for the given arguments.
///
/// The registry only hands a factory arguments matching the arity it was
/// registered under.
pub trait PredicateFactory: Send + Sync {
    fn create(&self, args: &[Term]) -> Goal;
}

/// Factory for predicates of any arity.
pub struct ArgsFactory(pub fn(&[Term]) -> Goal);

pub struct NoArgsFactory(pub fn() -> Goal);

pub struct OneArgFactory(pub fn(Term) -> Goal);

pub struct TwoArgsFactory(pub fn(Term, Term) -> Goal);

impl PredicateFactory for ArgsFactory {
    fn create(&self, args: &[Term]) -> Goal {
        (self.0)(args)
    }
}

impl PredicateFactory for NoArgsFactory {
    fn create(&self, args: &[Term]) -> Goal {
        let [] = args else {
            unreachable!("nullary predicate called with {} arguments", args.len())
        };
        (self.0)()
    }
}

impl PredicateFactory for OneArgFactory {
    fn create(&self, args: &[Term]) -> Goal {
        let [arg] = args else {
            unreachable!("unary predicate called with {} arguments", args.len())
        };
        (self.0)(arg.clone())
    }
}

impl PredicateFactory for TwoArgsFactory {
    fn create(&self, args: &[Term]) -> Goal {
        let [first, second] = args else {
            unreachable!("binary predicate called with {} arguments", args.len())
        };
        (self.0)(first.clone(), second.clone())
    }
}

/// What [`PredicateRegistry::register`] does with an identifier that is
/// already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first registration and report [`RegistryError::Duplicate`].
    #[default]
    Reject,
    /// Replace the earlier registration, the last one wins.
    Overwrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    pub duplicates: DuplicatePolicy,
}

/// Maps functor and arity to the logic implementing the predicate.
///
/// A registry is populated once, before any query using it runs, and is
/// read only afterwards. Lookups happen on every call of a term.
#[derive(Default)]
pub struct PredicateRegistry {
    config: RegistryConfig,
    factories: HashMap<PredicateIdentifier, Box<dyn PredicateFactory>>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            factories: HashMap::new(),
        }
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    #[tracing::instrument(skip(self, factory), fields(predicate = %identifier))]
    pub fn register(
        &mut self,
        identifier: PredicateIdentifier,
        factory: impl PredicateFactory + 'static,
    ) -> Result<(), RegistryError> {
        if self.factories.contains_key(&identifier) {
            match self.config.duplicates {
                DuplicatePolicy::Reject => return Err(RegistryError::Duplicate(identifier)),
                DuplicatePolicy::Overwrite => warn!("Overwriting registered predicate"),
            }
        }
        debug!("Registering predicate");
        self.factories.insert(identifier, Box::new(factory));
        Ok(())
    }

    pub fn factory(&self, identifier: PredicateIdentifier) -> Option<&dyn PredicateFactory> {
        self.factories.get(&identifier).map(|factory| factory.as_ref())
    }

    pub fn contains(&self, identifier: PredicateIdentifier) -> bool {
        self.factories.contains_key(&identifier)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = PredicateIdentifier> + '_ {
        self.factories.keys().copied()
    }

    /// Create a fresh activation of the predicate for the arguments.
    pub fn instantiate(
        &self,
        identifier: PredicateIdentifier,
        args: &[Term],
    ) -> Result<Goal, QueryError> {
        debug_assert_eq!(identifier.arity, args.len());
        match self.factories.get(&identifier) {
            Some(factory) => Ok(factory.create(args)),
            None => {
                debug!(predicate = %identifier, "Call to unknown predicate");
                Err(QueryError::UnknownPredicate(identifier))
            }
        }
    }
}
