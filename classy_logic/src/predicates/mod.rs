//! Built-in predicates.
//!
//! Each module names the identifiers it implements and offers a `register`
//! function adding its factories to a registry. Additional predicates plug
//! in the same way.

use lazy_static::lazy_static;

use crate::{error::RegistryError, registry::PredicateRegistry};

pub mod and;
pub mod arithmetic;
pub mod control;
pub mod equality;
pub mod member;
pub mod or;
pub mod type_test;

pub use and::And;
pub use member::Member;
pub use or::Or;
pub use type_test::TypeTest;

lazy_static! {
    static ref BUILTINS: PredicateRegistry = {
        let mut registry = PredicateRegistry::new();
        if let Err(err) = register_all(&mut registry) {
            panic!("Could not set up the built-in predicates: {err}");
        }
        registry
    };
}

/// Register every built-in predicate.
pub fn register_all(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    control::register(registry)?;
    and::register(registry)?;
    or::register(registry)?;
    equality::register(registry)?;
    type_test::register(registry)?;
    arithmetic::register(registry)?;
    member::register(registry)?;
    Ok(())
}

/// Process wide registry holding exactly the built-in predicates. It is
/// populated on first use and never changes afterwards.
pub fn builtins() -> &'static PredicateRegistry {
    &BUILTINS
}
