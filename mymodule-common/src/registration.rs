//! Registration of the services a module provides to its host.
//!
//! The host owns a [ServiceCollection] and hands it to the startup hooks of every module it
//! loads. A hook binds a capability (a trait object type) to a factory building an instance for
//! a [ServiceScope]. Bindings are first come, first served: a module never overrides a binding
//! made by another one.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;

use crate::StdResult;
use crate::entities::ServiceScope;

/// Builds an instance of the capability `S` for a scope.
pub type ServiceFactory<S> = Arc<dyn Fn(&ServiceScope) -> StdResult<Arc<S>> + Send + Sync>;

/// Mapping from a capability identity to the factory building its implementation.
#[derive(Default)]
pub struct ServiceCollection {
    factories: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ServiceCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `S` to the given factory unless it is already bound.
    ///
    /// Returns `true` if the factory was registered, `false` if an existing binding was kept.
    pub fn try_add<S: ?Sized + 'static>(&mut self, factory: ServiceFactory<S>) -> bool {
        let key = TypeId::of::<S>();
        if self.factories.contains_key(&key) {
            return false;
        }

        self.factories.insert(key, Box::new(factory));
        true
    }

    /// Check if `S` is bound
    pub fn contains<S: ?Sized + 'static>(&self) -> bool {
        self.factories.contains_key(&TypeId::of::<S>())
    }

    /// Number of bound capabilities
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if no capability is bound
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build an instance of `S` for the given scope
    pub fn resolve<S: ?Sized + 'static>(&self, scope: &ServiceScope) -> StdResult<Arc<S>> {
        let factory = self
            .factories
            .get(&TypeId::of::<S>())
            .and_then(|factory| factory.downcast_ref::<ServiceFactory<S>>())
            .ok_or_else(|| anyhow!("No service registered for '{}'", type_name::<S>()))?;

        factory(scope)
    }
}

/// Hook called by the host when it builds the client side service collection.
pub trait ClientStartup {
    /// Register the client side services of the module
    fn configure_services(&self, services: &mut ServiceCollection);
}

/// Hook called by the host when it builds the server side service collection.
pub trait ServerStartup {
    /// Register the server side services of the module
    fn configure_services(&self, services: &mut ServiceCollection);
}
