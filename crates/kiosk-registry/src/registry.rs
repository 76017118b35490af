//! Scoped module trait and the registry container.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use kiosk_core::{ExperienceIdentity, KernelService};
use uuid::Uuid;

/// A native capability object bound to exactly one experience.
///
/// Scoped modules are built by composition, not subclassing: a generic
/// capability plus the identity and policy it was constructed with.
pub trait ScopedModule: Send + Sync {
    /// Capability name the module registers under (e.g. `"fileSystem"`).
    fn name(&self) -> &str;

    /// Downcast hook for consumers that know the concrete module type.
    fn as_any(&self) -> &dyn Any;
}

/// Forwarded kernel service handle, registered as a module entry.
///
/// The handle is forwarded verbatim; the scoped layer grants access, it does
/// not reinterpret the service.
pub struct KernelServiceModule {
    name: String,
    service: Arc<dyn KernelService>,
}

impl KernelServiceModule {
    /// Wrap a kernel service handle under its registered name.
    #[must_use]
    pub fn new(name: impl Into<String>, service: Arc<dyn KernelService>) -> Self {
        Self {
            name: name.into(),
            service,
        }
    }

    /// The forwarded service handle.
    #[must_use]
    pub fn service(&self) -> &Arc<dyn KernelService> {
        &self.service
    }
}

impl ScopedModule for KernelServiceModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Identifier of one registry construction.
///
/// Every call to the adapter mints a fresh activation id, making the
/// "fresh instances per activation" policy observable in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivationId(Uuid);

impl ActivationId {
    /// Mint a new activation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActivationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The set of native capability objects made available to one running
/// experience.
///
/// Created at experience launch, owned exclusively by the runtime instance
/// it is handed to, torn down when the experience unloads. Never shared or
/// reused across experiences or activations.
pub struct ModuleRegistry {
    activation: ActivationId,
    identity: ExperienceIdentity,
    modules: HashMap<String, Arc<dyn ScopedModule>>,
}

impl ModuleRegistry {
    pub(crate) fn new(activation: ActivationId, identity: ExperienceIdentity) -> Self {
        Self {
            activation,
            identity,
            modules: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, module: Arc<dyn ScopedModule>) {
        self.modules.insert(module.name().to_string(), module);
    }

    /// The activation this registry was built for.
    #[must_use]
    pub fn activation(&self) -> ActivationId {
        self.activation
    }

    /// The experience this registry is bound to.
    #[must_use]
    pub fn identity(&self) -> &ExperienceIdentity {
        &self.identity
    }

    /// Look up a module by capability name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScopedModule>> {
        self.modules.get(name)
    }

    /// Look up a module and downcast it to its concrete type.
    #[must_use]
    pub fn get_as<T: 'static>(&self, name: &str) -> Option<&T> {
        self.modules.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Names of all registered modules, sorted.
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("activation", &self.activation)
            .field("scope_key", &self.identity.scope_key)
            .field("modules", &self.module_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullService;
    impl KernelService for NullService {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn identity() -> ExperienceIdentity {
        ExperienceIdentity::new("@owner/app-a", "@owner/app-a", "legacy-123").unwrap()
    }

    #[test]
    fn activation_ids_are_unique() {
        assert_ne!(ActivationId::new(), ActivationId::new());
    }

    #[test]
    fn lookup_by_name_and_type() {
        let mut registry = ModuleRegistry::new(ActivationId::new(), identity());
        registry.insert(Arc::new(KernelServiceModule::new(
            "updates",
            Arc::new(NullService),
        )));

        assert_eq!(registry.len(), 1);
        assert!(registry.get("updates").is_some());
        assert!(registry.get_as::<KernelServiceModule>("updates").is_some());
        assert!(registry.get("camera").is_none());
    }
}
