//! The scoped registry adapter.
//!
//! Wires a fresh module registry for one experience activation: validates
//! the identity inputs against the manifest, constructs each scoped module
//! bound to that identity, and forwards the kernel services the host chose
//! to grant. Construction either completes or fails atomically.

use std::any::Any;
use std::sync::Arc;

use kiosk_core::{
    ExperienceIdentity, HostDirs, KernelServiceMap, Manifest, ScopeKey, StableLegacyId,
};
use kiosk_fs::{ConstantsProvider, ScopedFileSystem};
use serde_json::{Map, Value};

use crate::constants::ScopedConstants;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::{ActivationId, KernelServiceModule, ModuleRegistry, ScopedModule};

/// Capability name the filesystem module registers under.
pub const FILE_SYSTEM_MODULE_NAME: &str = "fileSystem";

impl ScopedModule for ScopedFileSystem {
    fn name(&self) -> &str {
        FILE_SYSTEM_MODULE_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opaque host configuration bag forwarded to module constructors.
///
/// This layer reads only the keys it needs (`appOwnership`); everything
/// else passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryParams {
    values: Map<String, Value>,
}

impl RegistryParams {
    /// An empty params bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidParams`] for any non-object value.
    pub fn from_value(value: Value) -> RegistryResult<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(RegistryError::InvalidParams(format!(
                "registry params must be a JSON object, got {other}"
            ))),
        }
    }

    /// Set a key (host-side construction).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a string value.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

/// Constructs fully-wired module registries, one per experience activation.
///
/// The adapter itself holds no per-experience state; it is safe to call
/// concurrently from different experiences.
#[derive(Debug, Clone)]
pub struct ScopedRegistryAdapter {
    host_dirs: HostDirs,
}

impl ScopedRegistryAdapter {
    /// Create an adapter rooted at the host's own storage directories.
    #[must_use]
    pub fn new(host_dirs: HostDirs) -> Self {
        Self { host_dirs }
    }

    /// Wire a fresh module registry for one experience.
    ///
    /// Every module instance in the returned registry is bound to exactly
    /// this experience. A repeated scope key (e.g. on experience reload)
    /// yields fresh instances, never cached ones.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidIdentity`] if either identity key is empty.
    /// - [`RegistryError::ManifestMismatch`] if the manifest declares a
    ///   different scope key or stable legacy id than the caller supplied.
    /// - [`RegistryError::Construction`] if any constituent module fails to
    ///   initialize. No partially wired registry is ever returned.
    pub fn module_registry_for(
        &self,
        params: &RegistryParams,
        stable_legacy_id: &StableLegacyId,
        scope_key: &ScopeKey,
        manifest: &Manifest,
        kernel_services: &KernelServiceMap,
    ) -> RegistryResult<ModuleRegistry> {
        Self::check_manifest(manifest, scope_key, stable_legacy_id)?;

        // The filesystem sandbox is keyed by the stable legacy id so that
        // storage written before scope keys existed stays reachable.
        let identity = ExperienceIdentity::new(
            stable_legacy_id.as_str(),
            scope_key.as_str(),
            stable_legacy_id.as_str(),
        )?;

        let activation = ActivationId::new();
        let constants = Arc::new(ScopedConstants::from_params(params, scope_key.clone()));
        let constants_provider: &dyn ConstantsProvider = constants.as_ref();
        let file_system = ScopedFileSystem::init(
            identity.experience_id.clone(),
            constants_provider,
            &self.host_dirs,
        )?;

        let mut registry = ModuleRegistry::new(activation, identity);
        registry.insert(constants);
        registry.insert(Arc::new(file_system));
        for (name, service) in kernel_services.iter() {
            registry.insert(Arc::new(KernelServiceModule::new(name, Arc::clone(service))));
        }

        tracing::debug!(
            %activation,
            scope_key = %scope_key,
            modules = ?registry.module_names(),
            "wired scoped module registry"
        );

        Ok(registry)
    }

    fn check_manifest(
        manifest: &Manifest,
        scope_key: &ScopeKey,
        stable_legacy_id: &StableLegacyId,
    ) -> RegistryResult<()> {
        if manifest.scope_key() != scope_key {
            return Err(RegistryError::ManifestMismatch {
                field: "scope key",
                declared: manifest.scope_key().as_str().to_string(),
                supplied: scope_key.as_str().to_string(),
            });
        }
        if let Some(declared) = manifest.stable_legacy_id()
            && declared != stable_legacy_id
        {
            return Err(RegistryError::ManifestMismatch {
                field: "stable legacy id",
                declared: declared.as_str().to_string(),
                supplied: stable_legacy_id.as_str().to_string(),
            });
        }
        Ok(())
    }
}
