//! Kernel service handles granted by the host.
//!
//! Kernel services are capabilities the host grants an experience beyond the
//! generic scoped modules (cross-experience coordination, updates control,
//! and so on). The scoped layer forwards them verbatim: it never inspects,
//! mutates, or adds entries — the host alone decides what each experience
//! may see.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An opaque named service handle supplied by the host kernel.
///
/// Implementations live outside this layer; `as_any` exists so a runtime
/// instance can downcast a forwarded handle back to its concrete type.
pub trait KernelService: Send + Sync {
    /// Downcast hook for consumers that know the concrete service type.
    fn as_any(&self) -> &dyn Any;
}

/// Read-only mapping from service name to service handle.
///
/// Built once by the host per experience activation and forwarded verbatim
/// into the scoped module registry.
#[derive(Clone, Default)]
pub struct KernelServiceMap {
    services: HashMap<String, Arc<dyn KernelService>>,
}

impl KernelServiceMap {
    /// Create an empty service map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a service handle under a name (host-side construction).
    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>, service: Arc<dyn KernelService>) -> Self {
        self.services.insert(name.into(), service);
        self
    }

    /// Look up a service handle by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn KernelService>> {
        self.services.get(name)
    }

    /// Names of all granted services, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Iterate over all granted services.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn KernelService>)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of granted services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the host granted no services at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for KernelServiceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelServiceMap")
            .field("names", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpdatesService {
        channel: &'static str,
    }

    impl KernelService for UpdatesService {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn lookup_and_downcast() {
        let map = KernelServiceMap::new()
            .with_service("updates", Arc::new(UpdatesService { channel: "stable" }));

        let handle = map.get("updates").unwrap();
        let concrete = handle.as_any().downcast_ref::<UpdatesService>().unwrap();
        assert_eq!(concrete.channel, "stable");
        assert!(map.get("camera").is_none());
    }

    #[test]
    fn empty_map_is_valid() {
        let map = KernelServiceMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }
}
