//! Declarative experience manifest.
//!
//! The manifest format is defined externally by the host; this layer reads
//! only the identity fields it needs to cross-check registry construction
//! (the scope key, and the stable legacy id when present). Everything else
//! is carried as an opaque JSON payload and forwarded untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ScopeError, ScopeResult};
use crate::identity::{ScopeKey, StableLegacyId};

/// Declarative metadata describing one experience.
///
/// Immutable for the lifetime of one registry construction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Canonical scope key the manifest declares itself for.
    #[serde(rename = "scopeKey")]
    scope_key: ScopeKey,

    /// Legacy identifier, present in manifests published before scope keys.
    #[serde(rename = "stableLegacyId", skip_serializing_if = "Option::is_none")]
    stable_legacy_id: Option<StableLegacyId>,

    /// The rest of the document, opaque to this layer.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest from its raw JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidManifest`] if the document is not valid
    /// JSON or lacks a usable `scopeKey` field.
    pub fn from_json(raw: &str) -> ScopeResult<Self> {
        serde_json::from_str(raw).map_err(|e| ScopeError::InvalidManifest(e.to_string()))
    }

    /// Build a manifest directly from identity fields (host-side construction).
    #[must_use]
    pub fn new(scope_key: ScopeKey) -> Self {
        Self {
            scope_key,
            stable_legacy_id: None,
            extra: Map::new(),
        }
    }

    /// Attach a stable legacy id.
    #[must_use]
    pub fn with_stable_legacy_id(mut self, id: StableLegacyId) -> Self {
        self.stable_legacy_id = Some(id);
        self
    }

    /// Attach the opaque remainder of the manifest document.
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// The scope key this manifest declares itself for.
    #[must_use]
    pub fn scope_key(&self) -> &ScopeKey {
        &self.scope_key
    }

    /// The declared stable legacy id, if the manifest carries one.
    #[must_use]
    pub fn stable_legacy_id(&self) -> Option<&StableLegacyId> {
        self.stable_legacy_id.as_ref()
    }

    /// The opaque remainder of the manifest document.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
