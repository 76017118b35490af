//! Install-time policy flags consumed from the constants provider.
//!
//! The constants module itself lives outside this crate (the registry layer
//! supplies a scoped implementation); the sandbox only needs the boundary
//! defined here.

use serde::{Deserialize, Serialize};

/// How the currently running app was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppOwnership {
    /// Standalone build: the binary ships exactly one experience.
    Standalone,
    /// Hosted inside the multi-experience container app.
    Hosted,
    /// Running as a guest of another app embedding the container.
    Guest,
}

impl AppOwnership {
    /// Whether this ownership mode runs detached from the multi-tenant
    /// container. A detached app behaves as a single-tenant app and needs
    /// no per-experience sub-scoping.
    #[must_use]
    pub fn is_detached(self) -> bool {
        matches!(self, Self::Standalone)
    }
}

/// Query surface for install-time policy flags.
///
/// Implemented by the scoped constants module; the scoped filesystem queries
/// it to decide whether sandbox sub-scoping applies.
pub trait ConstantsProvider: Send + Sync {
    /// How the current app was installed.
    fn app_ownership(&self) -> AppOwnership;

    /// Whether the experience runs detached (no sub-scoping).
    fn is_detached(&self) -> bool {
        self.app_ownership().is_detached()
    }
}
