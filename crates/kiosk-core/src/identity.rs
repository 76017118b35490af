//! Opaque identity types for hosted experiences.
//!
//! An *experience* is one tenant sub-application hosted inside the kiosk
//! process. It is named by up to three strings, all of which this layer
//! treats as opaque keys — they are validated for non-emptiness, then only
//! ever compared and hashed, never parsed for structure:
//!
//! - [`ExperienceId`] — the string the host uses to name the experience
//!   (e.g. `"@owner/app-a"`). Partitions persisted storage.
//! - [`ScopeKey`] — the canonical stable scoping key used by newer scoped
//!   modules.
//! - [`StableLegacyId`] — backward-compatible identifier kept for module
//!   wiring that predates scope keys.
//!
//! Identity strings must be process-unique among concurrently running
//! experiences; the host is responsible for that, this layer only rejects
//! empty input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ScopeError, ScopeResult};

fn validate_key(kind: &str, value: &str) -> ScopeResult<()> {
    if value.trim().is_empty() {
        return Err(ScopeError::InvalidIdentity(format!(
            "{kind} must be a non-empty string"
        )));
    }
    Ok(())
}

macro_rules! identity_string {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a raw identity string.
            ///
            /// # Errors
            ///
            /// Returns [`ScopeError::InvalidIdentity`] if the input is empty
            /// or whitespace-only.
            pub fn new(value: impl Into<String>) -> ScopeResult<Self> {
                let value = value.into();
                validate_key($kind, &value)?;
                Ok(Self(value))
            }

            /// The raw identity string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ScopeError;

            fn try_from(value: String) -> ScopeResult<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

identity_string!(
    /// Opaque stable string naming one experience within the host process.
    ExperienceId,
    "experience id"
);

identity_string!(
    /// Canonical stable scoping key for an experience.
    ScopeKey,
    "scope key"
);

identity_string!(
    /// Backward-compatible experience identifier used by legacy module wiring.
    StableLegacyId,
    "stable legacy id"
);

/// Full identity of one hosted experience.
///
/// Owned by the host and passed by reference into every scoped component;
/// no scoped component persists it beyond its own lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperienceIdentity {
    /// The string naming the experience; partitions persisted storage.
    pub experience_id: ExperienceId,
    /// Canonical scoping key used by newer scoped modules.
    pub scope_key: ScopeKey,
    /// Legacy identifier kept for backward-compatible wiring.
    pub stable_legacy_id: StableLegacyId,
}

impl ExperienceIdentity {
    /// Build a validated identity from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidIdentity`] if any component is empty.
    pub fn new(
        experience_id: impl Into<String>,
        scope_key: impl Into<String>,
        stable_legacy_id: impl Into<String>,
    ) -> ScopeResult<Self> {
        Ok(Self {
            experience_id: ExperienceId::new(experience_id)?,
            scope_key: ScopeKey::new(scope_key)?,
            stable_legacy_id: StableLegacyId::new(stable_legacy_id)?,
        })
    }
}

impl fmt::Display for ExperienceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_id_accepts_typical_keys() {
        let id = ExperienceId::new("@owner/app-a").unwrap();
        assert_eq!(id.as_str(), "@owner/app-a");
    }

    #[test]
    fn experience_id_rejects_empty() {
        assert!(matches!(
            ExperienceId::new(""),
            Err(ScopeError::InvalidIdentity(_))
        ));
        assert!(matches!(
            ExperienceId::new("   "),
            Err(ScopeError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn scope_key_rejects_empty() {
        assert!(ScopeKey::new("").is_err());
    }

    #[test]
    fn identity_requires_all_components() {
        assert!(ExperienceIdentity::new("@owner/app-a", "@owner/app-a", "").is_err());
        let id = ExperienceIdentity::new("@owner/app-a", "@owner/app-a", "legacy-123").unwrap();
        assert_eq!(id.stable_legacy_id.as_str(), "legacy-123");
    }

    #[test]
    fn identity_serde_is_transparent() {
        let id = ExperienceId::new("@owner/app-a").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"@owner/app-a\"");
        let back: ExperienceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_uses_scope_key() {
        let id = ExperienceIdentity::new("exp", "@owner/app-a", "legacy").unwrap();
        assert_eq!(id.to_string(), "@owner/app-a");
    }
}
