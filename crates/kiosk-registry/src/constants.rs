//! Scoped constants module.
//!
//! Install-time policy flags bound to one experience, read from the opaque
//! host params bag at construction. This is the constants provider the
//! scoped filesystem consults for the detached flag.

use std::any::Any;

use kiosk_core::ScopeKey;
use kiosk_fs::{AppOwnership, ConstantsProvider};

use crate::adapter::RegistryParams;
use crate::registry::ScopedModule;

/// Capability name the constants module registers under.
pub const CONSTANTS_MODULE_NAME: &str = "constants";

/// Install-time constants bound to one experience.
#[derive(Debug, Clone)]
pub struct ScopedConstants {
    scope_key: ScopeKey,
    app_ownership: AppOwnership,
}

impl ScopedConstants {
    /// Build the constants module from the host params bag.
    ///
    /// The bag's `appOwnership` key selects the ownership mode; absent or
    /// unrecognized values fall back to [`AppOwnership::Hosted`], the
    /// multi-tenant default.
    #[must_use]
    pub fn from_params(params: &RegistryParams, scope_key: ScopeKey) -> Self {
        let app_ownership = match params.get_str("appOwnership") {
            Some("standalone") => AppOwnership::Standalone,
            Some("guest") => AppOwnership::Guest,
            Some("hosted") | None => AppOwnership::Hosted,
            Some(other) => {
                tracing::warn!(
                    scope_key = %scope_key,
                    app_ownership = other,
                    "unrecognized appOwnership, defaulting to hosted"
                );
                AppOwnership::Hosted
            },
        };
        Self {
            scope_key,
            app_ownership,
        }
    }

    /// The scope key this module is bound to.
    #[must_use]
    pub fn scope_key(&self) -> &ScopeKey {
        &self.scope_key
    }
}

impl ConstantsProvider for ScopedConstants {
    fn app_ownership(&self) -> AppOwnership {
        self.app_ownership
    }
}

impl ScopedModule for ScopedConstants {
    fn name(&self) -> &str {
        CONSTANTS_MODULE_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key() -> ScopeKey {
        ScopeKey::new("@owner/app-a").unwrap()
    }

    #[test]
    fn defaults_to_hosted() {
        let constants = ScopedConstants::from_params(&RegistryParams::new(), key());
        assert_eq!(constants.app_ownership(), AppOwnership::Hosted);
        assert!(!constants.is_detached());
    }

    #[test]
    fn standalone_params_mean_detached() {
        let params = RegistryParams::from_value(json!({"appOwnership": "standalone"})).unwrap();
        let constants = ScopedConstants::from_params(&params, key());
        assert_eq!(constants.app_ownership(), AppOwnership::Standalone);
        assert!(constants.is_detached());
    }

    #[test]
    fn unrecognized_ownership_falls_back_to_hosted() {
        let params = RegistryParams::from_value(json!({"appOwnership": "mystery"})).unwrap();
        let constants = ScopedConstants::from_params(&params, key());
        assert_eq!(constants.app_ownership(), AppOwnership::Hosted);
    }
}
