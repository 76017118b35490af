//! Scoped module-registry construction.
//!
//! The central binding step of the kiosk host: given one experience's
//! identity, manifest, and the kernel services the host chose to grant it,
//! wire a fresh [`ModuleRegistry`] whose every module instance is bound to
//! exactly that experience. The registry is then handed to one
//! ABI-versioned runtime instance for the experience's lifetime; how many
//! such instances coexist in the process is not this layer's concern.
//!
//! Construction is synchronous and atomic: it either returns a fully wired
//! registry or an error, never a partially initialized one. Repeated
//! construction for the same scope key always yields fresh module
//! instances — there is no dedup cache, by policy.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// The scoped registry adapter.
pub mod adapter;
/// Scoped constants module.
pub mod constants;
/// Registry construction error types.
pub mod error;
/// Scoped module trait and the registry container.
pub mod registry;

pub use adapter::{RegistryParams, ScopedRegistryAdapter};
pub use constants::ScopedConstants;
pub use error::{RegistryError, RegistryResult};
pub use registry::{ActivationId, KernelServiceModule, ModuleRegistry, ScopedModule};
