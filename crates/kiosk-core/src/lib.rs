//! Core types for the kiosk multi-tenant experience host.
//!
//! A *kiosk* host embeds many independently-versioned runtime instances in a
//! single process, each serving one "experience" (a sub-application named by
//! a stable string key). This crate holds the shared vocabulary the scoped
//! layers are built from:
//!
//! - [`identity`] — opaque experience identity types
//! - [`manifest`] — declarative experience metadata
//! - [`services`] — host-granted kernel service handles
//! - [`dirs`] — the host application's own top-level directories
//! - [`error`] — the identity-validation error taxonomy

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Host application directory roots.
pub mod dirs;
/// Identity-validation error types.
pub mod error;
/// Experience identity types.
pub mod identity;
/// Declarative experience manifest.
pub mod manifest;
/// Kernel service handles granted by the host.
pub mod services;

pub use dirs::HostDirs;
pub use error::{ScopeError, ScopeResult};
pub use identity::{ExperienceId, ExperienceIdentity, ScopeKey, StableLegacyId};
pub use manifest::Manifest;
pub use services::{KernelService, KernelServiceMap};
