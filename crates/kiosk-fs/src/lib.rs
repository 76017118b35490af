//! Per-experience filesystem sandbox.
//!
//! Each hosted experience gets its own document and caches directory,
//! derived deterministically from its [`ExperienceId`](kiosk_core::ExperienceId)
//! under the host's own storage roots. The sandbox is enforced by path
//! construction: every path-accepting operation resolves relative to the
//! derived roots and rejects anything that would escape them.
//!
//! Isolation here is within one process, by convention and path prefix —
//! not OS-level access control.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Install-time policy flags consumed from the constants provider.
pub mod constants;
/// Filesystem sandbox error types.
pub mod error;
/// The scoped filesystem module.
pub mod module;
/// Sandboxed relative-path resolution.
pub mod path;
/// Per-experience sandbox directory derivation.
pub mod scoped_dirs;

pub use constants::{AppOwnership, ConstantsProvider};
pub use error::{FsError, FsResult};
pub use module::{DirEntryInfo, FileInfo, ScopedFileSystem, StorageScope};
pub use scoped_dirs::{caches_directory_for, document_directory_for, escaped_scope_dir_name};
