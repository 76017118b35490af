//! Per-experience sandbox directory derivation.
//!
//! Pure functions: the same `(experience id, detached)` pair always yields
//! the same paths, distinct ids never collide, and derived paths always sit
//! under the host's own roots. Nothing here touches the filesystem.

use std::path::PathBuf;

use kiosk_core::{ExperienceId, HostDirs};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Directory under each host root that holds the per-experience sandboxes.
pub const EXPERIENCE_DATA_DIR: &str = "ExperienceData";

/// Characters percent-encoded when turning an experience id into a single
/// filesystem path segment. `%` is in the set, which makes the encoding
/// injective; `/` and `\` are in the set, which makes the result a single
/// segment. Non-ASCII bytes are always encoded.
const SCOPE_DIR_ESCAPES: &AsciiSet = &CONTROLS
    .add(b'!')
    .add(b'*')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b';')
    .add(b':')
    .add(b'@')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'$')
    .add(b',')
    .add(b'/')
    .add(b'\\')
    .add(b'?')
    .add(b'%')
    .add(b'#')
    .add(b'[')
    .add(b']')
    .add(b' ');

/// Escape an experience id into a filesystem-safe directory name.
///
/// Deterministic and injective: two distinct ids always produce two
/// distinct names, and the name never contains a path separator.
#[must_use]
pub fn escaped_scope_dir_name(experience_id: &ExperienceId) -> String {
    let raw = experience_id.as_str();
    // "." and ".." are valid identity strings but reserved path segments;
    // encode every byte so they cannot alias the parent directories.
    if raw.chars().all(|c| c == '.') {
        return raw.chars().map(|_| "%2E").collect();
    }
    utf8_percent_encode(raw, SCOPE_DIR_ESCAPES).to_string()
}

/// Derive the sandboxed document directory for one experience.
///
/// Detached builds behave as single-tenant apps: the host's own document
/// root is returned unchanged, regardless of the id.
#[must_use]
pub fn document_directory_for(
    host: &HostDirs,
    experience_id: &ExperienceId,
    detached: bool,
) -> PathBuf {
    if detached {
        return host.document_root().to_path_buf();
    }
    host.document_root()
        .join(EXPERIENCE_DATA_DIR)
        .join(escaped_scope_dir_name(experience_id))
}

/// Derive the sandboxed caches directory for one experience.
#[must_use]
pub fn caches_directory_for(
    host: &HostDirs,
    experience_id: &ExperienceId,
    detached: bool,
) -> PathBuf {
    if detached {
        return host.caches_root().to_path_buf();
    }
    host.caches_root()
        .join(EXPERIENCE_DATA_DIR)
        .join(escaped_scope_dir_name(experience_id))
}
