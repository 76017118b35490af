//! Host application directory roots.
//!
//! The host process owns exactly one sandboxed storage area, with a
//! document root (durable files) and a caches root (evictable files).
//! Per-experience sandboxes are derived *under* these roots; nothing in the
//! scoped layer ever resolves outside them.
//!
//! # Layout
//!
//! ```text
//! <host root>/
//! ├── documents/                    (document root)
//! │   └── ExperienceData/
//! │       └── <escaped-experience-id>/
//! └── caches/                       (caches root)
//!     └── ExperienceData/
//!         └── <escaped-experience-id>/
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// The host application's own top-level document and caches directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDirs {
    document_root: PathBuf,
    caches_root: PathBuf,
}

impl HostDirs {
    /// Resolve the host roots from the environment.
    ///
    /// Checks `$KIOSK_HOME` first, then falls back to `$HOME/.kiosk/`.
    /// The documents and caches roots live under that directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `$KIOSK_HOME` is set but not absolute, or if
    /// neither `$KIOSK_HOME` nor `$HOME` is set.
    pub fn resolve() -> io::Result<Self> {
        let root = if let Ok(custom) = std::env::var("KIOSK_HOME") {
            let p = PathBuf::from(&custom);
            if !p.is_absolute() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "KIOSK_HOME must be an absolute path",
                ));
            }
            p
        } else {
            let home = std::env::var("HOME").map_err(|_| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "neither KIOSK_HOME nor HOME environment variable is set",
                )
            })?;
            PathBuf::from(home).join(".kiosk")
        };

        Ok(Self {
            document_root: root.join("documents"),
            caches_root: root.join("caches"),
        })
    }

    /// Create from an explicit base directory (useful for testing).
    #[must_use]
    pub fn from_path(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            document_root: base.join("documents"),
            caches_root: base.join("caches"),
        }
    }

    /// Create from explicit document and caches roots.
    #[must_use]
    pub fn from_roots(document_root: impl Into<PathBuf>, caches_root: impl Into<PathBuf>) -> Self {
        Self {
            document_root: document_root.into(),
            caches_root: caches_root.into(),
        }
    }

    /// Ensure both roots exist on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.document_root)?;
        std::fs::create_dir_all(&self.caches_root)?;
        Ok(())
    }

    /// The host's top-level document directory.
    #[must_use]
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// The host's top-level caches directory.
    #[must_use]
    pub fn caches_root(&self) -> &Path {
        &self.caches_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_splits_documents_and_caches() {
        let dirs = HostDirs::from_path("/srv/kiosk");
        assert_eq!(dirs.document_root(), Path::new("/srv/kiosk/documents"));
        assert_eq!(dirs.caches_root(), Path::new("/srv/kiosk/caches"));
    }

    #[test]
    fn from_roots_keeps_explicit_paths() {
        let dirs = HostDirs::from_roots("/data/docs", "/data/cache");
        assert_eq!(dirs.document_root(), Path::new("/data/docs"));
        assert_eq!(dirs.caches_root(), Path::new("/data/cache"));
    }

    #[test]
    fn ensure_creates_both_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = HostDirs::from_path(tmp.path());
        dirs.ensure().unwrap();
        assert!(dirs.document_root().is_dir());
        assert!(dirs.caches_root().is_dir());
    }
}
