//! The scoped filesystem module.
//!
//! Exposes the generic filesystem capability surface, with every
//! path-accepting operation confined to the document and caches sandboxes
//! derived for one experience. All operations are synchronous; the module
//! introduces no background threads and performs no network or
//! cross-experience I/O.

use std::path::{Path, PathBuf};

use kiosk_core::{ExperienceId, HostDirs};
use serde::{Deserialize, Serialize};

use crate::constants::ConstantsProvider;
use crate::error::{FsError, FsResult};
use crate::path::resolve_physical;
use crate::scoped_dirs::{caches_directory_for, document_directory_for};

/// Which sandbox root anchors a relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageScope {
    /// Durable per-experience storage.
    Documents,
    /// Evictable per-experience storage.
    Caches,
}

/// Metadata for one sandboxed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// True if the entry is a directory.
    pub is_dir: bool,
    /// True if the entry is a file.
    pub is_file: bool,
    /// Size of the file in bytes.
    pub size: u64,
    /// Modification time in seconds since the UNIX epoch.
    pub mtime: u64,
}

/// Directory entry returned by [`ScopedFileSystem::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntryInfo {
    /// Name of the entry.
    pub name: String,
    /// True if the entry is a directory.
    pub is_dir: bool,
}

/// Filesystem capability bound to exactly one experience.
///
/// Holds only the derived sandbox roots, not a second copy of ownership
/// over the underlying storage. Constructed per experience activation and
/// never shared between experiences.
#[derive(Debug)]
pub struct ScopedFileSystem {
    experience_id: ExperienceId,
    document_dir: PathBuf,
    caches_dir: PathBuf,
}

impl ScopedFileSystem {
    /// Build the sandbox for one experience and create its directories.
    ///
    /// The constants provider decides whether the app runs detached; a
    /// detached build keeps the host's own roots and gets no sub-scoping.
    ///
    /// # Errors
    ///
    /// Returns an error if the sandbox directories cannot be created.
    pub fn init(
        experience_id: ExperienceId,
        constants: &dyn ConstantsProvider,
        host: &HostDirs,
    ) -> FsResult<Self> {
        let detached = constants.is_detached();
        let document_dir = document_directory_for(host, &experience_id, detached);
        let caches_dir = caches_directory_for(host, &experience_id, detached);

        std::fs::create_dir_all(&document_dir)?;
        std::fs::create_dir_all(&caches_dir)?;

        tracing::debug!(
            experience_id = %experience_id,
            detached,
            documents = %document_dir.display(),
            caches = %caches_dir.display(),
            "initialized scoped filesystem"
        );

        Ok(Self {
            experience_id,
            document_dir,
            caches_dir,
        })
    }

    /// The experience this sandbox is bound to.
    #[must_use]
    pub fn experience_id(&self) -> &ExperienceId {
        &self.experience_id
    }

    /// The derived document directory.
    #[must_use]
    pub fn document_dir(&self) -> &Path {
        &self.document_dir
    }

    /// The derived caches directory.
    #[must_use]
    pub fn caches_dir(&self) -> &Path {
        &self.caches_dir
    }

    fn root(&self, scope: StorageScope) -> &Path {
        match scope {
            StorageScope::Documents => &self.document_dir,
            StorageScope::Caches => &self.caches_dir,
        }
    }

    fn resolve(&self, scope: StorageScope, path: &str) -> FsResult<PathBuf> {
        resolve_physical(self.root(scope), path).inspect_err(|e| {
            tracing::warn!(
                experience_id = %self.experience_id,
                path,
                error = %e,
                "rejected sandboxed path"
            );
        })
    }

    /// Read the full contents of a file.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::SandboxViolation`] if the path escapes the
    /// sandbox, [`FsError::NotFound`] if the file does not exist.
    pub fn read(&self, scope: StorageScope, path: &str) -> FsResult<Vec<u8>> {
        let target = self.resolve(scope, path)?;
        match std::fs::read(&target) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FsError::NotFound(path.to_string()))
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Write a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::SandboxViolation`] if the path escapes the
    /// sandbox; no filesystem mutation occurs in that case.
    pub fn write(&self, scope: StorageScope, path: &str, contents: &[u8]) -> FsResult<()> {
        let target = self.resolve(scope, path)?;
        if target == self.root(scope) {
            return Err(FsError::PermissionDenied(
                "cannot operate on the sandbox root directly".into(),
            ));
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, contents)?;
        Ok(())
    }

    /// Delete a file, or a directory together with its contents.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if the entry does not exist,
    /// [`FsError::PermissionDenied`] when targeting the sandbox root.
    pub fn delete(&self, scope: StorageScope, path: &str) -> FsResult<()> {
        let target = self.resolve(scope, path)?;
        if target == self.root(scope) {
            return Err(FsError::PermissionDenied(
                "cannot operate on the sandbox root directly".into(),
            ));
        }
        let meta = std::fs::symlink_metadata(&target)
            .map_err(|_| FsError::NotFound(path.to_string()))?;
        if meta.is_dir() {
            std::fs::remove_dir_all(&target)?;
        } else {
            std::fs::remove_file(&target)?;
        }
        Ok(())
    }

    /// List the entries of a directory.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if the directory does not exist.
    pub fn list(&self, scope: StorageScope, path: &str) -> FsResult<Vec<DirEntryInfo>> {
        let target = self.resolve(scope, path)?;
        let read_dir = match std::fs::read_dir(&target) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FsError::NotFound(path.to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Metadata for a sandboxed entry.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if the entry does not exist.
    pub fn info(&self, scope: StorageScope, path: &str) -> FsResult<FileInfo> {
        let target = self.resolve(scope, path)?;
        let metadata = std::fs::metadata(&target)
            .map_err(|_| FsError::NotFound(path.to_string()))?;
        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map_or(0u64, |d| d.as_secs());
        Ok(FileInfo {
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
            size: metadata.len(),
            mtime,
        })
    }

    /// Whether an entry exists inside the sandbox.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::SandboxViolation`] if the path escapes the sandbox.
    pub fn exists(&self, scope: StorageScope, path: &str) -> FsResult<bool> {
        let target = self.resolve(scope, path)?;
        Ok(target.symlink_metadata().is_ok())
    }

    /// Create a directory (and any missing parents).
    ///
    /// # Errors
    ///
    /// Returns [`FsError::SandboxViolation`] if the path escapes the sandbox.
    pub fn make_directory(&self, scope: StorageScope, path: &str) -> FsResult<()> {
        let target = self.resolve(scope, path)?;
        std::fs::create_dir_all(&target)?;
        Ok(())
    }

    /// Copy a file to another location within the same sandbox scope.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if the source does not exist; either
    /// path escaping the sandbox fails with [`FsError::SandboxViolation`]
    /// before any I/O.
    pub fn copy_within(&self, scope: StorageScope, from: &str, to: &str) -> FsResult<()> {
        let source = self.resolve(scope, from)?;
        let dest = self.resolve(scope, to)?;
        if !source.is_file() {
            return Err(FsError::NotFound(from.to_string()));
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&source, &dest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AppOwnership;

    struct FixedConstants(AppOwnership);

    impl ConstantsProvider for FixedConstants {
        fn app_ownership(&self) -> AppOwnership {
            self.0
        }
    }

    fn hosted_fs(base: &Path, id: &str) -> ScopedFileSystem {
        let host = HostDirs::from_path(base);
        host.ensure().unwrap();
        ScopedFileSystem::init(
            ExperienceId::new(id).unwrap(),
            &FixedConstants(AppOwnership::Hosted),
            &host,
        )
        .unwrap()
    }

    #[test]
    fn init_creates_sandbox_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        assert!(fs.document_dir().is_dir());
        assert!(fs.caches_dir().is_dir());
        assert!(fs.document_dir().ends_with("ExperienceData/%40owner%2Fapp-a"));
    }

    #[test]
    fn detached_init_uses_host_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let host = HostDirs::from_path(tmp.path());
        host.ensure().unwrap();
        let fs = ScopedFileSystem::init(
            ExperienceId::new("@owner/app-a").unwrap(),
            &FixedConstants(AppOwnership::Standalone),
            &host,
        )
        .unwrap();
        assert_eq!(fs.document_dir(), host.document_root());
        assert_eq!(fs.caches_dir(), host.caches_root());
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        fs.write(StorageScope::Documents, "notes/todo.txt", b"milk")
            .unwrap();
        let bytes = fs.read(StorageScope::Documents, "notes/todo.txt").unwrap();
        assert_eq!(bytes, b"milk");
    }

    #[test]
    fn traversal_write_fails_without_mutation() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        let res = fs.write(StorageScope::Documents, "../../secret", b"leak");
        assert!(matches!(res, Err(FsError::SandboxViolation(_))));
        // Nothing escaped into the documents root.
        assert!(!tmp.path().join("documents/secret").exists());
    }

    #[test]
    fn absolute_read_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        let res = fs.read(StorageScope::Documents, "/etc/passwd");
        assert!(matches!(res, Err(FsError::SandboxViolation(_))));
    }

    #[test]
    fn caches_and_documents_are_disjoint() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        fs.write(StorageScope::Caches, "blob.bin", b"cached").unwrap();
        assert!(!fs.exists(StorageScope::Documents, "blob.bin").unwrap());
        assert!(fs.exists(StorageScope::Caches, "blob.bin").unwrap());
    }

    #[test]
    fn two_experiences_cannot_see_each_other() {
        let tmp = tempfile::tempdir().unwrap();
        let fs_a = hosted_fs(tmp.path(), "@owner/app-a");
        let fs_b = hosted_fs(tmp.path(), "@owner/app-b");
        fs_a.write(StorageScope::Documents, "private.txt", b"a only")
            .unwrap();
        assert!(!fs_b.exists(StorageScope::Documents, "private.txt").unwrap());
        assert!(matches!(
            fs_b.read(StorageScope::Documents, "private.txt"),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn list_and_info() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        fs.write(StorageScope::Documents, "dir/a.txt", b"a").unwrap();
        fs.write(StorageScope::Documents, "dir/b.txt", b"bb").unwrap();
        fs.make_directory(StorageScope::Documents, "dir/sub").unwrap();

        let entries = fs.list(StorageScope::Documents, "dir").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "sub"]);

        let info = fs.info(StorageScope::Documents, "dir/b.txt").unwrap();
        assert!(info.is_file);
        assert_eq!(info.size, 2);
    }

    #[test]
    fn delete_file_and_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        fs.write(StorageScope::Documents, "dir/a.txt", b"a").unwrap();

        fs.delete(StorageScope::Documents, "dir/a.txt").unwrap();
        assert!(!fs.exists(StorageScope::Documents, "dir/a.txt").unwrap());

        fs.delete(StorageScope::Documents, "dir").unwrap();
        assert!(!fs.exists(StorageScope::Documents, "dir").unwrap());

        assert!(matches!(
            fs.delete(StorageScope::Documents, "dir"),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn sandbox_root_is_protected() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        assert!(matches!(
            fs.delete(StorageScope::Documents, ""),
            Err(FsError::PermissionDenied(_))
        ));
        assert!(matches!(
            fs.write(StorageScope::Documents, ".", b"x"),
            Err(FsError::PermissionDenied(_))
        ));
    }

    #[test]
    fn copy_within_stays_in_scope() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = hosted_fs(tmp.path(), "@owner/app-a");
        fs.write(StorageScope::Documents, "a.txt", b"payload").unwrap();
        fs.copy_within(StorageScope::Documents, "a.txt", "backup/a.txt")
            .unwrap();
        assert_eq!(
            fs.read(StorageScope::Documents, "backup/a.txt").unwrap(),
            b"payload"
        );
        assert!(matches!(
            fs.copy_within(StorageScope::Documents, "a.txt", "../stolen.txt"),
            Err(FsError::SandboxViolation(_))
        ));
    }
}
