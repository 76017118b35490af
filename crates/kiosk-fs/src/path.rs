use crate::{FsError, FsResult};
use std::path::{Component, Path, PathBuf};

/// Lexically resolves a relative path against a sandbox root.
/// Returns an error if the relative path attempts to traverse `..` above the
/// root or is absolute. Does NOT touch the filesystem; purely computational.
///
/// # Errors
///
/// Returns [`FsError::SandboxViolation`] if `request_path` is absolute,
/// carries a prefix/root component, or traverses above `sandbox_root`.
pub fn resolve_sandboxed(sandbox_root: &Path, request_path: &str) -> FsResult<PathBuf> {
    let req = Path::new(request_path);

    if req.is_absolute() {
        return Err(FsError::SandboxViolation(
            "absolute paths are not allowed inside the sandbox".into(),
        ));
    }

    let mut resolved = sandbox_root.to_path_buf();

    for component in req.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(FsError::SandboxViolation(
                    "prefix or root components are not allowed".into(),
                ));
            },
            Component::CurDir => {}, // ignore `.`
            Component::ParentDir => {
                // Popping below the sandbox root is a traversal attack.
                if resolved == sandbox_root {
                    return Err(FsError::SandboxViolation(
                        "attempted to traverse above the sandbox root".into(),
                    ));
                }
                resolved.pop();
            },
            Component::Normal(p) => {
                resolved.push(p);
            },
        }
    }

    Ok(resolved)
}

/// Resolve a request path and additionally refuse symlinks along the
/// already-existing part of it, so a link planted inside the sandbox can
/// never redirect I/O outside it.
///
/// # Errors
///
/// Returns [`FsError::SandboxViolation`] on lexical escape or when any
/// existing component of the resolved path is a symlink that leaves the
/// sandbox root.
pub fn resolve_physical(sandbox_root: &Path, request_path: &str) -> FsResult<PathBuf> {
    let resolved = resolve_sandboxed(sandbox_root, request_path)?;

    let canonical_root = std::fs::canonicalize(sandbox_root)
        .unwrap_or_else(|_| sandbox_root.to_path_buf());

    let mut current = resolved.clone();
    let mut missing_tail = Vec::new();

    loop {
        if let Ok(meta) = std::fs::symlink_metadata(&current) {
            if meta.is_symlink() {
                tracing::warn!(path = %current.display(), "refused symlink inside sandbox");
                return Err(FsError::SandboxViolation(
                    "symlinks are forbidden within the sandbox".into(),
                ));
            }

            let canonical = std::fs::canonicalize(&current)?;
            if !canonical.starts_with(&canonical_root) {
                return Err(FsError::SandboxViolation(
                    "path resolves outside sandbox boundaries".into(),
                ));
            }

            // Re-append the not-yet-existing components onto the canonical
            // prefix so later creation cannot be redirected.
            let mut final_path = canonical;
            for comp in missing_tail.into_iter().rev() {
                final_path.push(comp);
            }
            return Ok(final_path);
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing_tail.push(name.to_owned());
                current = parent.to_path_buf();
            },
            _ => break,
        }
    }

    Ok(resolved)
}
