use thiserror::Error;

/// Filesystem sandbox errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Resolved path would escape the experience's sandbox root.
    #[error("path resolves outside sandbox boundaries: {0}")]
    SandboxViolation(String),

    /// Operation is not permitted even inside the sandbox.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Missing directory or file.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid experience identity input.
    #[error(transparent)]
    Identity(#[from] kiosk_core::ScopeError),

    /// Native IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for sandbox operations.
pub type FsResult<T> = Result<T, FsError>;
