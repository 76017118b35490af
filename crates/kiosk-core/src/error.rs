use thiserror::Error;

/// Errors raised while validating experience identity inputs.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Empty or malformed experience identity string.
    #[error("invalid experience identity: {0}")]
    InvalidIdentity(String),

    /// Malformed manifest document.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

/// Convenience result type for identity operations.
pub type ScopeResult<T> = Result<T, ScopeError>;
