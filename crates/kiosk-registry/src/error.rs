use thiserror::Error;

/// Errors raised while constructing a scoped module registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Empty or malformed experience identity input.
    #[error(transparent)]
    InvalidIdentity(#[from] kiosk_core::ScopeError),

    /// Host params bag is not a JSON object.
    #[error("invalid registry params: {0}")]
    InvalidParams(String),

    /// Manifest's declared identity disagrees with the supplied keys.
    #[error("manifest mismatch: manifest declares {field} {declared:?}, caller supplied {supplied:?}")]
    ManifestMismatch {
        /// Which identity field disagreed.
        field: &'static str,
        /// Value the manifest declares.
        declared: String,
        /// Value the caller supplied.
        supplied: String,
    },

    /// A constituent scoped module failed to initialize; the whole
    /// registry-construction call fails, nothing partial is returned.
    #[error("scoped module construction failed: {0}")]
    Construction(#[from] kiosk_fs::FsError),
}

/// Convenience result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;
