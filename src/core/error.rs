use thiserror::Error;

/// Errors raised by a [`Host`](crate::core::registry::Host) while serving registry queries
/// or lifecycle requests.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("plugin registry unavailable: {0}")]
    Unavailable(String),

    #[error("plugin '{0}' not found")]
    NotFound(String),

    #[error("plugin '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("lifecycle hook of plugin '{name}' failed: {source}")]
    Lifecycle {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Why a plugin descriptor was left out of the command index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing plugin name")]
    MissingName,

    #[error("missing module path")]
    MissingModulePath,

    #[error("instance is not a star")]
    NotAStar,
}
