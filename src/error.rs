//! Error type for client operations.

use thiserror::Error;

/// Error returned by `UrlClient` operations.
///
/// Invalid URLs are not errors at this level: each operation reports them
/// through its result shape (zero code, `None`, empty map) instead.
#[derive(Debug, Error)]
pub enum UrlError {
    /// Proxy use was requested but the configuration is missing host or port.
    /// Raised before any network activity.
    #[error("proxy settings are incomplete: host and port are both required")]
    IncompleteProxyConfig,

    /// The download output file could not be created or written.
    #[error("output file error: {0}")]
    Io(#[from] std::io::Error),

    /// libcurl reported a failure (option rejected, transfer aborted, etc.).
    #[error(transparent)]
    Transport(#[from] curl::Error),
}
