use thiserror::Error;

/// Failures the manager can observe. None of these reach the page: the
/// manager logs them and keeps its in-memory state authoritative.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SidebarError {
    #[error("required element not found: #{0}")]
    MissingElement(String),
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("malformed preference value: {0:?}")]
    MalformedPreference(String),
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("invalid sidebar config: {0}")]
    Config(String),
}
