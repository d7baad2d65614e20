use thiserror::Error;

/// Unified error type for changelog generation
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Commit message error: {0}")]
    Message(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ChangelogError::Tag(msg.into())
    }

    /// Create a document error with context
    pub fn document(msg: impl Into<String>) -> Self {
        ChangelogError::Document(msg.into())
    }

    /// Create a commit message error with context
    pub fn message(msg: impl Into<String>) -> Self {
        ChangelogError::Message(msg.into())
    }
}
