//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git queries the
//! changelog pipeline needs: tag enumeration, ref resolution, and revision
//! range walks. The abstraction keeps the pipeline a pure function of
//! (repository, configuration) and lets tests substitute canned history.
//!
//! The concrete implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// A single commit as reported by the underlying log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash
    pub hash: String,
    /// First line of the commit message
    pub subject: String,
    /// Commit date as YYYY-MM-DD
    pub date: String,
    /// Author display name
    pub author: String,
}

impl CommitInfo {
    /// Abbreviated hash used in rendered links
    pub fn short_hash(&self) -> &str {
        if self.hash.len() > 7 {
            &self.hash[..7]
        } else {
            &self.hash
        }
    }
}

/// Common git query trait for abstraction
///
/// All methods return [crate::error::Result<T>]. Implementations should map
/// underlying errors (like `git2::Error`) to [crate::error::ChangelogError]
/// variants, except where the contract below folds a failure into an empty
/// result.
pub trait Repository: Send + Sync {
    /// List all tag names in the repository, in no particular order.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Resolve a tag name to the commit it points to.
    ///
    /// Handles both lightweight and annotated tags by peeling to the
    /// underlying commit.
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Object ID of the tagged commit
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If there's a git error
    fn tag_commit_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Calendar date (local, YYYY-MM-DD) of the given commit.
    fn commit_date(&self, oid: Oid) -> Result<String>;

    /// OID of the current HEAD commit, or `None` on an unborn branch.
    fn head_oid(&self) -> Result<Option<Oid>>;

    /// Commits in the half-open range `(from, to]`, newest first.
    ///
    /// `to = None` means HEAD; `from = None` means the beginning of history.
    /// `from` itself is excluded, `to` is included. An invalid or empty range
    /// yields an empty vec rather than an error: absence of commits is a
    /// normal outcome.
    fn commits_in_range(&self, from: Option<Oid>, to: Option<Oid>) -> Result<Vec<CommitInfo>>;
}

/// Repository with no history at all.
///
/// Stands in when no git context can be discovered, so the pipeline still
/// produces a document with zero tags and zero commits instead of failing.
pub struct EmptyRepository;

impl Repository for EmptyRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn tag_commit_oid(&self, _tag_name: &str) -> Result<Option<Oid>> {
        Ok(None)
    }

    fn commit_date(&self, _oid: Oid) -> Result<String> {
        Ok(String::new())
    }

    fn head_oid(&self) -> Result<Option<Oid>> {
        Ok(None)
    }

    fn commits_in_range(&self, _from: Option<Oid>, _to: Option<Oid>) -> Result<Vec<CommitInfo>> {
        Ok(Vec::new())
    }
}
