//! Change detection for incremental runs
//!
//! Determines which commits are new relative to the last run. The boundary
//! is the most recently recorded commit link in the existing document;
//! documents are newest-first, so the first link found is the most recent
//! entry. Without commit links (no repository URL was ever configured) the
//! latest tag is the explicit source of truth, and without either the whole
//! history counts as new.

use crate::boundary::BoundaryWarning;
use crate::git::{CommitInfo, Repository};
use crate::tags::VersionTag;
use git2::Oid;
use regex::Regex;

/// Extract the most recent commit hash recorded in a rendered document.
///
/// Matches the link form `[shortHash](.../commit/fullHash)` produced by the
/// renderer and returns the full hash from the first occurrence.
pub fn last_recorded_hash(document: &str) -> Option<String> {
    Regex::new(r"\[[0-9a-fA-F]{7,40}\]\([^()\s]*/commit/([0-9a-fA-F]{7,40})\)")
        .ok()?
        .captures(document)
        .map(|captures| captures[1].to_string())
}

/// Find the commits not yet recorded in the existing document.
///
/// Falls back from document scan to latest tag to unbounded history, per
/// boundary availability. Range-query failures fold into an empty result;
/// the warnings report which fallback was taken.
pub fn find_new_commits(
    repo: &dyn Repository,
    latest_tag: Option<&VersionTag>,
    existing_document: &str,
) -> (Vec<CommitInfo>, Vec<BoundaryWarning>) {
    let mut warnings = Vec::new();

    let boundary = if existing_document.trim().is_empty() {
        None
    } else {
        match last_recorded_hash(existing_document).and_then(|h| Oid::from_str(&h).ok()) {
            Some(oid) => Some(oid),
            None => match latest_tag {
                Some(tag) => {
                    warnings.push(BoundaryWarning::NoCommitReference {
                        fallback_tag: tag.tag_name.clone(),
                    });
                    Oid::from_str(&tag.commit_hash).ok()
                }
                None => None,
            },
        }
    };

    let commits = repo.commits_in_range(boundary, None).unwrap_or_default();

    if commits.is_empty() {
        let described = boundary
            .map(|oid| oid.to_string())
            .unwrap_or_else(|| "start of history".to_string());
        warnings.push(BoundaryWarning::NoNewCommits {
            boundary: described,
        });
    }

    (commits, warnings)
}
