use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, Repository};
use chrono::{DateTime, FixedOffset};
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

/// Format a git timestamp as a local calendar date, no time component.
fn format_date(time: git2::Time) -> String {
    let Some(utc) = DateTime::from_timestamp(time.seconds(), 0) else {
        return String::new();
    };

    match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => utc.with_timezone(&offset).format("%Y-%m-%d").to_string(),
        None => utc.format("%Y-%m-%d").to_string(),
    }
}

impl Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn tag_commit_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                // Annotated tags point at a tag object; peel to the commit
                let commit = reference.peel_to_commit().map_err(|e| {
                    ChangelogError::tag(format!("Cannot peel tag '{}': {}", tag_name, e))
                })?;

                Ok(Some(commit.id()))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(ChangelogError::tag(format!(
                "Cannot find tag '{}': {}",
                tag_name, e
            ))),
        }
    }

    fn commit_date(&self, oid: Oid) -> Result<String> {
        let commit = self.repo.find_commit(oid)?;

        Ok(format_date(commit.time()))
    }

    fn head_oid(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target()),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn commits_in_range(&self, from: Option<Oid>, to: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let top = match to {
            Some(oid) => Some(oid),
            None => self.head_oid()?,
        };

        // Nothing to walk in an empty repository
        let Some(top) = top else {
            return Ok(Vec::new());
        };

        let mut revwalk = self.repo.revwalk()?;

        // An unknown boundary is an empty range, not an error
        if revwalk.push(top).is_err() {
            return Ok(Vec::new());
        }

        // Hiding the ancestors of `from` keeps commits on merged side
        // branches that are older than the boundary but not reachable
        // from it, matching `git log from..to`
        if let Some(from) = from {
            if revwalk.hide(from).is_err() {
                return Ok(Vec::new());
            }
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let Ok(oid) = oid_result else {
                break;
            };

            let commit = self.repo.find_commit(oid)?;

            let subject = commit.summary().unwrap_or("(empty message)").to_string();

            let author = commit.author().name().unwrap_or("unknown").to_string();

            commits.push(CommitInfo {
                hash: oid.to_string(),
                subject,
                date: format_date(commit.time()),
                author,
            });
        }

        Ok(commits)
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send.
// The pipeline only performs read operations, which libgit2 handles
// thread-safely.
unsafe impl Sync for Git2Repository {}
