use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations.
///
/// History is a flat list of commits ordered newest-first; tags map names to
/// OIDs in that list. Range queries walk the list exactly like a revwalk
/// over a linear history would.
pub struct MockRepository {
    commits: Vec<(Oid, CommitInfo)>,
    tags: HashMap<String, Oid>,
    broken_tag_listing: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
            broken_tag_listing: false,
        }
    }

    /// Add a commit to the mock history. Call newest-first: the first
    /// commit added is HEAD.
    pub fn add_commit(&mut self, oid: Oid, info: CommitInfo) {
        self.commits.push((oid, info));
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    /// Make tag enumeration fail, simulating a missing repository
    pub fn break_tag_listing(&mut self) {
        self.broken_tag_listing = true;
    }

    fn position_of(&self, oid: Oid) -> Option<usize> {
        self.commits.iter().position(|(o, _)| *o == oid)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        if self.broken_tag_listing {
            return Err(ChangelogError::tag("tag enumeration failed"));
        }

        let mut names: Vec<String> = self.tags.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn tag_commit_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.get(tag_name).copied())
    }

    fn commit_date(&self, oid: Oid) -> Result<String> {
        self.commits
            .iter()
            .find(|(o, _)| *o == oid)
            .map(|(_, info)| info.date.clone())
            .ok_or_else(|| ChangelogError::tag(format!("Unknown commit: {}", oid)))
    }

    fn head_oid(&self) -> Result<Option<Oid>> {
        Ok(self.commits.first().map(|(oid, _)| *oid))
    }

    fn commits_in_range(&self, from: Option<Oid>, to: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let start = match to {
            Some(oid) => match self.position_of(oid) {
                Some(pos) => pos,
                None => return Ok(Vec::new()),
            },
            None => 0,
        };

        let mut result = Vec::new();
        for (oid, info) in &self.commits[start..] {
            if Some(*oid) == from {
                break;
            }
            result.push(info.clone());
        }

        Ok(result)
    }
}
