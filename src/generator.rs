//! Pipeline orchestration
//!
//! Ties tag resolution, commit extraction, classification, and document
//! assembly into one run: (repository, configuration) -> document. The
//! pipeline itself is pure; only [Generator::run] touches the filesystem,
//! and the write is the single fatal step.

use crate::boundary::BoundaryWarning;
use crate::config::{Config, FALLBACK_VERSION};
use crate::conventional::{classify, ClassifiedCommit};
use crate::detect::find_new_commits;
use crate::document::{assemble_full, assemble_incremental, VersionSection};
use crate::error::Result;
use crate::git::Repository;
use crate::tags::{resolve_tags, VersionTag};
use git2::Oid;
use std::fs;

/// Assembly mode, selected once per run before any rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Regenerate the whole document from tag history
    Full,
    /// Splice new commits into an existing document
    Incremental,
}

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct BuildOutcome {
    pub document: String,
    pub mode: Mode,
    /// Commits that went into the (new) Unreleased section
    pub new_commit_count: usize,
    /// Released versions rendered (full mode only)
    pub version_count: usize,
    pub warnings: Vec<BoundaryWarning>,
}

/// Changelog generator bound to a repository and configuration.
pub struct Generator<'a> {
    repo: &'a dyn Repository,
    config: Config,
}

impl<'a> Generator<'a> {
    pub fn new(repo: &'a dyn Repository, config: Config) -> Self {
        Generator { repo, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the document in memory.
    ///
    /// `existing_document` is the current content of the output file, if
    /// any. Mode selection happens here, once: incremental when append is
    /// configured and an existing document is present, full otherwise.
    pub fn build(&self, existing_document: Option<&str>) -> BuildOutcome {
        let (tags, mut warnings) = resolve_tags(self.repo);

        if tags.is_empty() {
            warnings.push(BoundaryWarning::NoVersionTags {
                fallback_version: FALLBACK_VERSION.to_string(),
            });
        }

        let existing = existing_document.unwrap_or("");
        let incremental = self.config.append && !existing.trim().is_empty();

        if incremental {
            self.build_incremental(existing, &tags, warnings)
        } else {
            self.build_full(&tags, warnings)
        }
    }

    /// Build the document and persist it to the configured output file.
    ///
    /// The document is fully prepared in memory before a single write; a
    /// failed write leaves the prior file content untouched elsewhere and is
    /// the only error surfaced from a run.
    pub fn run(&self) -> Result<BuildOutcome> {
        let existing = fs::read_to_string(&self.config.output_file).ok();
        let outcome = self.build(existing.as_deref());

        fs::write(&self.config.output_file, &outcome.document)?;

        Ok(outcome)
    }

    fn build_full(&self, tags: &[VersionTag], warnings: Vec<BoundaryWarning>) -> BuildOutcome {
        let unreleased = if self.config.include_unreleased {
            let boundary = tags.first().and_then(|t| Oid::from_str(&t.commit_hash).ok());
            self.classified_range(boundary, None)
        } else {
            Vec::new()
        };

        let mut versions = Vec::new();
        for (i, tag) in tags.iter().enumerate() {
            let from = tags
                .get(i + 1)
                .and_then(|t| Oid::from_str(&t.commit_hash).ok());
            let to = Oid::from_str(&tag.commit_hash).ok();
            versions.push(VersionSection {
                tag: tag.clone(),
                commits: self.classified_range(from, to),
            });
        }

        let current_version = self.current_version(tags);
        let document = assemble_full(&unreleased, &versions, &current_version, &self.config);

        BuildOutcome {
            document,
            mode: Mode::Full,
            new_commit_count: unreleased.len(),
            version_count: versions.len(),
            warnings,
        }
    }

    fn build_incremental(
        &self,
        existing: &str,
        tags: &[VersionTag],
        mut warnings: Vec<BoundaryWarning>,
    ) -> BuildOutcome {
        if !self.config.include_unreleased {
            // Nothing to splice; leave the document as it stands
            return BuildOutcome {
                document: existing.to_string(),
                mode: Mode::Incremental,
                new_commit_count: 0,
                version_count: 0,
                warnings,
            };
        }

        let (new_commits, detect_warnings) = find_new_commits(self.repo, tags.first(), existing);
        warnings.extend(detect_warnings);

        let classified: Vec<ClassifiedCommit> = new_commits.into_iter().map(classify).collect();
        let document = assemble_incremental(existing, &classified, &self.config);

        BuildOutcome {
            document,
            mode: Mode::Incremental,
            new_commit_count: classified.len(),
            version_count: 0,
            warnings,
        }
    }

    fn classified_range(&self, from: Option<Oid>, to: Option<Oid>) -> Vec<ClassifiedCommit> {
        // Range-query failures fold into an empty section
        self.repo
            .commits_in_range(from, to)
            .unwrap_or_default()
            .into_iter()
            .map(classify)
            .collect()
    }

    fn current_version(&self, tags: &[VersionTag]) -> String {
        if let Some(version) = &self.config.latest_version {
            return version.clone();
        }
        tags.first()
            .map(|t| t.version.to_string())
            .unwrap_or_else(|| FALLBACK_VERSION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{CommitInfo, MockRepository};

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).unwrap()
    }

    fn commit(o: Oid, subject: &str, date: &str) -> CommitInfo {
        CommitInfo {
            hash: o.to_string(),
            subject: subject.to_string(),
            date: date.to_string(),
            author: "Jane Doe".to_string(),
        }
    }

    fn tagged_repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(2), commit(oid(2), "feat: add login", "2024-02-01"));
        repo.add_commit(oid(1), commit(oid(1), "feat: initial release", "2023-01-01"));
        repo.add_tag("v1.0.0", oid(1));
        repo
    }

    #[test]
    fn test_full_mode_selected_without_existing_document() {
        let repo = tagged_repo();
        let generator = Generator::new(&repo, Config::default());
        let outcome = generator.build(None);
        assert_eq!(outcome.mode, Mode::Full);
        assert_eq!(outcome.version_count, 1);
    }

    #[test]
    fn test_incremental_mode_selected_with_existing_document() {
        let repo = tagged_repo();
        let generator = Generator::new(&repo, Config::default());
        let outcome = generator.build(Some("# Changelog\n\n## [1.0.0] - 2023-01-01\n"));
        assert_eq!(outcome.mode, Mode::Incremental);
    }

    #[test]
    fn test_append_disabled_forces_full_mode() {
        let repo = tagged_repo();
        let config = Config {
            append: false,
            ..Config::default()
        };
        let generator = Generator::new(&repo, config);
        let outcome = generator.build(Some("# Changelog\n\n## [1.0.0] - 2023-01-01\n"));
        assert_eq!(outcome.mode, Mode::Full);
    }

    #[test]
    fn test_current_version_prefers_override() {
        let repo = tagged_repo();
        let config = Config {
            repo_url: Some("https://x/y".to_string()),
            latest_version: Some("9.9.9".to_string()),
            ..Config::default()
        };
        let generator = Generator::new(&repo, config);
        let outcome = generator.build(None);
        assert!(outcome
            .document
            .contains("[Unreleased]: https://x/y/compare/v9.9.9...HEAD"));
    }

    #[test]
    fn test_no_tags_warns_and_uses_fallback() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), commit(oid(1), "fix: null check", "2024-01-01"));

        let config = Config {
            repo_url: Some("https://x/y".to_string()),
            ..Config::default()
        };
        let generator = Generator::new(&repo, config);
        let outcome = generator.build(None);

        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, BoundaryWarning::NoVersionTags { .. })));
        assert!(outcome
            .document
            .contains("[Unreleased]: https://x/y/compare/v0.1.0...HEAD"));
    }

    #[test]
    fn test_unreleased_disabled_in_incremental_mode_is_noop() {
        let repo = tagged_repo();
        let config = Config {
            include_unreleased: false,
            ..Config::default()
        };
        let existing = "# Changelog\n\n## [1.0.0] - 2023-01-01\n";
        let generator = Generator::new(&repo, config);
        let outcome = generator.build(Some(existing));
        assert_eq!(outcome.document, existing);
    }
}
