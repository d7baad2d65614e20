//! Document assembly
//!
//! Builds the full changelog document (preamble, Unreleased section, one
//! section per released version, comparison-links footer) and splices a
//! freshly rendered Unreleased block into an existing document without
//! touching the sections already there.
//!
//! For splicing, the existing text is parsed into a block structure: a
//! verbatim prefix (title block) followed by verbatim `## [` sections.
//! Insertion is then a structural operation at index 0 rather than string
//! offset arithmetic, and serialization rejoins the original bytes exactly.

use crate::config::Config;
use crate::conventional::ClassifiedCommit;
use crate::render::render_section;
use crate::tags::VersionTag;

/// Fixed Keep-a-Changelog attribution block at the top of every document.
pub const PREAMBLE: &str = "# Changelog\n\n\
All notable changes to this project will be documented in this file.\n\n\
The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),\n\
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n";

/// Marker that opens every version or Unreleased section.
const SECTION_MARKER: &str = "\n## [";

/// One released version with its classified commits, built once per tag.
#[derive(Debug, Clone)]
pub struct VersionSection {
    pub tag: VersionTag,
    pub commits: Vec<ClassifiedCommit>,
}

/// A changelog parsed into byte-preserving blocks.
///
/// `prefix` holds everything before the first section heading; each entry in
/// `sections` starts with `\n## [` and runs to the next heading (the last one
/// carries any trailing footer). `render` reproduces the input unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    prefix: String,
    sections: Vec<String>,
}

impl Document {
    /// Split a document's text at its section headings.
    pub fn parse(text: &str) -> Self {
        let mut boundaries: Vec<usize> = Vec::new();
        let mut search_from = 0;

        while let Some(pos) = text[search_from..].find(SECTION_MARKER) {
            boundaries.push(search_from + pos);
            search_from += pos + SECTION_MARKER.len();
        }

        match boundaries.first() {
            None => Document {
                prefix: text.to_string(),
                sections: Vec::new(),
            },
            Some(&first) => {
                let mut sections = Vec::new();
                for (i, &start) in boundaries.iter().enumerate() {
                    let end = boundaries.get(i + 1).copied().unwrap_or(text.len());
                    sections.push(text[start..end].to_string());
                }
                Document {
                    prefix: text[..first].to_string(),
                    sections,
                }
            }
        }
    }

    /// Insert a rendered section block before all existing sections.
    ///
    /// When the document has no section headings at all, the block is
    /// appended after the existing content instead.
    pub fn insert_front(&mut self, block: String) {
        self.sections.insert(0, block);
    }

    /// Serialize back to text; a freshly parsed document round-trips
    /// byte-identically.
    pub fn render(&self) -> String {
        let mut out = self.prefix.clone();
        for section in &self.sections {
            out.push_str(section);
        }
        out
    }
}

/// Render an Unreleased block ready for assembly or splicing.
pub fn unreleased_block(commits: &[ClassifiedCommit], config: &Config) -> String {
    let body = render_section(commits, config);
    if body.is_empty() {
        format!("{}Unreleased]\n", SECTION_MARKER)
    } else {
        format!("{}Unreleased]\n\n{}\n", SECTION_MARKER, body)
    }
}

/// Render one released-version block.
fn version_block(section: &VersionSection, config: &Config) -> String {
    let heading = format!(
        "{}{}] - {}",
        SECTION_MARKER, section.tag.version, section.tag.date
    );
    let body = render_section(&section.commits, config);
    if body.is_empty() {
        format!("{}\n", heading)
    } else {
        format!("{}\n\n{}\n", heading, body)
    }
}

/// Render the comparison-links footer.
///
/// One `[Unreleased]` line comparing the current version to HEAD, then one
/// line per version comparing it to the next-older tag, or to HEAD for the
/// oldest known version.
fn links_footer(versions: &[VersionSection], current_version: &str, repo_url: &str) -> String {
    let mut footer = String::from("\n");

    footer.push_str(&format!(
        "[Unreleased]: {}/compare/v{}...HEAD\n",
        repo_url, current_version
    ));

    for (i, section) in versions.iter().enumerate() {
        let prev_ref = match versions.get(i + 1) {
            Some(older) => format!("v{}", older.tag.version),
            None => "HEAD".to_string(),
        };
        footer.push_str(&format!(
            "[{}]: {}/compare/{}...v{}\n",
            section.tag.version, repo_url, prev_ref, section.tag.version
        ));
    }

    footer
}

/// Assemble a complete changelog document from scratch.
///
/// The Unreleased section appears only when enabled and non-empty; version
/// sections follow newest-first; the links footer is emitted only when a
/// repository URL is configured.
pub fn assemble_full(
    unreleased: &[ClassifiedCommit],
    versions: &[VersionSection],
    current_version: &str,
    config: &Config,
) -> String {
    let mut document = String::from(PREAMBLE);

    if config.include_unreleased && !unreleased.is_empty() {
        document.push_str(&unreleased_block(unreleased, config));
    }

    for section in versions {
        document.push_str(&version_block(section, config));
    }

    if let Some(repo_url) = config.repo_url.as_deref() {
        document.push_str(&links_footer(versions, current_version, repo_url));
    }

    document
}

/// Splice a new Unreleased block into an existing document.
///
/// The block lands immediately before the first existing section heading;
/// everything before and after is preserved verbatim. An empty new-commit
/// set returns the document unchanged.
pub fn assemble_incremental(
    existing_document: &str,
    new_commits: &[ClassifiedCommit],
    config: &Config,
) -> String {
    if new_commits.is_empty() {
        return existing_document.to_string();
    }

    // No prior document: emit a fresh one carrying only the new commits
    if existing_document.trim().is_empty() {
        let mut document = String::from(PREAMBLE);
        document.push_str(&unreleased_block(new_commits, config));
        return document;
    }

    let mut document = Document::parse(existing_document);
    document.insert_front(unreleased_block(new_commits, config));
    document.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventional::classify;
    use crate::git::CommitInfo;
    use semver::Version;

    fn classified(subject: &str) -> ClassifiedCommit {
        classify(CommitInfo {
            hash: "abcdef1234567890abcdef1234567890abcdef12".to_string(),
            subject: subject.to_string(),
            date: "2024-01-01".to_string(),
            author: "Jane Doe".to_string(),
        })
    }

    fn section(version: &str, date: &str, subjects: &[&str]) -> VersionSection {
        VersionSection {
            tag: VersionTag {
                tag_name: format!("v{}", version),
                version: Version::parse(version).unwrap(),
                commit_hash: "1111111111111111111111111111111111111111".to_string(),
                date: date.to_string(),
            },
            commits: subjects.iter().map(|s| classified(s)).collect(),
        }
    }

    fn no_url_config() -> Config {
        Config {
            repo_url: None,
            ..Config::default()
        }
    }

    #[test]
    fn test_parse_render_round_trip() {
        let text = "# Changelog\n\nintro\n\n## [Unreleased]\n\n- x\n\n## [1.0.0] - 2023-01-01\n\n- y\n\n[1.0.0]: link\n";
        assert_eq!(Document::parse(text).render(), text);
    }

    #[test]
    fn test_parse_no_sections() {
        let text = "# Changelog\n\njust a title block\n";
        let doc = Document::parse(text);
        assert_eq!(doc.render(), text);
    }

    #[test]
    fn test_full_document_structure() {
        let config = Config {
            repo_url: Some("https://x/y".to_string()),
            ..Config::default()
        };
        let versions = vec![section("1.0.0", "2023-01-01", &["feat: first release"])];
        let unreleased = vec![classified("feat: add login")];

        let doc = assemble_full(&unreleased, &versions, "1.0.0", &config);

        assert!(doc.starts_with("# Changelog\n"));
        assert!(doc.contains("\n## [Unreleased]\n"));
        assert!(doc.contains("### Added"));
        assert!(doc.contains("\n## [1.0.0] - 2023-01-01\n"));
        assert!(doc.contains("[Unreleased]: https://x/y/compare/v1.0.0...HEAD\n"));
        assert!(doc.contains("[1.0.0]: https://x/y/compare/HEAD...v1.0.0\n"));
    }

    #[test]
    fn test_footer_chains_versions() {
        let config = Config {
            repo_url: Some("https://x/y".to_string()),
            ..Config::default()
        };
        let versions = vec![
            section("2.0.0", "2024-01-01", &["feat: two"]),
            section("1.0.0", "2023-01-01", &["feat: one"]),
        ];

        let doc = assemble_full(&[], &versions, "2.0.0", &config);

        assert!(doc.contains("[2.0.0]: https://x/y/compare/v1.0.0...v2.0.0\n"));
        assert!(doc.contains("[1.0.0]: https://x/y/compare/HEAD...v1.0.0\n"));
    }

    #[test]
    fn test_no_footer_without_repo_url() {
        let versions = vec![section("1.0.0", "2023-01-01", &["feat: one"])];
        let doc = assemble_full(&[], &versions, "1.0.0", &no_url_config());
        assert!(!doc.contains("compare"));
    }

    #[test]
    fn test_unreleased_omitted_when_disabled() {
        let config = Config {
            include_unreleased: false,
            repo_url: None,
            ..Config::default()
        };
        let doc = assemble_full(&[classified("feat: x")], &[], "0.1.0", &config);
        assert!(!doc.contains("Unreleased"));
    }

    #[test]
    fn test_incremental_splices_before_first_section() {
        let existing = "# Changelog\n\nintro\n\n## [1.0.0] - 2023-01-01\n\n- y\n";
        let doc = assemble_incremental(existing, &[classified("feat: add login")], &no_url_config());

        let unreleased = doc.find("## [Unreleased]").unwrap();
        let version = doc.find("## [1.0.0]").unwrap();
        assert!(unreleased < version);

        // Bytes before the insertion point and the prior section are intact
        assert!(doc.starts_with("# Changelog\n\nintro\n"));
        assert!(doc.ends_with("## [1.0.0] - 2023-01-01\n\n- y\n"));
    }

    #[test]
    fn test_incremental_appends_when_no_headings() {
        let existing = "# Changelog\n\nno sections yet\n";
        let doc = assemble_incremental(existing, &[classified("feat: x")], &no_url_config());

        assert!(doc.starts_with(existing));
        assert!(doc.contains("## [Unreleased]"));
    }

    #[test]
    fn test_incremental_idempotent_with_no_new_commits() {
        let existing = "# Changelog\n\n## [Unreleased]\n\n- pending\n\n## [1.0.0] - 2023-01-01\n\n- y\n";
        let doc = assemble_incremental(existing, &[], &no_url_config());
        assert_eq!(doc, existing);

        let again = assemble_incremental(&doc, &[], &no_url_config());
        assert_eq!(again, existing);
    }

    #[test]
    fn test_incremental_from_empty_document() {
        let doc = assemble_incremental("", &[classified("feat: x")], &no_url_config());
        assert!(doc.starts_with("# Changelog\n"));
        assert!(doc.contains("## [Unreleased]"));
        assert_eq!(doc.matches("## [").count(), 1);
    }

    #[test]
    fn test_empty_version_section_renders_no_subsections() {
        let versions = vec![section("1.0.0", "2023-01-01", &[])];
        let doc = assemble_full(&[], &versions, "1.0.0", &no_url_config());

        assert!(doc.contains("## [1.0.0] - 2023-01-01\n"));
        assert!(!doc.contains("###"));
    }
}
