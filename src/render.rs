//! Section rendering
//!
//! Serializes classified commits into the Markdown body of one changelog
//! section. Categories appear in canonical order; empty categories are
//! omitted entirely (no empty `### Added` headings).

use crate::config::Config;
use crate::conventional::{Category, ClassifiedCommit};

/// Render one commit as a list entry.
///
/// `- <message> ([<7-char-hash>](<repoUrl>/commit/<hash>)) - _<author>_`
/// The link is omitted without a repository URL; the author suffix is
/// omitted when no author is known.
pub fn format_commit_line(commit: &ClassifiedCommit, repo_url: Option<&str>) -> String {
    let mut line = format!("- {}", commit.display_message);

    if let Some(url) = repo_url {
        line.push_str(&format!(
            " ([{}]({}/commit/{}))",
            commit.commit.short_hash(),
            url,
            commit.commit.hash
        ));
    }

    if !commit.commit.author.is_empty() {
        line.push_str(&format!(" - _{}_", commit.commit.author));
    }

    line
}

/// Render the body of a section from its classified commits.
///
/// With `group_by_type` the commits are partitioned into `###` subsections
/// in [Category::ORDER], preserving extraction order (newest first) within
/// each. Without it, a flat list in extraction order. Returns an empty
/// string for an empty commit list.
pub fn render_section(commits: &[ClassifiedCommit], config: &Config) -> String {
    if commits.is_empty() {
        return String::new();
    }

    let repo_url = config.repo_url.as_deref();

    if !config.group_by_type {
        let lines: Vec<String> = commits
            .iter()
            .map(|c| format_commit_line(c, repo_url))
            .collect();
        return lines.join("\n");
    }

    let mut subsections = Vec::new();

    for category in Category::ORDER {
        if category == Category::Other && !config.include_other {
            continue;
        }

        let lines: Vec<String> = commits
            .iter()
            .filter(|c| c.category == category)
            .map(|c| format_commit_line(c, repo_url))
            .collect();

        if lines.is_empty() {
            continue;
        }

        subsections.push(format!("### {}\n\n{}", category.heading(), lines.join("\n")));
    }

    subsections.join("\n\n")
}
