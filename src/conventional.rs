//! Conventional-commit classification and composition
//!
//! Maps raw commit subjects onto the fixed Keep-a-Changelog taxonomy,
//! and builds well-formed conventional messages from their parts.
//! Classification is total: every commit lands in a category, worst case
//! in [Category::Other].

use crate::error::{ChangelogError, Result};
use crate::git::CommitInfo;
use regex::Regex;

/// Keep-a-Changelog change category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
    Other,
}

impl Category {
    /// Canonical rendering order for category subsections
    pub const ORDER: [Category; 7] = [
        Category::Added,
        Category::Changed,
        Category::Deprecated,
        Category::Removed,
        Category::Fixed,
        Category::Security,
        Category::Other,
    ];

    /// Subsection heading text
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Added => "Added",
            Category::Changed => "Changed",
            Category::Deprecated => "Deprecated",
            Category::Removed => "Removed",
            Category::Fixed => "Fixed",
            Category::Security => "Security",
            Category::Other => "Other",
        }
    }
}

/// Declarative mapping from conventional-commit type to category.
/// Types not listed here fall through to [Category::Other].
const TYPE_CATEGORIES: &[(&str, Category)] = &[
    ("feat", Category::Added),
    ("fix", Category::Fixed),
    ("perf", Category::Changed),
    ("refactor", Category::Changed),
    ("docs", Category::Changed),
    ("test", Category::Changed),
    ("build", Category::Changed),
    ("ci", Category::Changed),
    ("chore", Category::Changed),
    ("revert", Category::Removed),
];

fn category_for_type(commit_type: &str) -> Category {
    let lowered = commit_type.to_lowercase();
    TYPE_CATEGORIES
        .iter()
        .find(|(t, _)| *t == lowered)
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// A commit placed into its changelog category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub commit: CommitInfo,
    pub category: Category,
    /// Subject rewritten for display, with the scope surfaced as a bolded
    /// prefix when present
    pub display_message: String,
}

/// Classify a commit by its subject line.
///
/// Subjects matching `type(scope)?: description` with a known type get the
/// mapped category and a `**scope:** description` display message. Unknown
/// types and non-matching subjects go to [Category::Other] with the original
/// subject preserved verbatim.
pub fn classify(commit: CommitInfo) -> ClassifiedCommit {
    let parsed = Regex::new(r"(?i)^(\w+)(?:\(([^)]+)\))?:?\s?(.+)")
        .ok()
        .and_then(|re| {
            re.captures(&commit.subject).map(|captures| {
                let commit_type = captures
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                let scope = captures.get(2).map(|m| m.as_str().to_string());
                let description = captures
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                (commit_type, scope, description)
            })
        });

    match parsed {
        Some((commit_type, scope, description)) => {
            let category = category_for_type(&commit_type);

            // Commits outside the known taxonomy keep their subject as-is;
            // the "type" word is likely just the first word of a sentence
            if category == Category::Other {
                let display_message = commit.subject.clone();
                return ClassifiedCommit {
                    commit,
                    category,
                    display_message,
                };
            }

            let display_message = match scope {
                Some(scope) => format!("**{}:** {}", scope, description),
                None => description,
            };

            ClassifiedCommit {
                commit,
                category,
                display_message,
            }
        }
        None => {
            let display_message = commit.subject.clone();
            ClassifiedCommit {
                commit,
                category: Category::Other,
                display_message,
            }
        }
    }
}

/// Parts of a conventional commit message
#[derive(Debug, Clone, Default)]
pub struct MessageParts {
    pub commit_type: String,
    pub description: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub body: Option<String>,
    pub footer: Option<String>,
}

/// Build a conventional commit message from its parts.
///
/// The subject takes the form `type(scope)!: description`, with scope and
/// the breaking `!` marker optional. Body and footer become separate
/// paragraphs. A breaking change also gets a `BREAKING CHANGE:` paragraph,
/// placed before the footer when one is present. Type and description are
/// required; everything else is optional.
pub fn compose_message(parts: &MessageParts) -> Result<String> {
    if parts.commit_type.trim().is_empty() || parts.description.trim().is_empty() {
        return Err(ChangelogError::message(
            "both a type and a description are required",
        ));
    }

    let description = parts.description.trim();
    let mut message = parts.commit_type.trim().to_string();

    if let Some(scope) = &parts.scope {
        message.push_str(&format!("({})", scope.trim()));
    }
    if parts.breaking {
        message.push('!');
    }
    message.push_str(&format!(": {}", description));

    if let Some(body) = &parts.body {
        message.push_str(&format!("\n\n{}", body.trim()));
    }

    match (&parts.footer, parts.breaking) {
        (Some(footer), true) => {
            message.push_str(&format!(
                "\n\nBREAKING CHANGE: {}\n\n{}",
                description,
                footer.trim()
            ));
        }
        (Some(footer), false) => {
            message.push_str(&format!("\n\n{}", footer.trim()));
        }
        (None, true) => {
            message.push_str(&format!("\n\nBREAKING CHANGE: {}", description));
        }
        (None, false) => {}
    }

    Ok(message)
}
