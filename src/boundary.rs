use std::fmt;

/// Warnings that occur while resolving tags and detecting new commits.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No valid version tags exist; the fallback version will be used
    NoVersionTags { fallback_version: String },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// No new commits since the last recorded boundary
    NoNewCommits { boundary: String },
    /// Existing document carries no commit links; detection fell back to a tag
    NoCommitReference { fallback_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionTags { fallback_version } => {
                write!(
                    f,
                    "No semantic-version tags found; using fallback version '{}'",
                    fallback_version
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Skipping tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoNewCommits { boundary } => {
                // Only shorten actual commit hashes; a descriptive
                // boundary like "start of history" is shown verbatim
                let is_hash =
                    boundary.len() >= 7 && boundary.chars().all(|c| c.is_ascii_hexdigit());
                let shown = if is_hash && boundary.len() > 7 {
                    &boundary[..7]
                } else {
                    boundary.as_str()
                };
                write!(f, "No new commits since '{}'", shown)
            }
            BoundaryWarning::NoCommitReference { fallback_tag } => {
                write!(
                    f,
                    "No commit reference found in existing document; using tag '{}' as boundary",
                    fallback_tag
                )
            }
        }
    }
}
