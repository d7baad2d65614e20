//! Tag resolution
//!
//! Turns raw tag names into validated, dated, hash-addressed version records.
//! Tags that do not parse as semantic versions are dropped with a warning;
//! failing to enumerate tags at all is treated as "no released versions yet".

use crate::boundary::BoundaryWarning;
use crate::git::Repository;
use semver::Version;

/// A validated release tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    /// Raw tag name as it appears in the repository (e.g., "v1.2.3")
    pub tag_name: String,
    /// Parsed semantic version with the leading "v" stripped
    pub version: Version,
    /// Full hash of the tagged commit
    pub commit_hash: String,
    /// Calendar date of the tagged commit, YYYY-MM-DD
    pub date: String,
}

/// Resolve all repository tags into version records, newest version first.
///
/// Enumeration failure and individually unresolvable tags degrade to an
/// empty/shorter result; the warnings describe what was skipped.
pub fn resolve_tags(repo: &dyn Repository) -> (Vec<VersionTag>, Vec<BoundaryWarning>) {
    let mut warnings = Vec::new();

    let names = match repo.list_tags() {
        Ok(names) => names,
        Err(_) => return (Vec::new(), warnings),
    };

    let mut tags = Vec::new();

    for name in names {
        let bare = name
            .strip_prefix('v')
            .or_else(|| name.strip_prefix('V'))
            .unwrap_or(&name);

        let version = match Version::parse(bare) {
            Ok(version) => version,
            Err(e) => {
                warnings.push(BoundaryWarning::UnparsableTag {
                    tag: name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let oid = match repo.tag_commit_oid(&name) {
            Ok(Some(oid)) => oid,
            _ => {
                warnings.push(BoundaryWarning::UnparsableTag {
                    tag: name.clone(),
                    reason: "cannot resolve tagged commit".to_string(),
                });
                continue;
            }
        };

        let date = match repo.commit_date(oid) {
            Ok(date) => date,
            Err(_) => {
                warnings.push(BoundaryWarning::UnparsableTag {
                    tag: name.clone(),
                    reason: "cannot resolve commit date".to_string(),
                });
                continue;
            }
        };

        tags.push(VersionTag {
            tag_name: name,
            version,
            commit_hash: oid.to_string(),
            date,
        });
    }

    // Descending semver precedence, not creation order
    tags.sort_by(|a, b| b.version.cmp(&a.version));

    (tags, warnings)
}
