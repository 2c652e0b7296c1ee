//! Keyword search over a single text file
//!
//! The engine knows nothing about the protocol layer: [`search_content`] is a
//! pure function of (content, keyword, case sensitivity), and [`Searcher`]
//! adds path resolution and the file read on top of it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A line that contains the keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// 1-based line number
    pub line_number: usize,
    /// Matched line with leading and trailing whitespace trimmed
    pub content: String,
}

/// Result of searching one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    /// Resolved absolute path of the searched file
    pub file_path: String,
    /// Keyword exactly as supplied
    pub keyword: String,
    /// Number of matches, always equal to `matches.len()`
    pub total_matches: usize,
    /// Matches in file order
    pub matches: Vec<MatchRecord>,
}

impl SearchReport {
    /// Build a report, deriving `total_matches` from `matches`
    pub fn new(file_path: impl Into<String>, keyword: impl Into<String>, matches: Vec<MatchRecord>) -> Self {
        Self {
            file_path: file_path.into(),
            keyword: keyword.into(),
            total_matches: matches.len(),
            matches,
        }
    }
}

/// Resolve `path` against `base` without touching the filesystem.
///
/// Absolute paths ignore `base`. `.` segments are dropped and `..` removes the
/// previous segment, stopping at the root.
pub fn resolve_path<P: AsRef<Path>>(base: &Path, path: P) -> PathBuf {
    let joined = base.join(path);
    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => resolved.push(part),
        }
    }

    resolved
}

/// Trim leading and trailing whitespace the way JavaScript's `String.trim`
/// does: the byte order mark counts as whitespace, U+0085 does not.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}'))
}

/// Find every line of `content` containing `keyword`.
///
/// Lines are split on `\n` only. Matching is plain substring containment, so
/// an empty keyword matches every line.
pub fn search_content(content: &str, keyword: &str, case_sensitive: bool) -> Vec<MatchRecord> {
    let needle = if case_sensitive {
        keyword.to_string()
    } else {
        keyword.to_lowercase()
    };

    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| {
            if case_sensitive {
                line.contains(&needle)
            } else {
                line.to_lowercase().contains(&needle)
            }
        })
        .map(|(index, line)| MatchRecord {
            line_number: index + 1,
            content: trim_line(line).to_string(),
        })
        .collect()
}

/// Searches files below a base directory
#[derive(Debug, Clone)]
pub struct Searcher {
    base_dir: PathBuf,
}

impl Searcher {
    /// Create a searcher resolving relative paths against `base_dir`
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory relative paths are resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Search `file_path` for `keyword`.
    ///
    /// Fails with [`Error::FileRead`] if the resolved file cannot be accessed
    /// or read. Invalid UTF-8 is replaced rather than rejected.
    pub async fn search(&self, file_path: &str, keyword: &str, case_sensitive: bool) -> Result<SearchReport> {
        let resolved = resolve_path(&self.base_dir, file_path);
        tracing::debug!("Searching {} for {:?}", resolved.display(), keyword);

        tokio::fs::metadata(&resolved)
            .await
            .map_err(|source| Error::FileRead {
                path: resolved.clone(),
                source,
            })?;

        let bytes = tokio::fs::read(&resolved)
            .await
            .map_err(|source| Error::FileRead {
                path: resolved.clone(),
                source,
            })?;
        let content = String::from_utf8_lossy(&bytes);

        let matches = search_content(&content, keyword, case_sensitive);
        tracing::debug!("Found {} matches in {}", matches.len(), resolved.display());

        Ok(SearchReport::new(
            resolved.to_string_lossy(),
            keyword,
            matches,
        ))
    }
}
