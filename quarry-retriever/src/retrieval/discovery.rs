//! Glob-based file discovery under the project root.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Expands glob patterns under a project root into sets of regular files,
/// applying exclusion fragments.
///
/// Exclusion patterns are deliberately coarse: wildcard syntax is stripped
/// and the remainder is matched as a substring of the root-relative path.
/// `**/node_modules/**` therefore excludes any path containing
/// `node_modules/`.
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    root: PathBuf,
    exclude_fragments: Vec<String>,
}

impl FileDiscoverer {
    pub fn new(root: impl Into<PathBuf>, exclude_patterns: &[String]) -> Self {
        let exclude_fragments = exclude_patterns
            .iter()
            .map(|p| p.replace("**/", "").replace("**", "").replace('*', ""))
            // A pattern that strips down to nothing would exclude every file.
            .filter(|f| !f.is_empty())
            .collect();
        Self {
            root: root.into(),
            exclude_fragments,
        }
    }

    /// Expand `patterns` into the sorted set of matching regular files,
    /// minus exclusions. Zero matches is not an error.
    pub fn discover(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut found = BTreeSet::new();
        for pattern in patterns {
            let full_pattern = self.root.join(pattern);
            let entries = glob::glob(&full_pattern.to_string_lossy())
                .with_context(|| format!("invalid glob pattern '{pattern}'"))?;
            for entry in entries {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        warn!("Skipping unreadable glob match: {e}");
                        continue;
                    }
                };
                // Drops directories and dangling symlinks.
                if !path.is_file() {
                    continue;
                }
                if self.is_excluded(&path) {
                    continue;
                }
                found.insert(path);
            }
        }
        Ok(found.into_iter().collect())
    }

    /// Whether a path's root-relative form contains any exclusion fragment.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = relative.to_string_lossy();
        self.exclude_fragments
            .iter()
            .any(|fragment| relative.contains(fragment.as_str()))
    }
}
