//! Recently opened files.

use std::path::{Path, PathBuf};

use crate::constants::MAX_RECENT_FILES;

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Most-recent-first list of opened paths, capped at a fixed size.
///
/// Entries are never pruned eagerly. [`RecentFiles::list_for`] filters out
/// the current file and vanished paths on every call instead, since files
/// can come and go between queries.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentFiles {
    paths: Vec<PathBuf>,
    max: usize,
}

impl RecentFiles {
    /// Empty list with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECENT_FILES)
    }

    /// Empty list holding at most `max` entries.
    pub fn with_capacity(max: usize) -> Self {
        Self {
            paths: Vec::new(),
            max,
        }
    }

    /// Restore a persisted list, keeping its order and the size cap.
    ///
    /// Entries are made absolute so they compare equal to recorded paths.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut recent = Self::new();
        for path in paths.into_iter().map(|p| absolute(&p)) {
            if recent.paths.len() == recent.max {
                break;
            }
            if !recent.paths.contains(&path) {
                recent.paths.push(path);
            }
        }
        recent
    }

    /// Move `path` to the front, dropping the oldest entry when full.
    pub fn record(&mut self, path: &Path) {
        let path = absolute(path);
        self.paths.retain(|p| *p != path);
        self.paths.insert(0, path);
        self.paths.truncate(self.max);
    }

    /// Entries to show while `current` is open: existing files other than `current`.
    pub fn list_for<'a>(
        &'a self,
        current: Option<&Path>,
    ) -> impl Iterator<Item = &'a Path> + use<'a> {
        let current = current.map(absolute);
        self.paths
            .iter()
            .map(PathBuf::as_path)
            .filter(move |p| Some(*p) != current.as_deref())
            .filter(|p| p.exists())
    }

    /// All recorded entries, unfiltered, for persistence.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new()
    }
}
