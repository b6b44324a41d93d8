//! `walkdir` 實作的檔案搜尋器。

use crate::domain::ports::FileFinder;
use crate::utils::error::{OrganizerError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirFinder;

impl WalkdirFinder {
    pub fn new() -> Self {
        Self
    }

    fn walk_files<P>(&self, root: &Path, mut predicate: P) -> Result<Vec<PathBuf>>
    where
        P: FnMut(&Path) -> bool,
    {
        if !root.is_dir() {
            return Err(OrganizerError::DirectoryNotFound {
                path: root.display().to_string(),
            });
        }

        let mut found = Vec::new();
        // 依檔名排序，讓同名檔案覆蓋的順序固定
        let walker = WalkDir::new(root).sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if predicate(relative) {
                found.push(entry.into_path());
            }
        }

        Ok(found)
    }
}

impl FileFinder for WalkdirFinder {
    fn find_containing(&self, root: &Path, markers: &[&str]) -> Result<Vec<PathBuf>> {
        self.walk_files(root, |relative| {
            let relative = relative.to_string_lossy();
            markers.iter().any(|marker| relative.contains(marker))
        })
    }

    fn find_with_extension(&self, root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        self.walk_files(root, |relative| {
            let Some(name) = relative.file_name() else {
                return false;
            };
            let name = name.to_string_lossy().to_ascii_lowercase();
            extensions
                .iter()
                .any(|ext| name.ends_with(&format!(".{}", ext.to_ascii_lowercase())))
        })
    }
}
