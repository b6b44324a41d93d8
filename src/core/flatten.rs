use crate::domain::model::{Bucket, FlattenReport, RoutedFile};
use crate::domain::ports::FileFinder;
use crate::utils::error::{OrganizerError, Result};
use crate::utils::validation::validate_identifier;
use std::fs;
use std::path::{Path, PathBuf};

pub const STAGING_PREFIX: &str = "temp";
pub const ROUTING_MARKERS: &[&str] = &["asset", "data", "item", "ecml"];

pub fn staging_dir(base_dir: &Path, identifier: &str) -> PathBuf {
    base_dir.join(format!("{}{}", STAGING_PREFIX, identifier))
}

pub fn destination_dir(base_dir: &Path, identifier: &str) -> PathBuf {
    base_dir.join(identifier)
}

/// 建立目的目錄與固定子目錄（assets, data, items），已存在則略過
pub fn prepare_destination(destination: &Path) -> Result<()> {
    fs::create_dir_all(destination)?;
    for bucket in [Bucket::Assets, Bucket::Data, Bucket::Items] {
        fs::create_dir_all(bucket.directory_in(destination))?;
    }
    Ok(())
}

/// 將 `temp<identifier>` 內符合 marker 的檔案攤平複製到 `<identifier>`，最後刪除暫存目錄。
///
/// 複製失敗時立即回傳錯誤，暫存目錄保留原狀。
pub fn flatten_content<F: FileFinder>(
    finder: &F,
    base_dir: &Path,
    identifier: &str,
) -> Result<FlattenReport> {
    validate_identifier("identifier", identifier)?;

    let staging = staging_dir(base_dir, identifier);
    if !staging.is_dir() {
        return Err(OrganizerError::StagingNotFound {
            path: staging.display().to_string(),
        });
    }

    let files = finder.find_containing(&staging, ROUTING_MARKERS)?;
    tracing::debug!(
        "Found {} file(s) to flatten under {}",
        files.len(),
        staging.display()
    );

    let destination = destination_dir(base_dir, identifier);
    prepare_destination(&destination)?;

    let mut routed = Vec::with_capacity(files.len());
    for source in files {
        let relative = source.strip_prefix(&staging).unwrap_or(source.as_path());
        let bucket = Bucket::route(&relative.to_string_lossy());

        let file_name = source
            .file_name()
            .ok_or_else(|| OrganizerError::ProcessingError {
                message: format!("'{}' has no file name", source.display()),
            })?;
        let target = bucket.directory_in(&destination).join(file_name);

        fs::copy(&source, &target).map_err(|e| OrganizerError::CopyError {
            from: source.display().to_string(),
            to: target.display().to_string(),
            source: e,
        })?;
        tracing::debug!("{} -> {:?}", relative.display(), bucket);

        routed.push(RoutedFile {
            source,
            target,
            bucket,
        });
    }

    fs::remove_dir_all(&staging)?;
    tracing::debug!("🧹 Removed staging directory {}", staging.display());

    Ok(FlattenReport {
        identifier: identifier.to_string(),
        destination,
        routed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::WalkdirFinder;
    use tempfile::TempDir;

    fn stage(base: &Path, identifier: &str, relative: &str, content: &str) {
        let path = staging_dir(base, identifier).join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_staging_and_destination_naming() {
        let base = Path::new("downloads");
        assert_eq!(staging_dir(base, "do_1"), base.join("tempdo_1"));
        assert_eq!(destination_dir(base, "do_1"), base.join("do_1"));
    }

    #[test]
    fn test_flatten_routes_by_marker() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        stage(base, "do_1", "content/assets/img/logo.png", "png");
        stage(base, "do_1", "content/widgets/data.json", "{}");
        stage(base, "do_1", "content/items/q1.json", "q1");
        stage(base, "do_1", "content/index.ecml", "<theme/>");
        stage(base, "do_1", "content/readme.txt", "ignored");

        let report = flatten_content(&WalkdirFinder::new(), base, "do_1").unwrap();

        let dest = base.join("do_1");
        assert_eq!(fs::read_to_string(dest.join("assets/logo.png")).unwrap(), "png");
        assert!(dest.join("data/data.json").exists());
        assert!(dest.join("items/q1.json").exists());
        assert!(dest.join("index.ecml").exists());
        assert!(!dest.join("readme.txt").exists());
        assert!(!staging_dir(base, "do_1").exists());

        assert_eq!(report.routed.len(), 4);
        assert_eq!(report.count(Bucket::Assets), 1);
        assert_eq!(report.count(Bucket::Root), 1);
    }

    #[test]
    fn test_asset_wins_over_data() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        stage(base, "x", "assets/data/file.txt", "both");

        flatten_content(&WalkdirFinder::new(), base, "x").unwrap();

        assert!(base.join("x/assets/file.txt").exists());
        assert!(!base.join("x/data/file.txt").exists());
    }

    #[test]
    fn test_empty_staging_still_creates_layout_and_is_removed() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir_all(staging_dir(base, "empty")).unwrap();

        let report = flatten_content(&WalkdirFinder::new(), base, "empty").unwrap();

        assert!(report.routed.is_empty());
        for sub in ["assets", "data", "items"] {
            assert!(base.join("empty").join(sub).is_dir());
        }
        assert!(!staging_dir(base, "empty").exists());
    }

    #[test]
    fn test_missing_staging_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();

        let result = flatten_content(&WalkdirFinder::new(), base, "ghost");

        assert!(matches!(result, Err(OrganizerError::StagingNotFound { .. })));
        assert!(!base.join("ghost").exists());
    }

    #[test]
    fn test_existing_destination_is_kept_and_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir_all(base.join("do_2/items")).unwrap();
        fs::write(base.join("do_2/items/q.json"), "old").unwrap();
        fs::write(base.join("do_2/keep.txt"), "keep").unwrap();
        stage(base, "do_2", "items/q.json", "new");

        flatten_content(&WalkdirFinder::new(), base, "do_2").unwrap();

        assert_eq!(fs::read_to_string(base.join("do_2/items/q.json")).unwrap(), "new");
        assert!(base.join("do_2/keep.txt").exists());
    }

    #[test]
    fn test_copy_failure_keeps_staging() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        stage(base, "x", "assets/logo.png", "png");
        // 目標位置已被目錄佔用，複製必定失敗
        fs::create_dir_all(base.join("x/assets/logo.png")).unwrap();

        let result = flatten_content(&WalkdirFinder::new(), base, "x");

        assert!(matches!(result, Err(OrganizerError::CopyError { .. })));
        assert!(staging_dir(base, "x").join("assets/logo.png").is_file());
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = flatten_content(&WalkdirFinder::new(), temp_dir.path(), "../escape");
        assert!(matches!(
            result,
            Err(OrganizerError::InvalidConfigValueError { .. })
        ));
    }
}
