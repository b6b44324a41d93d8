use crate::domain::model::{ArchiveFailure, ExpansionReport, FailureKind};
use crate::domain::ports::FileFinder;
use crate::utils::error::Result;
use std::fs;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// 展開 `directory` 底下所有壓縮檔，成功後刪除壓縮檔。
///
/// 單一壓縮檔失敗不會中斷流程，會被記錄在回傳的報告中並保留在原處。
/// 清單在展開前就取得，因此展開出來的壓縮檔不會再被處理；
/// 尚未處理或失敗的壓縮檔也不會被解壓出來的同名檔案覆蓋。
pub fn expand_archives<F: FileFinder>(finder: &F, directory: &Path) -> Result<ExpansionReport> {
    let archives = finder.find_with_extension(directory, ARCHIVE_EXTENSIONS)?;
    tracing::debug!(
        "Found {} archive(s) under {}",
        archives.len(),
        directory.display()
    );

    let mut report = ExpansionReport::default();
    // 成功展開並刪除後才移出保護清單
    let mut protected: HashSet<PathBuf> = archives.iter().cloned().collect();

    for archive in archives {
        let outcome = expand_archive(&archive, directory, &protected)
            .and_then(|entries| {
                fs::remove_file(&archive).map_err(|e| (FailureKind::from_io(&e), e.to_string()))?;
                Ok(entries)
            });

        match outcome {
            Ok(entries) => {
                tracing::debug!("📦 Expanded {} ({} files)", archive.display(), entries);
                protected.remove(&archive);
                report.expanded.push(archive);
            }
            Err((kind, message)) => {
                tracing::warn!(
                    "⚠️ Failed to expand {} ({:?}): {}",
                    archive.display(),
                    kind,
                    message
                );
                report.failed.push(ArchiveFailure {
                    path: archive,
                    kind,
                    message,
                });
            }
        }
    }

    Ok(report)
}

/// 將單一 zip 的所有項目解壓到 `destination`，回傳寫出的檔案數。
///
/// 輸出路徑落在 `protected` 內的項目會被略過。
pub fn expand_archive(
    archive_path: &Path,
    destination: &Path,
    protected: &HashSet<PathBuf>,
) -> std::result::Result<usize, (FailureKind, String)> {
    let io_failure = |e: io::Error| (FailureKind::from_io(&e), e.to_string());
    let zip_failure = |e: zip::result::ZipError| (FailureKind::from_zip(&e), e.to_string());

    let file = fs::File::open(archive_path).map_err(io_failure)?;
    let mut archive = zip::ZipArchive::new(file).map_err(zip_failure)?;

    let mut count = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_failure)?;

        // 略過絕對路徑或含 `..` 的項目
        let Some(entry_path) = entry.enclosed_name() else {
            tracing::warn!(
                "Skipping unsafe entry '{}' in {}",
                entry.name(),
                archive_path.display()
            );
            continue;
        };
        let output_path = destination.join(entry_path);
        if output_path == archive_path || protected.contains(&output_path) {
            tracing::warn!(
                "Skipping entry '{}' in {}: it would overwrite a pending archive",
                entry.name(),
                archive_path.display()
            );
            continue;
        }

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(io_failure)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(io_failure)?;
            }
            let mut outfile = fs::File::create(&output_path).map_err(io_failure)?;
            io::copy(&mut entry, &mut outfile).map_err(io_failure)?;
            count += 1;
        }
    }

    Ok(count)
}
