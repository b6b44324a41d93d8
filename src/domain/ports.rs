use crate::domain::model::{ExpansionReport, FlattenReport};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 在目錄底下（遞迴）尋找檔案
pub trait FileFinder: Send + Sync {
    /// 相對於 `root` 的路徑含有任一 marker（區分大小寫）
    fn find_containing(&self, root: &Path, markers: &[&str]) -> Result<Vec<PathBuf>>;

    /// 檔名以 `.<ext>` 結尾（不分大小寫）
    fn find_with_extension(&self, root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_dir(&self) -> &str;
    fn identifier(&self) -> &str;
    fn expand_archives(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<ExpansionReport>;
    fn transform(&self) -> Result<FlattenReport>;
    fn load(&self, flattened: &FlattenReport) -> Result<PathBuf>;
}
