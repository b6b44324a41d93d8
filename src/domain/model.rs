use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 寫入 manifest.json 的內容描述
pub type Descriptor = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Corrupt,
    Unsupported,
    PermissionDenied,
    Io,
}

impl FailureKind {
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            // zip 讀到截斷的檔案時會回報 UnexpectedEof / InvalidData
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::InvalidData => {
                FailureKind::Corrupt
            }
            _ => FailureKind::Io,
        }
    }

    pub fn from_zip(err: &zip::result::ZipError) -> Self {
        use zip::result::ZipError;
        match err {
            ZipError::Io(io) => Self::from_io(io),
            ZipError::UnsupportedArchive(_) => FailureKind::Unsupported,
            _ => FailureKind::Corrupt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub expanded: Vec<PathBuf>,
    pub failed: Vec<ArchiveFailure>,
}

impl ExpansionReport {
    pub fn failed_paths(&self) -> Vec<&Path> {
        self.failed.iter().map(|f| f.path.as_path()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 攤平後檔案的目的地
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Assets,
    Data,
    Items,
    Root,
}

impl Bucket {
    /// 依序比對 asset > data > item，第一個命中者勝出；其餘（含 ecml）放在根目錄
    pub fn route(relative_path: &str) -> Self {
        if relative_path.contains("asset") {
            Bucket::Assets
        } else if relative_path.contains("data") {
            Bucket::Data
        } else if relative_path.contains("item") {
            Bucket::Items
        } else {
            Bucket::Root
        }
    }

    pub fn subdirectory(&self) -> Option<&'static str> {
        match self {
            Bucket::Assets => Some("assets"),
            Bucket::Data => Some("data"),
            Bucket::Items => Some("items"),
            Bucket::Root => None,
        }
    }

    pub fn directory_in(&self, destination: &Path) -> PathBuf {
        match self.subdirectory() {
            Some(sub) => destination.join(sub),
            None => destination.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedFile {
    pub source: PathBuf,
    pub target: PathBuf,
    pub bucket: Bucket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenReport {
    pub identifier: String,
    pub destination: PathBuf,
    pub routed: Vec<RoutedFile>,
}

impl FlattenReport {
    pub fn count(&self, bucket: Bucket) -> usize {
        self.routed.iter().filter(|f| f.bucket == bucket).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub identifier: String,
    pub expansion: ExpansionReport,
    pub flattened: FlattenReport,
    pub manifest_path: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_route_priority() {
        assert_eq!(Bucket::route("assets/data/file.txt"), Bucket::Assets);
        assert_eq!(Bucket::route("data/items/list.json"), Bucket::Data);
        assert_eq!(Bucket::route("items/q1.json"), Bucket::Items);
        assert_eq!(Bucket::route("index.ecml"), Bucket::Root);
        assert_eq!(Bucket::route("readme.txt"), Bucket::Root);
    }

    #[test]
    fn test_bucket_route_is_case_sensitive() {
        assert_eq!(Bucket::route("Assets/logo.png"), Bucket::Root);
        assert_eq!(Bucket::route("DATA/x.json"), Bucket::Root);
    }

    #[test]
    fn test_bucket_directory_in() {
        let dest = Path::new("out/do_1");
        assert_eq!(Bucket::Assets.directory_in(dest), dest.join("assets"));
        assert_eq!(Bucket::Root.directory_in(dest), dest.to_path_buf());
    }

    #[test]
    fn test_failure_kind_from_io() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert_eq!(FailureKind::from_io(&denied), FailureKind::PermissionDenied);
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        assert_eq!(FailureKind::from_io(&eof), FailureKind::Corrupt);
        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(FailureKind::from_io(&other), FailureKind::Io);
    }

    #[test]
    fn test_expansion_report_failed_paths() {
        let report = ExpansionReport {
            expanded: vec![PathBuf::from("a.zip")],
            failed: vec![ArchiveFailure {
                path: PathBuf::from("b.zip"),
                kind: FailureKind::Corrupt,
                message: "invalid".to_string(),
            }],
        };
        assert!(!report.is_clean());
        assert_eq!(report.failed_paths(), vec![Path::new("b.zip")]);
    }
}
