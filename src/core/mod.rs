pub mod archive;
pub mod engine;
pub mod flatten;
pub mod manifest;
pub mod pipeline;

pub use crate::domain::model::{
    ArchiveFailure, Bucket, Descriptor, ExpansionReport, FailureKind, FlattenReport, RoutedFile,
    RunSummary,
};
pub use crate::domain::ports::{ConfigProvider, FileFinder, Pipeline};
pub use crate::utils::error::Result;
