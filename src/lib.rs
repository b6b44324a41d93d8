pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::{ContentJob, TomlConfig};

pub use crate::adapters::WalkdirFinder;
pub use crate::core::{
    archive::expand_archives, engine::OrganizerEngine, flatten::flatten_content,
    manifest::write_manifest, pipeline::ContentPipeline,
};
pub use crate::domain::model::{Descriptor, ExpansionReport, FlattenReport, RunSummary};
pub use crate::utils::error::{OrganizerError, Result};
