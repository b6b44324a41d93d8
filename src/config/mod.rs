#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_identifier, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "content-organizer")]
#[command(about = "Expand downloaded content archives and normalize their layout")]
pub struct CliConfig {
    #[arg(long, default_value = "./downloads")]
    pub base_dir: String,

    #[arg(long)]
    pub identifier: String,

    #[arg(long, help = "JSON file whose top-level object becomes manifest.json")]
    pub manifest: Option<String>,

    #[arg(long, value_name = "KEY=VALUE", help = "Extra manifest entry (repeatable)")]
    pub meta: Vec<String>,

    #[arg(long, help = "Do not expand archives found in the staging directory")]
    pub no_expand: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn expand_archives(&self) -> bool {
        !self.no_expand
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("base_dir", &self.base_dir)?;
        validate_identifier("identifier", &self.identifier)?;
        if let Some(manifest) = &self.manifest {
            validate_path("manifest", manifest)?;
        }
        for pair in &self.meta {
            cli::parse_meta_pair(pair)?;
        }
        Ok(())
    }
}
