use crate::core::archive::expand_archives;
use crate::core::flatten::{flatten_content, staging_dir};
use crate::core::manifest::write_manifest;
use crate::core::{ConfigProvider, Descriptor, ExpansionReport, FileFinder, FlattenReport, Pipeline};
use crate::utils::error::{OrganizerError, Result};
use crate::utils::validation::validate_identifier;
use std::path::{Path, PathBuf};

/// 單一內容的整理流程：展開壓縮檔 -> 攤平複製 -> 寫入 manifest
pub struct ContentPipeline<F: FileFinder, C: ConfigProvider> {
    pub(crate) finder: F,
    pub(crate) config: C,
    pub(crate) descriptor: Descriptor,
}

impl<F: FileFinder, C: ConfigProvider> ContentPipeline<F, C> {
    pub fn new(finder: F, config: C, descriptor: Descriptor) -> Self {
        Self {
            finder,
            config,
            descriptor,
        }
    }

    fn base_dir(&self) -> &Path {
        Path::new(self.config.base_dir())
    }
}

impl<F: FileFinder, C: ConfigProvider> Pipeline for ContentPipeline<F, C> {
    fn extract(&self) -> Result<ExpansionReport> {
        validate_identifier("identifier", self.config.identifier())?;
        let staging = staging_dir(self.base_dir(), self.config.identifier());
        if !staging.is_dir() {
            return Err(OrganizerError::StagingNotFound {
                path: staging.display().to_string(),
            });
        }

        if !self.config.expand_archives() {
            tracing::debug!("Archive expansion disabled, skipping {}", staging.display());
            return Ok(ExpansionReport::default());
        }

        expand_archives(&self.finder, &staging)
    }

    fn transform(&self) -> Result<FlattenReport> {
        flatten_content(&self.finder, self.base_dir(), self.config.identifier())
    }

    fn load(&self, flattened: &FlattenReport) -> Result<PathBuf> {
        write_manifest(&self.descriptor, &flattened.destination)
    }
}
