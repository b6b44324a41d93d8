use crate::core::pipeline::ContentPipeline;
use crate::core::{ConfigProvider, Descriptor, FileFinder};
use crate::utils::error::{OrganizerError, Result};
use crate::utils::validation::{validate_identifier, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub organizer: OrganizerSection,
    pub monitoring: Option<MonitoringConfig>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerSection {
    pub base_dir: String,
    pub expand_archives: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub identifier: String,
    pub expand_archives: Option<bool>,
    pub manifest: Option<Descriptor>,
}

/// 批次中的單一工作，已套用全域預設值
#[derive(Debug, Clone, PartialEq)]
pub struct ContentJob {
    pub base_dir: String,
    pub identifier: String,
    pub expand_archives: bool,
    pub descriptor: Descriptor,
}

impl ContentJob {
    pub fn into_pipeline<F: FileFinder>(mut self, finder: F) -> ContentPipeline<F, ContentJob> {
        let descriptor = std::mem::take(&mut self.descriptor);
        ContentPipeline::new(finder, self, descriptor)
    }
}

impl ConfigProvider for ContentJob {
    fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn expand_archives(&self) -> bool {
        self.expand_archives
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OrganizerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OrganizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTENT_ROOT})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OrganizerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("organizer.base_dir", &self.organizer.base_dir)?;

        if self.content.is_empty() {
            return Err(OrganizerError::ConfigValidationError {
                field: "content".to_string(),
                message: "At least one [[content]] entry is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.content {
            validate_identifier("content.identifier", &entry.identifier)?;
            if !seen.insert(entry.identifier.as_str()) {
                return Err(OrganizerError::InvalidConfigValueError {
                    field: "content.identifier".to_string(),
                    value: entry.identifier.clone(),
                    reason: "Duplicate identifier".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn expand_archives(&self) -> bool {
        self.organizer.expand_archives.unwrap_or(true)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// 展開成實際要執行的工作清單（依檔案中的順序）
    pub fn jobs(&self) -> Vec<ContentJob> {
        self.content
            .iter()
            .map(|entry| ContentJob {
                base_dir: self.organizer.base_dir.clone(),
                identifier: entry.identifier.clone(),
                expand_archives: entry.expand_archives.unwrap_or_else(|| self.expand_archives()),
                descriptor: entry.manifest.clone().unwrap_or_default(),
            })
            .collect()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
