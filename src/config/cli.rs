use crate::config::CliConfig;
use crate::core::Descriptor;
use crate::utils::error::{OrganizerError, Result};
use serde_json::Value;
use std::path::Path;

/// 解析 `key=value`；value 若是合法 JSON 就照 JSON 解讀，否則當字串
pub fn parse_meta_pair(pair: &str) -> Result<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| OrganizerError::InvalidConfigValueError {
            field: "meta".to_string(),
            value: pair.to_string(),
            reason: "Expected KEY=VALUE".to_string(),
        })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(OrganizerError::InvalidConfigValueError {
            field: "meta".to_string(),
            value: pair.to_string(),
            reason: "Key cannot be empty".to_string(),
        });
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// 讀取 JSON 檔，最外層必須是物件
pub fn load_descriptor_file<P: AsRef<Path>>(path: P) -> Result<Descriptor> {
    let content = std::fs::read_to_string(&path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(OrganizerError::ConfigValidationError {
            field: "manifest".to_string(),
            message: format!(
                "'{}' must contain a JSON object, found {}",
                path.as_ref().display(),
                json_type_name(&other)
            ),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl CliConfig {
    /// `--manifest` 檔案內容為底，再套用 `--meta`（後者覆蓋前者）
    pub fn load_descriptor(&self) -> Result<Descriptor> {
        let mut descriptor = match &self.manifest {
            Some(path) => load_descriptor_file(path)?,
            None => Descriptor::new(),
        };

        for pair in &self.meta {
            let (key, value) = parse_meta_pair(pair)?;
            descriptor.insert(key, value);
        }

        Ok(descriptor)
    }
}
