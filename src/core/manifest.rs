use crate::domain::model::Descriptor;
use crate::utils::error::{OrganizerError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";
const INDENT: &[u8] = b"    ";

/// 巢狀物件的 key 也要排序；serde_json 開啟 preserve_order 時 Map 會保留插入順序
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key.clone(), sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// 以排序過的 key、四格縮排輸出 UTF-8 JSON（結尾不加換行）
pub fn render_manifest(descriptor: &Descriptor) -> Result<Vec<u8>> {
    let sorted: Descriptor = descriptor
        .iter()
        .map(|(key, value)| (key.clone(), sort_keys(value)))
        .collect();

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    sorted.serialize(&mut serializer)?;
    Ok(buffer)
}

pub fn write_manifest(descriptor: &Descriptor, directory: &Path) -> Result<PathBuf> {
    if !directory.is_dir() {
        return Err(OrganizerError::DirectoryNotFound {
            path: directory.display().to_string(),
        });
    }

    let path = directory.join(MANIFEST_FILE_NAME);
    let bytes = render_manifest(descriptor)?;
    fs::write(&path, &bytes)?;
    tracing::debug!("📝 Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn descriptor(value: Value) -> Descriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_render_sorted_with_four_space_indent() {
        let rendered = render_manifest(&descriptor(json!({"b": 1, "a": 2}))).unwrap();
        assert_eq!(
            String::from_utf8(rendered).unwrap(),
            "{\n    \"a\": 2,\n    \"b\": 1\n}"
        );
    }

    #[test]
    fn test_nested_objects_are_sorted() {
        let rendered = render_manifest(&descriptor(json!({
            "meta": {"zeta": true, "alpha": [{"y": 1, "x": 2}]}
        })))
        .unwrap();
        let text = String::from_utf8(rendered).unwrap();

        assert!(text.find("\"alpha\"").unwrap() < text.find("\"zeta\"").unwrap());
        assert!(text.find("\"x\"").unwrap() < text.find("\"y\"").unwrap());
    }

    #[test]
    fn test_empty_descriptor() {
        let rendered = render_manifest(&Descriptor::new()).unwrap();
        assert_eq!(rendered, b"{}");
    }

    #[test]
    fn test_non_ascii_is_written_as_utf8() {
        let rendered = render_manifest(&descriptor(json!({"name": "कहानी"}))).unwrap();
        assert!(String::from_utf8(rendered).unwrap().contains("कहानी"));
    }

    #[test]
    fn test_write_manifest_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(MANIFEST_FILE_NAME), "stale").unwrap();

        let path = write_manifest(&descriptor(json!({"id": "do_1"})), temp_dir.path()).unwrap();

        assert_eq!(path, temp_dir.path().join(MANIFEST_FILE_NAME));
        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({"id": "do_1"}));
    }

    #[test]
    fn test_write_manifest_requires_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = write_manifest(&Descriptor::new(), &temp_dir.path().join("missing"));
        assert!(matches!(result, Err(OrganizerError::DirectoryNotFound { .. })));
    }
}
