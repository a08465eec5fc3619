//! Scenario fixture documents
//!
//! Fixtures are ephemeral input files a scenario writes before driving the
//! browser (e.g. an importable wishlist item dump). They are owned by the
//! scenario that creates them and deliberately left on disk afterward so a
//! failed run can be replayed by hand.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::HarnessResult;

/// One importable wishlist item, in the application's import format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

impl ImportRecord {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            category_id: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_category(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }
}

/// Write an import fixture as a JSON array, creating the directory first.
pub fn write_import_fixture(
    dir: &Path,
    name: &str,
    records: &[ImportRecord],
) -> HarnessResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), records = records.len(), "fixture written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let record = ImportRecord::new("imported-item-1", "Imported Item 1")
            .with_url("https://example.com/1")
            .with_category("some-cat");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "imported-item-1");
        assert_eq!(json["title"], "Imported Item 1");
        assert_eq!(json["url"], "https://example.com/1");
        assert_eq!(json["categoryId"], "some-cat");
        assert!(json["createdAt"].is_i64());
    }

    #[test]
    fn test_optional_fields_omitted() {
        let record = ImportRecord::new("imported-item-2", "Imported Item 2");
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("url").is_none());
        assert!(json.get("categoryId").is_none());
    }

    #[test]
    fn test_write_creates_directory_and_array() {
        let scratch = tempfile::tempdir().unwrap();
        let dir = scratch.path().join("nested").join("fixtures");
        let records = vec![
            ImportRecord::new("a", "A"),
            ImportRecord::new("b", "B").with_url("https://example.com/b"),
        ];

        let path = write_import_fixture(&dir, "import_test.json", &records).unwrap();
        let parsed: Vec<ImportRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "a");
        assert_eq!(parsed[1].url.as_deref(), Some("https://example.com/b"));
    }
}
