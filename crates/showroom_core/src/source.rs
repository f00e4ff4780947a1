//! Record source boundary
//!
//! The gallery treats the record provider as an external collaborator:
//! one fetch per session returning the full collection, filtered
//! client-side. Implementations here cover in-memory data and a JSON
//! file; a network-backed provider plugs in behind the same trait.

use crate::gallery::MediaRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fetch failure, kept cloneable so the gallery can hold the last error
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),

    #[error("record data malformed: {0}")]
    Malformed(String),
}

/// External provider of the media record collection
pub trait RecordSource {
    fn fetch_records(&self) -> Result<Vec<MediaRecord>, FetchError>;
}

/// In-memory record source for tests and demos
pub struct StaticRecordSource {
    records: Vec<MediaRecord>,
}

impl StaticRecordSource {
    pub fn new(records: Vec<MediaRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticRecordSource {
    fn fetch_records(&self) -> Result<Vec<MediaRecord>, FetchError> {
        Ok(self.records.clone())
    }
}

/// Record source reading a JSON array of records from disk
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSource for JsonRecordSource {
    fn fetch_records(&self) -> Result<Vec<MediaRecord>, FetchError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| FetchError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        let records: Vec<MediaRecord> =
            serde_json::from_str(&content).map_err(|e| FetchError::Malformed(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "records read");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::RecordId;

    #[test]
    fn test_static_source_round_trip() {
        let source = StaticRecordSource::new(vec![MediaRecord {
            id: RecordId("r1".to_string()),
            title: "Project r1".to_string(),
            room: "Kitchen".to_string(),
            style: "Modern".to_string(),
            image: "assets/records/r1.avif".to_string(),
            extra_images: vec![],
        }]);
        let records = source.fetch_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].room, "Kitchen");
    }

    #[test]
    fn test_json_source_missing_file_is_unavailable() {
        let source = JsonRecordSource::new("/nonexistent/records.json");
        assert!(matches!(
            source.fetch_records(),
            Err(FetchError::Unavailable(_))
        ));
    }

    #[test]
    fn test_json_source_parses_records() {
        let dir = std::env::temp_dir().join("showroom_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("records.json");
        std::fs::write(
            &path,
            r#"[{"id":"r1","title":"Project r1","room":"Bath","style":"Modern","image":"assets/r1.avif"}]"#,
        )
        .unwrap();

        let records = JsonRecordSource::new(&path).fetch_records().unwrap();
        assert_eq!(records[0].id, RecordId("r1".to_string()));
        assert!(records[0].extra_images.is_empty());
    }

    #[test]
    fn test_json_source_bad_payload_is_malformed() {
        let dir = std::env::temp_dir().join("showroom_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonRecordSource::new(&path).fetch_records(),
            Err(FetchError::Malformed(_))
        ));
    }
}
