use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::JobRecord;

/// Supplies the immutable source collection at startup.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<Vec<JobRecord>>;

    fn describe(&self) -> String;
}

/// Reads the bundled JSON array of postings from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<JobRecord>> {
        tracing::debug!("Reading dataset from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        parse_records(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records already held in memory, e.g. compiled into the binary or built by tests.
pub struct InMemorySource {
    records: Vec<JobRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetSource for InMemorySource {
    async fn load(&self) -> Result<Vec<JobRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }
}

/// Parses a JSON array of postings. Entries that are not objects are skipped
/// with a warning; a document that is not an array is a dataset error.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<JobRecord>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        other => {
            return Err(Error::Dataset(format!(
                "expected a JSON array of job records, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!("Skipping dataset entry {}: not an object", index);
            continue;
        }
        match serde_json::from_value::<JobRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping dataset entry {}: {}", index, e),
        }
    }

    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_records_skips_non_objects() {
        let raw = br#"[{"Job_Title": "Cloud Architect", "Salary_USD": 1}, 42, "x"]"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Cloud Architect");
    }

    #[test]
    fn test_parse_records_keeps_records_with_null_fields() {
        let raw = br#"[
            {"Job_Title": "SRE", "Location": "NY", "Salary_USD": 100000, "Date_Posted": null},
            {"Job_Title": "SRE", "Location": null, "Salary_USD": 120000, "Date_Posted": "2024-01-15"}
        ]"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].posted, "");
        assert_eq!(records[0].month_key(), None);
        assert_eq!(records[1].location, "");
        assert_eq!(records[1].month_key(), Some("2024-01".to_string()));
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(br#"{"Job_Title": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"Job_Title": "Cloud Architect", "Location": "NY", "Salary_USD": 150000, "Skills": "AWS,Terraform", "Date_Posted": "2024-01-15"}}]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "NY");
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("absent.json"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
