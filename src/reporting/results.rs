//! Result files
//!
//! Writes the final partition as `good.json` and `error.json`: JSON arrays
//! of the original book source records, pretty-printed with two-space
//! indentation and with non-ASCII text left as is.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::output_files;
use crate::core::error::{BookCheckError, Result};
use crate::core::types::{Entry, Partition};

/// Locations of the two files written for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFiles {
    pub good: PathBuf,
    pub error: PathBuf,
}

/// Write both halves of `partition` into `dir`, creating it if needed.
pub fn write_partition(partition: &Partition, dir: &Path) -> Result<ResultFiles> {
    fs::create_dir_all(dir).map_err(|e| {
        BookCheckError::Output(format!(
            "Could not create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let files = ResultFiles {
        good: dir.join(output_files::GOOD),
        error: dir.join(output_files::ERROR),
    };

    write_entries(&partition.good, &files.good)?;
    write_entries(&partition.error, &files.error)?;

    Ok(files)
}

fn write_entries(entries: &[Entry], path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(entries)?;
    fs::write(path, content).map_err(|e| {
        BookCheckError::Output(format!("Could not write '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn entry(value: Value) -> Entry {
        serde_json::from_value(value).expect("entry should deserialize")
    }

    #[test]
    fn test_write_partition() -> TestResult {
        let dir = tempfile::tempdir()?;
        let partition = Partition {
            good: vec![entry(json!({"bookSourceName": "好书", "bookSourceUrl": "https://ok.test"}))],
            error: vec![entry(json!({"bookSourceName": "坏书", "bookSourceUrl": "https://down.test"}))],
            passes: 5,
        };

        let files = write_partition(&partition, dir.path())?;

        assert_eq!(files.good, dir.path().join("good.json"));
        assert_eq!(files.error, dir.path().join("error.json"));

        let good = fs::read_to_string(&files.good)?;
        assert!(good.contains("好书"), "non-ASCII must not be escaped: {good}");
        assert!(good.starts_with("[\n  {\n    \"bookSourceName\""));

        let error: Vec<Entry> = serde_json::from_str(&fs::read_to_string(&files.error)?)?;
        assert_eq!(error, partition.error);
        Ok(())
    }

    #[test]
    fn test_write_partition_creates_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("reports").join("today");

        let files = write_partition(&Partition::default(), &nested)?;

        assert!(nested.is_dir());
        assert_eq!(fs::read_to_string(&files.good)?, "[]");
        assert_eq!(fs::read_to_string(&files.error)?, "[]");
        Ok(())
    }

    #[test]
    fn test_write_partition_keeps_record_fields() -> TestResult {
        let dir = tempfile::tempdir()?;
        let raw = entry(json!({
            "bookSourceUrl": "https://ok.test",
            "bookSourceGroup": "小说",
            "ruleSearch": {"bookList": ".list li", "name": "a@text"},
            "weight": 0
        }));
        let partition = Partition {
            good: vec![raw.clone(), raw.clone()],
            error: vec![],
            passes: 1,
        };

        let files = write_partition(&partition, dir.path())?;

        let written: Vec<Entry> = serde_json::from_str(&fs::read_to_string(&files.good)?)?;
        assert_eq!(written, vec![raw.clone(), raw]);
        Ok(())
    }

    #[test]
    fn test_write_partition_into_file_fails() -> TestResult {
        let file = tempfile::NamedTempFile::new()?;

        let err = write_partition(&Partition::default(), file.path()).unwrap_err();

        assert!(matches!(err, BookCheckError::Output(_)));
        Ok(())
    }
}
