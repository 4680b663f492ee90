//! On-disk snapshot written by whatever produces the digit stream
//!
//! ```json
//! { "frequencies": { "0": { "count": 5, "percentage": 50.0 } }, "current_digit": 0 }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{Digit, FrequencyEntry, FrequencyTable};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("digit {0} is out of range (expected 0-9)")]
    DigitOutOfRange(u8),
}

/// Wire shape before digit validation
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    frequencies: BTreeMap<u8, FrequencyEntry>,
    #[serde(default, alias = "currentDigit")]
    current_digit: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub frequencies: FrequencyTable,
    pub current_digit: Option<Digit>,
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(content)?;

        let frequencies = raw
            .frequencies
            .into_iter()
            .map(|(key, entry)| {
                Digit::try_from(key)
                    .map(|digit| (digit, entry))
                    .map_err(SnapshotError::DigitOutOfRange)
            })
            .collect::<Result<FrequencyTable, _>>()?;

        let current_digit = raw
            .current_digit
            .map(|n| Digit::try_from(n).map_err(SnapshotError::DigitOutOfRange))
            .transpose()?;

        Ok(Self {
            frequencies,
            current_digit,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_snapshot() {
        let json = r#"{
            "frequencies": {
                "0": { "count": 5, "percentage": 50.0 },
                "1": { "count": 2, "percentage": 20.0 },
                "9": { "count": 0, "percentage": 0.0 }
            },
            "current_digit": 1
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.frequencies.len(), 3);
        assert_eq!(snapshot.current_digit, Digit::new(1));
        assert_eq!(
            snapshot.frequencies.entry(Digit::new(0).unwrap()),
            FrequencyEntry::new(5, 50.0)
        );
    }

    #[test]
    fn accepts_camel_case_and_null_digit() {
        let snapshot =
            Snapshot::from_json(r#"{"frequencies": {}, "currentDigit": null}"#).unwrap();
        assert!(snapshot.frequencies.is_empty());
        assert_eq!(snapshot.current_digit, None);

        let snapshot = Snapshot::from_json(r#"{"currentDigit": 7}"#).unwrap();
        assert_eq!(snapshot.current_digit, Digit::new(7));
    }

    #[test]
    fn missing_fields_in_entry_default_to_zero() {
        let snapshot = Snapshot::from_json(r#"{"frequencies": {"4": {"count": 3}}}"#).unwrap();
        assert_eq!(
            snapshot.frequencies.entry(Digit::new(4).unwrap()),
            FrequencyEntry::new(3, 0.0)
        );
    }

    #[test]
    fn rejects_out_of_range_digits() {
        let err = Snapshot::from_json(r#"{"frequencies": {"12": {"count": 1, "percentage": 1.0}}}"#)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::DigitOutOfRange(12)));

        let err = Snapshot::from_json(r#"{"current_digit": 10}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::DigitOutOfRange(10)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Snapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn unvalidated_values_pass_through() {
        let snapshot =
            Snapshot::from_json(r#"{"frequencies": {"2": {"count": -3, "percentage": 250.0}}}"#)
                .unwrap();
        assert_eq!(
            snapshot.frequencies.entry(Digit::new(2).unwrap()),
            FrequencyEntry::new(-3, 250.0)
        );
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"frequencies": {{"3": {{"count": 1, "percentage": 100.0}}}}}}"#).unwrap();

        let snapshot = Snapshot::load(file.path()).await.unwrap();
        assert_eq!(snapshot.frequencies.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
