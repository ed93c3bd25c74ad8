//! Read interface to the external record store.
//!
//! The engine never fetches on its own: callers pull owned snapshots through a
//! [`RecordSource`] and pass slices to the matching and stats functions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DonorRecord, HistoryEntry, RequestRecord};

/// Record source errors.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Read-only access to donor, request and history records.
pub trait RecordSource {
    fn donors(&self) -> SourceResult<Vec<DonorRecord>>;
    fn requests(&self) -> SourceResult<Vec<RequestRecord>>;
    fn history(&self) -> SourceResult<Vec<HistoryEntry>>;
}

/// In-memory record set, loadable from a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub donors: Vec<DonorRecord>,
    pub requests: Vec<RequestRecord>,
    pub history: Vec<HistoryEntry>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            donors = snapshot.donors.len(),
            requests = snapshot.requests.len(),
            history = snapshot.history.len(),
            "loaded record snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json_str(content: &str) -> SourceResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pull a full snapshot from any source.
    pub fn capture<S: RecordSource + ?Sized>(source: &S) -> SourceResult<Self> {
        Ok(Self {
            donors: source.donors()?,
            requests: source.requests()?,
            history: source.history()?,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl RecordSource for Snapshot {
    fn donors(&self) -> SourceResult<Vec<DonorRecord>> {
        Ok(self.donors.clone())
    }

    fn requests(&self) -> SourceResult<Vec<RequestRecord>> {
        Ok(self.requests.clone())
    }

    fn history(&self) -> SourceResult<Vec<HistoryEntry>> {
        Ok(self.history.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodType;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "donors": [
            {"id": 1, "blood_type": "O-", "city": "Lahore", "age": 30, "eligible": true},
            {"id": 2, "blood_type": "A+", "city": "Karachi", "age": 22,
             "last_donation_date": "2024-02-10", "eligible": false}
        ],
        "requests": [
            {"id": 1, "blood_type": "A+", "city": "Lahore", "urgency": "critical"}
        ]
    }"#;

    struct Offline;

    impl RecordSource for Offline {
        fn donors(&self) -> SourceResult<Vec<DonorRecord>> {
            Err(SourceError::Unavailable("store offline".into()))
        }
        fn requests(&self) -> SourceResult<Vec<RequestRecord>> {
            Ok(Vec::new())
        }
        fn history(&self) -> SourceResult<Vec<HistoryEntry>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_parse_snapshot() {
        let snapshot = Snapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.donors.len(), 2);
        assert_eq!(snapshot.donors[0].blood_type, BloodType::ONegative);
        assert!(!snapshot.donors[1].eligible);
        assert_eq!(snapshot.requests.len(), 1);
        assert!(snapshot.history.is_empty()); // missing section defaults
    }

    #[test]
    fn test_unknown_blood_type_rejected_at_boundary() {
        let result = Snapshot::from_json_str(
            r#"{"donors": [{"id": 1, "blood_type": "Z+", "city": "Lahore", "age": 30}]}"#,
        );
        assert!(matches!(result, Err(SourceError::Json(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let snapshot = Snapshot::from_json_file(file.path()).unwrap();
        assert_eq!(snapshot.donors.len(), 2);
    }

    #[test]
    fn test_capture_round_trips_source() {
        let snapshot = Snapshot::from_json_str(SAMPLE).unwrap();
        let captured = Snapshot::capture(&snapshot).unwrap();
        assert_eq!(captured, snapshot);
    }

    #[test]
    fn test_capture_propagates_errors() {
        let result = Snapshot::capture(&Offline);
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
