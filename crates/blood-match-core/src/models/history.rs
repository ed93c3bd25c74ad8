//! Donation history models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::blood_type::BloodType;

/// Kind of history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// User gave blood
    Donation,
    /// User received blood
    Received,
}

/// Label could not be read as an entry type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown history entry type: {0:?}")]
pub struct ParseEntryTypeError(pub String);

impl FromStr for EntryType {
    type Err = ParseEntryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "donation" => Ok(EntryType::Donation),
            "received" => Ok(EntryType::Received),
            _ => Err(ParseEntryTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Donation => f.write_str("donation"),
            EntryType::Received => f.write_str("received"),
        }
    }
}

/// An append-only history log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Entry ID
    pub id: u64,
    /// Owning user
    pub user_id: u64,
    /// Owner's display name, when the store resolves it
    #[serde(default)]
    pub user_name: Option<String>,
    /// Donation or receipt
    pub entry_type: EntryType,
    /// Date of the event
    pub date: NaiveDate,
    /// Hospital or location
    pub hospital: String,
    /// Blood group involved
    pub blood_type: BloodType,
    /// Units (at least 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl HistoryEntry {
    /// Create a single-unit donation entry.
    pub fn donation(
        id: u64,
        user_id: u64,
        date: NaiveDate,
        hospital: impl Into<String>,
        blood_type: BloodType,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name: None,
            entry_type: EntryType::Donation,
            date,
            hospital: hospital.into(),
            blood_type,
            quantity: 1,
        }
    }

    /// Create a single-unit receipt entry.
    pub fn received(
        id: u64,
        user_id: u64,
        date: NaiveDate,
        hospital: impl Into<String>,
        blood_type: BloodType,
    ) -> Self {
        Self {
            entry_type: EntryType::Received,
            ..Self::donation(id, user_id, date, hospital, blood_type)
        }
    }

    pub fn is_donation(&self) -> bool {
        self.entry_type == EntryType::Donation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_parse() {
        assert_eq!("donation".parse::<EntryType>().unwrap(), EntryType::Donation);
        assert_eq!("Received".parse::<EntryType>().unwrap(), EntryType::Received);
        assert!("transfer".parse::<EntryType>().is_err());
    }

    #[test]
    fn test_constructors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let d = HistoryEntry::donation(1, 9, date, "Mayo Hospital", BloodType::OPositive);
        let r = HistoryEntry::received(2, 9, date, "Aga Khan", BloodType::OPositive);
        assert!(d.is_donation());
        assert!(!r.is_donation());
        assert_eq!(r.quantity, 1);
        assert_eq!(r.hospital, "Aga Khan");
    }

    #[test]
    fn test_deserialize_quantity_default() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"id": 4, "user_id": 2, "entry_type": "donation", "date": "2024-05-01",
                "hospital": "Shifa Int.", "blood_type": "AB-"}"#,
        )
        .unwrap();
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
