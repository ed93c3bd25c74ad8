//! Donor models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blood_type::BloodType;

/// A registered donor profile as supplied by the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonorRecord {
    /// Profile ID
    pub id: u64,
    /// Owning user account, if the store tracks it
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Display name from the owning account
    #[serde(default)]
    pub full_name: Option<String>,
    /// Blood group
    pub blood_type: BloodType,
    /// City of residence
    pub city: String,
    /// Age in years
    pub age: u32,
    /// Date of the most recent donation
    #[serde(default)]
    pub last_donation_date: Option<NaiveDate>,
    /// Externally managed eligibility flag
    #[serde(default = "default_eligible")]
    pub eligible: bool,
}

fn default_eligible() -> bool {
    true
}

impl DonorRecord {
    /// Create an eligible donor with required fields.
    pub fn new(id: u64, blood_type: BloodType, city: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            user_id: None,
            full_name: None,
            blood_type,
            city: city.into(),
            age,
            last_donation_date: None,
            eligible: true,
        }
    }

    /// Check whether this donor lives in `city` (case-insensitive).
    ///
    /// Surrounding whitespace is trimmed on both sides on purpose, so padded
    /// form input such as `"Lahore "` still matches.
    pub fn is_in_city(&self, city: &str) -> bool {
        self.city.trim().to_lowercase() == city.trim().to_lowercase()
    }

    /// Whole days since the last donation, as of `today`.
    pub fn days_since_last_donation(&self, today: NaiveDate) -> Option<i64> {
        self.last_donation_date
            .map(|last| (today - last).num_days())
    }
}
