//! Blood request models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::blood_type::BloodType;

/// How urgently a request must be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    High,
    Critical,
}

/// Label could not be read as an urgency level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown urgency: {0:?}")]
pub struct ParseUrgencyError(pub String);

impl Urgency {
    /// Rank for ordering work; higher is served first.
    pub fn priority(self) -> u8 {
        match self {
            Urgency::Normal => 0,
            Urgency::High => 1,
            Urgency::Critical => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ParseUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Urgency::Normal),
            "high" => Ok(Urgency::High),
            "critical" => Ok(Urgency::Critical),
            _ => Err(ParseUrgencyError(s.to_string())),
        }
    }
}

/// A recipient's request for blood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestRecord {
    /// Request ID
    pub id: u64,
    /// Requesting user
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Requested blood group
    pub blood_type: BloodType,
    /// City where blood is needed
    pub city: String,
    /// Urgency level
    #[serde(default)]
    pub urgency: Urgency,
    /// Set by the fulfillment action outside the engine
    #[serde(default)]
    pub fulfilled: bool,
    /// Creation date
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

impl RequestRecord {
    /// Create an open, normal-urgency request.
    pub fn new(id: u64, blood_type: BloodType, city: impl Into<String>) -> Self {
        Self {
            id,
            user_id: None,
            blood_type,
            city: city.into(),
            urgency: Urgency::Normal,
            fulfilled: false,
            created_at: None,
        }
    }

    /// Check if the request still needs donors.
    pub fn is_pending(&self) -> bool {
        !self.fulfilled
    }
}
