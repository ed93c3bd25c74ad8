//! ABO/Rh blood group models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

/// Label could not be read as a blood group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown blood type: {0:?}")]
pub struct ParseBloodTypeError(pub String);

impl BloodType {
    /// All eight groups, in table order.
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    /// Canonical label (e.g. "AB-").
    pub fn label(self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    /// Position in [`BloodType::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Check the Rh factor.
    pub fn is_rh_positive(self) -> bool {
        matches!(
            self,
            BloodType::APositive
                | BloodType::BPositive
                | BloodType::AbPositive
                | BloodType::OPositive
        )
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        BloodType::ALL
            .iter()
            .copied()
            .find(|t| t.label() == upper)
            .ok_or_else(|| ParseBloodTypeError(s.to_string()))
    }
}
