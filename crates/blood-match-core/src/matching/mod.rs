//! Donor matching engine.
//!
//! Pipeline: Eligibility → City → Compatibility → Ordering → Cap
//!
//! [`find_matching_donors`] is the reference filter: explicit eligibility flag,
//! case-insensitive city, compatibility table, input order preserved.
//! [`Matcher`] runs the same filter under an [`EngineConfig`], adding the
//! cooldown policies, longest-rested ordering and result caps.

mod compatibility;
mod eligibility;

pub use compatibility::*;
pub use eligibility::*;

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{EligibilityConfig, EngineConfig, MatchingConfig};
use crate::models::{BloodType, DonorRecord, RequestRecord, Urgency};

/// Order in which matched donors are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrdering {
    /// Keep donor pool order
    #[default]
    InputOrder,
    /// Never-donated first, then oldest last donation; ties by ID ascending
    LongestRested,
}

/// Donors matched to a single request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSet {
    pub request_id: u64,
    pub blood_type: BloodType,
    pub city: String,
    pub urgency: Urgency,
    /// Fulfilled requests are reported but never matched
    pub fulfilled: bool,
    pub donors: Vec<DonorRecord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}

/// Find eligible donors in `city` who can supply `requested`.
///
/// Uses the explicit `eligible` flag and preserves pool order.
pub fn find_matching_donors(
    donors: &[DonorRecord],
    requested: BloodType,
    city: &str,
) -> Vec<DonorRecord> {
    let matches: Vec<DonorRecord> = donors
        .iter()
        .filter(|d| d.eligible && d.is_in_city(city) && can_donate(d.blood_type, requested))
        .cloned()
        .collect();

    tracing::debug!(
        pool = donors.len(),
        matched = matches.len(),
        requested = %requested,
        city,
        "matched donors"
    );
    matches
}

/// Label-based variant of [`find_matching_donors`].
///
/// An unrecognised blood type label matches nobody.
pub fn find_matching_donors_by_label(
    donors: &[DonorRecord],
    requested: &str,
    city: &str,
) -> Vec<DonorRecord> {
    match requested.parse::<BloodType>() {
        Ok(blood_type) => find_matching_donors(donors, blood_type, city),
        Err(e) => {
            tracing::warn!(error = %e, city, "request for unknown blood type matches no donors");
            Vec::new()
        }
    }
}

/// Configurable matcher.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    eligibility: EligibilityConfig,
    matching: MatchingConfig,
}

impl Matcher {
    /// Create a matcher from engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            eligibility: config.eligibility.clone(),
            matching: config.matching.clone(),
        }
    }

    /// Find donors for a blood type and city as of `today`.
    pub fn find_matches(
        &self,
        donors: &[DonorRecord],
        requested: BloodType,
        city: &str,
        today: NaiveDate,
    ) -> Vec<DonorRecord> {
        let mut matches: Vec<DonorRecord> = donors
            .iter()
            .filter(|d| is_eligible(d, &self.eligibility, today))
            .filter(|d| d.is_in_city(city))
            .filter(|d| can_donate(d.blood_type, requested))
            .cloned()
            .collect();

        if self.matching.ordering == MatchOrdering::LongestRested {
            // Option orders None first, so never-donated donors lead
            matches.sort_by_key(|d| (d.last_donation_date, d.id));
        }

        if let Some(max) = self.matching.max_results {
            matches.truncate(max);
        }

        tracing::debug!(
            pool = donors.len(),
            matched = matches.len(),
            requested = %requested,
            city,
            policy = ?self.eligibility.policy,
            ordering = ?self.matching.ordering,
            "matched donors"
        );
        matches
    }

    /// Match donors to a request. Fulfilled requests get no donors.
    pub fn match_request(
        &self,
        request: &RequestRecord,
        donors: &[DonorRecord],
        today: NaiveDate,
    ) -> MatchSet {
        let matched = if request.fulfilled {
            tracing::debug!(request_id = request.id, "request already fulfilled, skipping");
            Vec::new()
        } else {
            self.find_matches(donors, request.blood_type, &request.city, today)
        };

        MatchSet {
            request_id: request.id,
            blood_type: request.blood_type,
            city: request.city.clone(),
            urgency: request.urgency,
            fulfilled: request.fulfilled,
            donors: matched,
        }
    }

    /// Match every pending request, most urgent first.
    ///
    /// Within an urgency level, older requests come first (undated last),
    /// then by ID ascending.
    pub fn match_pending(
        &self,
        requests: &[RequestRecord],
        donors: &[DonorRecord],
        today: NaiveDate,
    ) -> Vec<MatchSet> {
        let mut pending: Vec<&RequestRecord> = requests.iter().filter(|r| r.is_pending()).collect();
        pending.sort_by_key(|r| {
            (
                Reverse(r.urgency.priority()),
                r.created_at.is_none(),
                r.created_at,
                r.id,
            )
        });

        pending
            .into_iter()
            .map(|r| self.match_request(r, donors, today))
            .collect()
    }

    pub fn eligibility(&self) -> &EligibilityConfig {
        &self.eligibility
    }
}
