//! Donor eligibility gating.
//!
//! Policies:
//! - `flag`: the externally managed `eligible` flag decides
//! - `cooldown`: eligible once `cooldown_days` have passed since the last donation
//! - `flag_and_cooldown`: both must hold

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EligibilityConfig;
use crate::models::DonorRecord;

/// Source of truth for donor eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityPolicy {
    #[default]
    Flag,
    Cooldown,
    FlagAndCooldown,
}

impl EligibilityPolicy {
    pub fn uses_flag(self) -> bool {
        matches!(self, EligibilityPolicy::Flag | EligibilityPolicy::FlagAndCooldown)
    }

    pub fn uses_cooldown(self) -> bool {
        matches!(self, EligibilityPolicy::Cooldown | EligibilityPolicy::FlagAndCooldown)
    }
}

/// Check whether `donor` may donate on `today` under `config`.
pub fn is_eligible(donor: &DonorRecord, config: &EligibilityConfig, today: NaiveDate) -> bool {
    if config.policy.uses_flag() && !donor.eligible {
        return false;
    }
    if config.policy.uses_cooldown() {
        return match donor.last_donation_date {
            None => true, // Never donated
            // A cooldown ending past the calendar never ends.
            Some(last) => cooldown_end(last, config).is_some_and(|date| today >= date),
        };
    }
    true
}

/// First date the cooldown allows another donation.
///
/// `None` when the policy has no cooldown, the donor has no recorded donation,
/// or the cooldown would end beyond the last representable date.
pub fn next_eligible_date(donor: &DonorRecord, config: &EligibilityConfig) -> Option<NaiveDate> {
    if !config.policy.uses_cooldown() {
        return None;
    }
    donor
        .last_donation_date
        .and_then(|last| cooldown_end(last, config))
}

fn cooldown_end(last: NaiveDate, config: &EligibilityConfig) -> Option<NaiveDate> {
    last.checked_add_signed(Duration::days(i64::from(config.cooldown_days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(policy: EligibilityPolicy) -> EligibilityConfig {
        EligibilityConfig {
            policy,
            cooldown_days: 90,
        }
    }

    fn donor(eligible: bool, last: Option<NaiveDate>) -> DonorRecord {
        let mut d = DonorRecord::new(1, BloodType::OPositive, "Lahore", 30);
        d.eligible = eligible;
        d.last_donation_date = last;
        d
    }

    #[test]
    fn test_flag_policy_ignores_dates() {
        let today = date(2024, 6, 1);
        let cfg = config(EligibilityPolicy::Flag);

        // Donated yesterday but flag says eligible
        assert!(is_eligible(&donor(true, Some(date(2024, 5, 31))), &cfg, today));
        assert!(!is_eligible(&donor(false, None), &cfg, today));
        assert_eq!(next_eligible_date(&donor(true, Some(date(2024, 5, 31))), &cfg), None);
    }

    #[test]
    fn test_cooldown_policy_ignores_flag() {
        let today = date(2024, 6, 1);
        let cfg = config(EligibilityPolicy::Cooldown);

        assert!(is_eligible(&donor(false, None), &cfg, today));
        assert!(is_eligible(&donor(false, Some(date(2024, 1, 1))), &cfg, today));
        assert!(!is_eligible(&donor(true, Some(date(2024, 5, 1))), &cfg, today));
    }

    #[test]
    fn test_cooldown_boundary() {
        let cfg = config(EligibilityPolicy::Cooldown);
        let last = date(2024, 1, 1);
        let d = donor(true, Some(last));

        let boundary = date(2024, 3, 31); // 90 days after Jan 1 (leap year)
        assert_eq!(next_eligible_date(&d, &cfg), Some(boundary));
        assert!(is_eligible(&d, &cfg, boundary));
        assert!(!is_eligible(&d, &cfg, boundary - Duration::days(1)));
    }

    #[test]
    fn test_future_last_donation_not_eligible() {
        let cfg = config(EligibilityPolicy::Cooldown);
        let d = donor(true, Some(date(2024, 7, 1)));
        assert!(!is_eligible(&d, &cfg, date(2024, 6, 1)));
    }

    #[test]
    fn test_cooldown_past_max_date_not_eligible() {
        let cfg = config(EligibilityPolicy::Cooldown);
        let last = NaiveDate::MAX - Duration::days(10);
        let d = donor(true, Some(last));

        assert_eq!(next_eligible_date(&d, &cfg), None);
        assert!(!is_eligible(&d, &cfg, NaiveDate::MAX));
        assert!(!is_eligible(&d, &cfg, date(2024, 6, 1)));
    }

    #[test]
    fn test_oversized_cooldown_does_not_panic() {
        let cfg = EligibilityConfig {
            policy: EligibilityPolicy::FlagAndCooldown,
            cooldown_days: u32::MAX,
        };
        let d = donor(true, Some(date(2024, 1, 1)));

        assert_eq!(next_eligible_date(&d, &cfg), None);
        assert!(!is_eligible(&d, &cfg, date(2024, 6, 1)));
        assert!(is_eligible(&donor(true, None), &cfg, date(2024, 6, 1)));
    }

    #[test]
    fn test_flag_and_cooldown() {
        let today = date(2024, 6, 1);
        let cfg = config(EligibilityPolicy::FlagAndCooldown);

        assert!(is_eligible(&donor(true, Some(date(2023, 1, 1))), &cfg, today));
        assert!(!is_eligible(&donor(false, Some(date(2023, 1, 1))), &cfg, today));
        assert!(!is_eligible(&donor(true, Some(date(2024, 5, 20))), &cfg, today));
    }
}
