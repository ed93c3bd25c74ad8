//! ABO/Rh donor → recipient compatibility table.
//!
//! Keyed by donor. O- is the universal donor; AB+ is the universal recipient
//! but as a donor supplies only AB+.

use crate::models::BloodType;

/// Recipients each donor group may supply, indexed by [`BloodType::ALL`] order.
const COMPATIBILITY: [&[BloodType]; 8] = [
    // A+
    &[BloodType::APositive, BloodType::AbPositive],
    // A-
    &[
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
    ],
    // B+
    &[BloodType::BPositive, BloodType::AbPositive],
    // B-
    &[
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
    ],
    // AB+
    &[BloodType::AbPositive],
    // AB-
    &[BloodType::AbPositive, BloodType::AbNegative],
    // O+
    &[
        BloodType::APositive,
        BloodType::BPositive,
        BloodType::OPositive,
        BloodType::AbPositive,
    ],
    // O-
    &[
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
    ],
];

/// Check if `donor` blood may be given to a `recipient`.
pub fn can_donate(donor: BloodType, recipient: BloodType) -> bool {
    COMPATIBILITY[donor.index()].contains(&recipient)
}

/// Label-based lookup. Unrecognised labels are treated as incompatible.
pub fn can_donate_labels(donor: &str, recipient: &str) -> bool {
    match (donor.parse::<BloodType>(), recipient.parse::<BloodType>()) {
        (Ok(d), Ok(r)) => can_donate(d, r),
        (d, r) => {
            tracing::warn!(
                donor,
                recipient,
                donor_known = d.is_ok(),
                recipient_known = r.is_ok(),
                "unknown blood type in compatibility lookup"
            );
            false
        }
    }
}

/// Recipient groups a donor can supply.
pub fn compatible_recipients(donor: BloodType) -> &'static [BloodType] {
    COMPATIBILITY[donor.index()]
}

/// Donor groups a recipient can accept from, in [`BloodType::ALL`] order.
pub fn compatible_donors(recipient: BloodType) -> Vec<BloodType> {
    BloodType::ALL
        .iter()
        .copied()
        .filter(|&donor| can_donate(donor, recipient))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(labels: &[&str]) -> Vec<BloodType> {
        labels.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn test_table_rows() {
        let expected: [(&str, &[&str]); 8] = [
            ("A+", &["A+", "AB+"]),
            ("A-", &["A+", "A-", "AB+", "AB-"]),
            ("B+", &["B+", "AB+"]),
            ("B-", &["B+", "B-", "AB+", "AB-"]),
            ("AB+", &["AB+"]),
            ("AB-", &["AB+", "AB-"]),
            ("O+", &["A+", "B+", "O+", "AB+"]),
            ("O-", &["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"]),
        ];

        for (donor, recipients) in expected {
            let donor: BloodType = donor.parse().unwrap();
            assert_eq!(
                compatible_recipients(donor).to_vec(),
                parse_all(recipients),
                "row for {}",
                donor
            );
        }
    }

    #[test]
    fn test_universal_donor() {
        for recipient in BloodType::ALL {
            assert!(can_donate(BloodType::ONegative, recipient));
        }
    }

    #[test]
    fn test_ab_positive_donates_only_to_itself() {
        assert_eq!(compatible_recipients(BloodType::AbPositive), &[BloodType::AbPositive]);
        assert!(!can_donate(BloodType::AbPositive, BloodType::APositive));
    }

    #[test]
    fn test_universal_recipient() {
        assert_eq!(compatible_donors(BloodType::AbPositive), BloodType::ALL.to_vec());
    }

    #[test]
    fn test_o_negative_recipient() {
        assert_eq!(compatible_donors(BloodType::ONegative), vec![BloodType::ONegative]);
    }

    #[test]
    fn test_rh_negative_recipients_take_only_rh_negative() {
        for recipient in BloodType::ALL.iter().filter(|t| !t.is_rh_positive()) {
            for donor in compatible_donors(*recipient) {
                assert!(!donor.is_rh_positive(), "{} -> {}", donor, recipient);
            }
        }
    }

    #[test]
    fn test_labels_fail_closed() {
        assert!(can_donate_labels("O-", "A+"));
        assert!(can_donate_labels("o-", "ab-"));
        assert!(!can_donate_labels("A+", "O-"));
        assert!(!can_donate_labels("X+", "A+"));
        assert!(!can_donate_labels("O-", "Z"));
        assert!(!can_donate_labels("", ""));
    }
}
