//! Per-user history listing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EntryType, HistoryEntry};

/// Filter for a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub user_id: u64,
    /// Restrict to one entry type
    pub entry_type: Option<EntryType>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl HistoryQuery {
    /// Unfiltered query for one user.
    pub fn for_user(user_id: u64) -> Self {
        Self {
            user_id,
            entry_type: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    fn accepts(&self, entry: &HistoryEntry) -> bool {
        entry.user_id == self.user_id
            && self.entry_type.map_or(true, |t| entry.entry_type == t)
            && self.start_date.map_or(true, |start| entry.date >= start)
            && self.end_date.map_or(true, |end| entry.date <= end)
    }
}

/// A user's history split by entry type, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub donations: Vec<HistoryEntry>,
    pub received: Vec<HistoryEntry>,
}

impl HistoryView {
    /// Total units given across listed donations.
    pub fn units_donated(&self) -> u64 {
        self.donations.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Total units received across listed entries.
    pub fn units_received(&self) -> u64 {
        self.received.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.donations.is_empty() && self.received.is_empty()
    }
}

/// List the history entries matching `query`, ordered by date descending
/// (same-day entries by ID ascending).
pub fn query_history(entries: &[HistoryEntry], query: &HistoryQuery) -> HistoryView {
    let mut matched: Vec<&HistoryEntry> = entries.iter().filter(|e| query.accepts(e)).collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

    let (donations, received): (Vec<&HistoryEntry>, Vec<&HistoryEntry>) =
        matched.into_iter().partition(|e| e.is_donation());

    HistoryView {
        donations: donations.into_iter().cloned().collect(),
        received: received.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log() -> Vec<HistoryEntry> {
        let mut big = HistoryEntry::donation(4, 1, date(2024, 4, 2), "Aga Khan", BloodType::OPositive);
        big.quantity = 2;
        vec![
            HistoryEntry::donation(1, 1, date(2024, 1, 15), "Mayo Hospital", BloodType::OPositive),
            HistoryEntry::received(2, 1, date(2024, 3, 1), "Shifa Int.", BloodType::OPositive),
            HistoryEntry::donation(3, 2, date(2024, 2, 1), "Mayo Hospital", BloodType::ANegative),
            big,
        ]
    }

    fn ids(entries: &[HistoryEntry]) -> Vec<u64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_split_and_order() {
        let view = query_history(&log(), &HistoryQuery::for_user(1));
        assert_eq!(ids(&view.donations), vec![4, 1]);
        assert_eq!(ids(&view.received), vec![2]);
        assert_eq!(view.units_donated(), 3);
        assert_eq!(view.units_received(), 1);
    }

    #[test]
    fn test_entry_type_filter() {
        let view = query_history(&log(), &HistoryQuery::for_user(1).entry_type(EntryType::Received));
        assert!(view.donations.is_empty());
        assert_eq!(ids(&view.received), vec![2]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let query = HistoryQuery::for_user(1).between(Some(date(2024, 1, 15)), Some(date(2024, 3, 1)));
        let view = query_history(&log(), &query);
        assert_eq!(ids(&view.donations), vec![1]);
        assert_eq!(ids(&view.received), vec![2]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let query = HistoryQuery::for_user(1).between(Some(date(2024, 5, 1)), Some(date(2024, 1, 1)));
        assert!(query_history(&log(), &query).is_empty());
    }

    #[test]
    fn test_unknown_user() {
        assert!(query_history(&log(), &HistoryQuery::for_user(99)).is_empty());
    }
}
