//! Dashboard statistics over the full donor/request/history population.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StatsConfig;
use crate::models::{BloodType, DonorRecord, HistoryEntry, RequestRecord};

/// Shown in the activity feed when the store could not resolve a name.
pub const UNKNOWN_DONOR: &str = "Unknown";

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// All donor profiles, eligible or not
    pub total_donors: usize,
    /// Requests not yet fulfilled
    pub pending_requests: usize,
    /// Donations inside the trailing window
    pub recent_donations_count: usize,
    /// Donors per blood group, in order of first appearance
    pub stock_levels: Vec<StockLevel>,
    /// Most recent history entries, newest first
    pub recent_activity: Vec<ActivityItem>,
}

/// Donor count for one blood group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockLevel {
    #[serde(rename = "group")]
    pub blood_type: BloodType,
    #[serde(rename = "units")]
    pub count: usize,
}

/// One row of the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    #[serde(rename = "donor")]
    pub donor_name: String,
    #[serde(rename = "group")]
    pub blood_type: BloodType,
    /// Hospital or location of the entry
    #[serde(rename = "city")]
    pub location: String,
    #[serde(rename = "time")]
    pub date: NaiveDate,
}

impl From<&HistoryEntry> for ActivityItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            donor_name: entry
                .user_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_DONOR.to_string()),
            blood_type: entry.blood_type,
            location: entry.hospital.clone(),
            date: entry.date,
        }
    }
}

/// Compute dashboard statistics with the default 30-day window and 5-item feed.
pub fn compute_dashboard_stats(
    donors: &[DonorRecord],
    requests: &[RequestRecord],
    history: &[HistoryEntry],
    now: DateTime<Utc>,
) -> DashboardStats {
    compute_dashboard_stats_with(donors, requests, history, now, &StatsConfig::default())
}

/// Compute dashboard statistics under `config`.
pub fn compute_dashboard_stats_with(
    donors: &[DonorRecord],
    requests: &[RequestRecord],
    history: &[HistoryEntry],
    now: DateTime<Utc>,
    config: &StatsConfig,
) -> DashboardStats {
    let today = now.date_naive();
    let stats = DashboardStats {
        total_donors: donors.len(),
        pending_requests: requests.iter().filter(|r| r.is_pending()).count(),
        recent_donations_count: count_recent_donations(history, today, config.recent_window_days),
        stock_levels: stock_levels(donors),
        recent_activity: recent_activity(history, config.activity_limit),
    };

    tracing::debug!(
        donors = stats.total_donors,
        pending = stats.pending_requests,
        recent_donations = stats.recent_donations_count,
        groups = stats.stock_levels.len(),
        "computed dashboard stats"
    );
    stats
}

/// Count donations dated on or after `today - window_days`.
///
/// A window reaching past the earliest representable date counts everything.
pub fn count_recent_donations(history: &[HistoryEntry], today: NaiveDate, window_days: u32) -> usize {
    let cutoff = today
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);
    history
        .iter()
        .filter(|e| e.is_donation() && e.date >= cutoff)
        .count()
}

/// Count donors per blood group, ordered by first appearance.
pub fn stock_levels(donors: &[DonorRecord]) -> Vec<StockLevel> {
    let mut levels: Vec<StockLevel> = Vec::new();
    for donor in donors {
        match levels.iter_mut().find(|l| l.blood_type == donor.blood_type) {
            Some(level) => level.count += 1,
            None => levels.push(StockLevel {
                blood_type: donor.blood_type,
                count: 1,
            }),
        }
    }
    levels
}

/// The `limit` newest history entries. Same-day entries are ordered by ID ascending.
pub fn recent_activity(history: &[HistoryEntry], limit: usize) -> Vec<ActivityItem> {
    let mut entries: Vec<&HistoryEntry> = history.iter().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
    entries
        .into_iter()
        .take(limit)
        .map(ActivityItem::from)
        .collect()
}
