//! Blood Match Core Library
//!
//! Donor-recipient matching and eligibility engine for blood requests.
//!
//! # Architecture
//!
//! ```text
//!                 External record store (HTTP layer, database, ...)
//!                                     │
//!                          RecordSource snapshot
//!                                     │
//!              ┌──────────────────────┴──────────────────────┐
//!              │                                             │
//!              ▼                                             ▼
//!     ┌─────────────────┐                         ┌────────────────────┐
//!     │ Matching Engine │                         │ Stats Aggregator   │
//!     │  eligibility    │                         │  totals, pending,  │
//!     │  city           │                         │  recent donations, │
//!     │  compatibility  │                         │  stock, activity   │
//!     │  ordering       │                         └─────────┬──────────┘
//!     └────────┬────────┘                                   │
//!              ▼                                            ▼
//!          MatchSet                                   DashboardStats
//! ```
//!
//! # Core Principle
//!
//! **The engine is pure.** It never writes records, never reads the clock and
//! never fails on domain input: unknown blood types and empty pools produce
//! empty results.
//!
//! # Modules
//!
//! - [`models`]: Domain types (BloodType, DonorRecord, RequestRecord, HistoryEntry)
//! - [`matching`]: Compatibility table, eligibility policies, matcher
//! - [`stats`]: Dashboard statistics and history listing
//! - [`source`]: Read interface to the record store
//! - [`config`]: TOML engine configuration
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod logging;
pub mod matching;
pub mod models;
pub mod source;
pub mod stats;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig, Validate};
pub use matching::{
    can_donate, compatible_donors, compatible_recipients, find_matching_donors,
    EligibilityPolicy, MatchOrdering, MatchSet, Matcher,
};
pub use models::{BloodType, DonorRecord, EntryType, HistoryEntry, RequestRecord, Urgency};
pub use source::{RecordSource, Snapshot, SourceError};
pub use stats::{compute_dashboard_stats, DashboardStats, HistoryQuery, HistoryView};

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum BloodMatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Record source error: {0}")]
    Source(#[from] SourceError),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type BloodMatchResult<T> = Result<T, BloodMatchError>;

// =========================================================================
// Main API Object
// =========================================================================

/// Engine bound to a configuration, reading records through a [`RecordSource`].
#[derive(Debug, Clone, Default)]
pub struct BloodMatch {
    config: EngineConfig,
    matcher: Matcher,
}

impl BloodMatch {
    pub fn new(config: EngineConfig) -> Self {
        let matcher = Matcher::new(&config);
        Self { config, matcher }
    }

    /// Build an engine from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> BloodMatchResult<Self> {
        Ok(Self::new(EngineConfig::from_file(path)?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    // =========================================================================
    // Matching Operations
    // =========================================================================

    /// Match donors to the stored request with `request_id`.
    pub fn match_request<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        request_id: u64,
        today: NaiveDate,
    ) -> BloodMatchResult<MatchSet> {
        let requests = source.requests()?;
        let request = requests
            .iter()
            .find(|r| r.id == request_id)
            .ok_or_else(|| BloodMatchError::NotFound(format!("request {}", request_id)))?;
        let donors = source.donors()?;
        Ok(self.matcher.match_request(request, &donors, today))
    }

    /// Match donors for an ad-hoc blood type and city.
    pub fn find_donors<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        requested: BloodType,
        city: &str,
        today: NaiveDate,
    ) -> BloodMatchResult<Vec<DonorRecord>> {
        let donors = source.donors()?;
        Ok(self.matcher.find_matches(&donors, requested, city, today))
    }

    /// Match every pending request, most urgent first.
    pub fn match_pending<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        today: NaiveDate,
    ) -> BloodMatchResult<Vec<MatchSet>> {
        let requests = source.requests()?;
        let donors = source.donors()?;
        Ok(self.matcher.match_pending(&requests, &donors, today))
    }

    // =========================================================================
    // Statistics Operations
    // =========================================================================

    /// Compute dashboard statistics as of `now`.
    pub fn dashboard<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        now: DateTime<Utc>,
    ) -> BloodMatchResult<DashboardStats> {
        let donors = source.donors()?;
        let requests = source.requests()?;
        let history = source.history()?;
        Ok(stats::compute_dashboard_stats_with(
            &donors,
            &requests,
            &history,
            now,
            &self.config.stats,
        ))
    }

    /// List a user's history.
    pub fn history<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        query: &HistoryQuery,
    ) -> BloodMatchResult<HistoryView> {
        let history = source.history()?;
        Ok(stats::query_history(&history, query))
    }
}
