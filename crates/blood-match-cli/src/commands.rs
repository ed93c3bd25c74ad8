//! Subcommand implementations. Each returns a JSON value for `main` to print.

use anyhow::{bail, Context, Result};
use blood_match_core::matching::{is_eligible, next_eligible_date};
use blood_match_core::{BloodMatch, BloodType, EntryType, HistoryQuery, Snapshot};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

pub trait Command {
    fn run(&self, engine: &BloodMatch, snapshot: &Snapshot, now: DateTime<Utc>) -> Result<Value>;
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// ID of a stored request
    #[arg(long, conflicts_with_all = ["blood_type", "city"])]
    pub request: Option<u64>,

    /// Requested blood type (e.g. "O-")
    #[arg(long, requires = "city")]
    pub blood_type: Option<String>,

    /// City to search in
    #[arg(long, requires = "blood_type")]
    pub city: Option<String>,
}

impl Command for MatchArgs {
    fn run(&self, engine: &BloodMatch, snapshot: &Snapshot, now: DateTime<Utc>) -> Result<Value> {
        let today = now.date_naive();
        match (self.request, &self.blood_type, &self.city) {
            (Some(id), _, _) => {
                let set = engine.match_request(snapshot, id, today)?;
                tracing::info!(request_id = id, matched = set.len(), "matched request");
                Ok(serde_json::to_value(set)?)
            }
            (None, Some(label), Some(city)) => {
                let blood_type: BloodType = label
                    .parse()
                    .with_context(|| format!("--blood-type {:?}", label))?;
                let donors = engine.find_donors(snapshot, blood_type, city, today)?;
                tracing::info!(matched = donors.len(), "matched ad-hoc query");
                Ok(serde_json::to_value(donors)?)
            }
            _ => bail!("pass either --request or both --blood-type and --city"),
        }
    }
}

pub struct Pending;

impl Command for Pending {
    fn run(&self, engine: &BloodMatch, snapshot: &Snapshot, now: DateTime<Utc>) -> Result<Value> {
        let sets = engine.match_pending(snapshot, now.date_naive())?;
        Ok(serde_json::to_value(sets)?)
    }
}

pub struct Stats;

impl Command for Stats {
    fn run(&self, engine: &BloodMatch, snapshot: &Snapshot, now: DateTime<Utc>) -> Result<Value> {
        Ok(serde_json::to_value(engine.dashboard(snapshot, now)?)?)
    }
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Owning user ID
    #[arg(long)]
    pub user: u64,

    /// "donation" or "received"
    #[arg(long)]
    pub entry_type: Option<EntryType>,

    /// Inclusive start date
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Inclusive end date
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl Command for HistoryArgs {
    fn run(&self, engine: &BloodMatch, snapshot: &Snapshot, _now: DateTime<Utc>) -> Result<Value> {
        let mut query = HistoryQuery::for_user(self.user).between(self.from, self.to);
        if let Some(entry_type) = self.entry_type {
            query = query.entry_type(entry_type);
        }
        Ok(serde_json::to_value(engine.history(snapshot, &query)?)?)
    }
}

#[derive(Debug, Serialize)]
struct DonorEligibility {
    id: u64,
    blood_type: BloodType,
    city: String,
    eligible_now: bool,
    days_since_last_donation: Option<i64>,
    next_eligible_date: Option<NaiveDate>,
}

pub struct Eligibility;

impl Command for Eligibility {
    fn run(&self, engine: &BloodMatch, snapshot: &Snapshot, now: DateTime<Utc>) -> Result<Value> {
        let today = now.date_naive();
        let rules = engine.matcher().eligibility();
        let rows: Vec<DonorEligibility> = snapshot
            .donors
            .iter()
            .map(|d| DonorEligibility {
                id: d.id,
                blood_type: d.blood_type,
                city: d.city.clone(),
                eligible_now: is_eligible(d, rules, today),
                days_since_last_donation: d.days_since_last_donation(today),
                next_eligible_date: next_eligible_date(d, rules),
            })
            .collect();
        Ok(serde_json::to_value(rows)?)
    }
}
