// --- File: crates/mediplan_gcal/src/schedule.rs ---
//! Schedule normalization.
//!
//! Medicine records arrive in a loose shape: from OCR extraction, manual
//! entry or storage. This module canonicalizes them into the form the event
//! expander consumes. Normalization is a pure transformation and never fails;
//! missing or unparseable temporal fields yield an empty effective date range
//! that the expander treats as a no-op schedule.

use chrono::NaiveDate;
use serde::Deserialize;

/// A `time` field that may be absent, a single string or a sequence.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(untagged)]
pub enum OneOrMany {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

/// Loosely-typed medicine record as supplied by callers.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicineRecord {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub time: OneOrMany,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Canonical schedule shape consumed by the expander.
///
/// Invariant: a schedule only generates events when both dates are present
/// and `start_date <= end_date`; duplicates in `times` are permitted, each
/// producing its own dose series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineSchedule {
    pub name: String,
    pub times: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: String,
}

/// Canonicalizes one medicine record.
pub fn normalize(record: MedicineRecord) -> MedicineSchedule {
    let times = match record.time {
        OneOrMany::None => Vec::new(),
        OneOrMany::One(t) => vec![t],
        OneOrMany::Many(ts) => ts,
    };

    MedicineSchedule {
        name: record.name,
        times,
        start_date: record.start_date.as_deref().and_then(parse_date),
        end_date: record.end_date.as_deref().and_then(parse_date),
        notes: record.notes.unwrap_or_default(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
