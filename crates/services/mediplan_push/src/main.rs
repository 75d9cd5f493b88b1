// --- File: crates/services/mediplan_push/src/main.rs ---
//! Pushes a list of medicine schedules into the configured calendar.
//!
//! Usage: `mediplan-push <medicines.json>`
//!
//! The input file holds an ordered JSON list of medicine records (name,
//! dates, times-of-day, notes) as produced by OCR extraction, manual entry
//! or storage. Partial failure of individual submissions is reported in the
//! summary, not treated as fatal.

use mediplan_common::logging;
use mediplan_config::load_config;
use mediplan_gcal::auth::LazyTokenClient;
use mediplan_gcal::logic::{push_schedules, target_timezone};
use mediplan_gcal::schedule::{normalize, MedicineRecord};
use mediplan_gcal::service::GoogleCalendarService;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if !config.use_gcal {
        error!("use_gcal is disabled in the configuration");
        return ExitCode::FAILURE;
    }
    let Some(oauth) = config.oauth.clone() else {
        error!("Missing oauth section in the configuration");
        return ExitCode::FAILURE;
    };
    let gcal = config.gcal.clone().unwrap_or_default();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: mediplan-push <medicines.json>");
        return ExitCode::FAILURE;
    };
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            error!("Failed to read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };
    let records: Vec<MedicineRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(err) => {
            error!("Failed to parse {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };
    let schedules: Vec<_> = records.into_iter().map(normalize).collect();

    let tz = match target_timezone(gcal.time_zone()) {
        Ok(tz) => tz,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let token_client = LazyTokenClient::new(oauth);
    let calendar = GoogleCalendarService::new();

    match push_schedules(
        &token_client,
        &calendar,
        gcal.calendar_id(),
        tz,
        &schedules,
    )
    .await
    {
        Ok(summary) => {
            info!(
                "{} of {} reminders scheduled; {} failed",
                summary.scheduled,
                summary.attempted(),
                summary.failed
            );
            for name in &summary.skipped_schedules {
                warn!("No reminders created for {}", name);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Push operation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
