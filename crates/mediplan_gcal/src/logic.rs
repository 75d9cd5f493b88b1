// --- File: crates/mediplan_gcal/src/logic.rs ---
//! Dose event expansion and push orchestration.
//!
//! One medicine with N times-of-day compiles into N independent recurring
//! series rather than one event per exact date/time: the recurrence rule
//! encodes a single time-of-day per series, so per-time series keep the
//! calendar representation at O(times-of-day) events per medicine and leave
//! day-by-day occurrence materialization to the calendar service.

use crate::error::GcalError;
use crate::schedule::MedicineSchedule;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use mediplan_common::services::{
    CalendarEvent, CalendarEventResult, CalendarService, ReminderOverride, TokenProvider,
};
use tracing::{error, info, warn};

/// Fixed length of one dose event.
const DOSE_DURATION_MINUTES: i64 = 30;

/// One recurring dose series: a medicine taken at one fixed time-of-day
/// across the treatment window.
#[derive(Debug, Clone)]
pub struct DoseEvent {
    pub medicine: String,
    pub time_of_day: String,
    pub event: CalendarEvent,
}

/// Outcome of one dose series submission, attributable to its originating
/// (medicine, time-of-day) pair.
#[derive(Debug)]
pub struct EventOutcome {
    pub medicine: String,
    pub time_of_day: String,
    pub result: Result<CalendarEventResult, GcalError>,
}

/// Aggregate result of one push operation.
///
/// Partial failure is meaningful to the caller: the operation completes once
/// every expanded event has been attempted, and the counts support a
/// "N of M reminders scheduled; K failed" message.
#[derive(Debug, Default)]
pub struct PushSummary {
    pub scheduled: usize,
    pub failed: usize,
    /// Medicines whose schedule produced zero events (informational, not an error).
    pub skipped_schedules: Vec<String>,
    pub outcomes: Vec<EventOutcome>,
}

impl PushSummary {
    pub fn attempted(&self) -> usize {
        self.scheduled + self.failed
    }
}

/// Resolves the configured timezone name to a `Tz`.
pub fn target_timezone(name: &str) -> Result<Tz, GcalError> {
    name.parse()
        .map_err(|_| GcalError::TimeZoneError(name.to_string()))
}

fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Builds the daily recurrence rule bounded by the last treatment day.
///
/// The calendar service requires the compact UTC timestamp form. The bound is
/// the end of `end_date` in UTC while occurrences are anchored in a named
/// timezone, so near a DST transition the bound can drift by the material
/// offset; that limitation is carried deliberately rather than corrected.
fn recurrence_rule(end_date: NaiveDate) -> String {
    format!(
        "RRULE:FREQ=DAILY;UNTIL={}T235959Z",
        end_date.format("%Y%m%d")
    )
}

/// Fixed reminder policy: popup 10 minutes before each dose, email 30
/// minutes before. Calendar-default reminders are disabled on submission.
fn reminder_policy() -> Vec<ReminderOverride> {
    vec![
        ReminderOverride {
            method: "popup".to_string(),
            minutes: 10,
        },
        ReminderOverride {
            method: "email".to_string(),
            minutes: 30,
        },
    ]
}

/// Expands one schedule into its dose series, preserving times-of-day order.
///
/// A missing date range or `start_date > end_date` is a no-op schedule. An
/// invalid time-of-day (for example `24:00`) skips that single series without
/// failing the rest of the schedule.
pub fn expand_schedule(schedule: &MedicineSchedule, tz: Tz) -> Vec<DoseEvent> {
    let (Some(start_date), Some(end_date)) = (schedule.start_date, schedule.end_date) else {
        return Vec::new();
    };
    if start_date > end_date {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(schedule.times.len());
    for raw_time in &schedule.times {
        let Some(time) = parse_time_of_day(raw_time) else {
            warn!(
                "Skipping invalid time of day '{}' for {}",
                raw_time, schedule.name
            );
            continue;
        };
        // Ambiguous local times at a DST edge resolve to the earliest valid
        // instant; a nonexistent one skips the series.
        let Some(start) = tz.from_local_datetime(&start_date.and_time(time)).earliest() else {
            warn!(
                "Skipping nonexistent local time '{}' for {}",
                raw_time, schedule.name
            );
            continue;
        };
        let end = start + Duration::minutes(DOSE_DURATION_MINUTES);

        events.push(DoseEvent {
            medicine: schedule.name.clone(),
            time_of_day: raw_time.clone(),
            event: CalendarEvent {
                summary: format!("Take {}", schedule.name),
                description: schedule.notes.clone(),
                start_time: start.to_rfc3339(),
                end_time: end.to_rfc3339(),
                time_zone: tz.name().to_string(),
                recurrence: vec![recurrence_rule(end_date)],
                reminders: reminder_policy(),
            },
        });
    }
    events
}

/// Expands all schedules in input order, recording the names of schedules
/// that produced zero events.
pub fn expand_schedules(schedules: &[MedicineSchedule], tz: Tz) -> (Vec<DoseEvent>, Vec<String>) {
    let mut events = Vec::new();
    let mut skipped = Vec::new();
    for schedule in schedules {
        let expanded = expand_schedule(schedule, tz);
        if expanded.is_empty() {
            skipped.push(schedule.name.clone());
        } else {
            events.extend(expanded);
        }
    }
    (events, skipped)
}

/// Runs one end-to-end "push all dose events to the calendar" operation.
///
/// The access token is requested exactly once per invocation and strictly
/// precedes any event dispatch; every event in the batch reuses the same
/// bearer credential. Events are submitted serially in expansion order, and
/// a failed submission never prevents the submission of subsequent events.
///
/// Fatal errors (`ClientUnavailable`, `TokenDenied`) reject the operation
/// before any dispatch. When every schedule expands to zero events the token
/// is not requested and no network call is made.
pub async fn push_schedules<P, C>(
    token_provider: &P,
    calendar: &C,
    calendar_id: &str,
    tz: Tz,
    schedules: &[MedicineSchedule],
) -> Result<PushSummary, GcalError>
where
    P: TokenProvider<Error = GcalError>,
    C: CalendarService<Error = GcalError>,
{
    let (events, skipped_schedules) = expand_schedules(schedules, tz);

    for name in &skipped_schedules {
        info!("Schedule for {} produced no events, skipping", name);
    }

    if events.is_empty() {
        return Ok(PushSummary {
            skipped_schedules,
            ..PushSummary::default()
        });
    }

    // Hard barrier: no submission happens before the token has resolved.
    let access_token = token_provider.request_access_token().await?;
    info!("Access token acquired for scope {}", access_token.scope);

    let mut outcomes = Vec::with_capacity(events.len());
    let mut scheduled = 0usize;
    let mut failed = 0usize;

    for DoseEvent {
        medicine,
        time_of_day,
        event,
    } in events
    {
        let result = calendar
            .insert_event(&access_token, calendar_id, event)
            .await;
        match &result {
            Ok(created) => {
                scheduled += 1;
                info!(
                    "Event created for {} at {}: {}",
                    medicine,
                    time_of_day,
                    created.html_link.as_deref().unwrap_or("<no link>")
                );
            }
            Err(err) => {
                failed += 1;
                error!(
                    "Failed to create event for {} at {}: {}",
                    medicine, time_of_day, err
                );
            }
        }
        outcomes.push(EventOutcome {
            medicine,
            time_of_day,
            result,
        });
    }

    Ok(PushSummary {
        scheduled,
        failed,
        skipped_schedules,
        outcomes,
    })
}
