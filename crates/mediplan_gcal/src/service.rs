// --- File: crates/mediplan_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait over
//! the Google Calendar REST API. Each submitted event creates one recurring
//! series server-side; no local record of created event identifiers is kept
//! beyond logging, the calendar service being the system of record.

use crate::error::GcalError;
use mediplan_common::services::{
    AccessToken, BoxFuture, CalendarEvent, CalendarEventResult, CalendarService, ReminderOverride,
};
use mediplan_common::HTTP_CLIENT;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Base URL of the Google Calendar REST API.
pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

// --- Wire models (Google's camelCase field names) ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EventDateTimePayload {
    date_time: String,
    time_zone: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RemindersPayload {
    use_default: bool,
    overrides: Vec<ReminderOverride>,
}

#[derive(Serialize, Debug)]
struct EventResource {
    summary: String,
    description: String,
    start: EventDateTimePayload,
    end: EventDateTimePayload,
    recurrence: Vec<String>,
    reminders: RemindersPayload,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    id: Option<String>,
    html_link: Option<String>,
    status: Option<String>,
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service backed by the shared HTTP client.
    pub fn new() -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            base_url: CALENDAR_API_BASE.to_string(),
        }
    }

    /// Create a service against a custom endpoint, used by tests.
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl Default for GoogleCalendarService {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalError;

    /// Creates one recurring event in the specified calendar.
    ///
    /// Default reminders are disabled on submission; only the payload's
    /// explicit overrides apply.
    fn insert_event(
        &self,
        access_token: &AccessToken,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let token = access_token.token.clone();
        let url = format!("{}/calendars/{}/events", self.base_url, calendar_id);

        Box::pin(async move {
            let payload = EventResource {
                summary: event.summary,
                description: event.description,
                start: EventDateTimePayload {
                    date_time: event.start_time,
                    time_zone: event.time_zone.clone(),
                },
                end: EventDateTimePayload {
                    date_time: event.end_time,
                    time_zone: event.time_zone,
                },
                recurrence: event.recurrence,
                reminders: RemindersPayload {
                    use_default: false,
                    overrides: event.reminders,
                },
            };

            let response = self
                .http
                .post(&url)
                .bearer_auth(&token)
                .json(&payload)
                .send()
                .await?;

            let status = response.status();
            let body_text = response.text().await?;

            if status.is_success() {
                let created: InsertedEvent = serde_json::from_str(&body_text)?;
                info!(
                    "Calendar event created: {}",
                    created.html_link.as_deref().unwrap_or("<no link>")
                );
                Ok(CalendarEventResult {
                    event_id: created.id,
                    html_link: created.html_link,
                    status: created.status.unwrap_or_else(|| "confirmed".to_string()),
                })
            } else {
                let error_message = match serde_json::from_str::<serde_json::Value>(&body_text) {
                    Ok(json_body) => json_body
                        .get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .unwrap_or(&body_text)
                        .to_string(),
                    Err(_) => body_text,
                };
                error!(
                    "Calendar API request failed with HTTP status: {}. Message: {}",
                    status, error_message
                );
                Err(GcalError::ApiError {
                    status_code: status.as_u16(),
                    message: error_message,
                })
            }
        })
    }
}
