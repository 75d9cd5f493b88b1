// --- File: crates/mediplan_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides trait definitions for the external collaborators of
//! the push pipeline: the OAuth token provider and the calendar event
//! submission endpoint. These traits allow for dependency injection and
//! easier testing by decoupling the scheduling logic from specific
//! implementations of those services.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A bearer credential obtained once per push operation.
///
/// The token is ephemeral: it lives for the duration of one "push schedules"
/// operation and is never persisted.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub scope: String,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scope: scope.into(),
        }
    }
}

/// A reminder override attached to a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: i64,
}

/// A calendar event payload, independent of any concrete calendar backend.
///
/// `start_time`/`end_time` are RFC3339 strings carrying the offset of
/// `time_zone`, so a backend can forward them verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub time_zone: String,
    pub recurrence: Vec<String>,
    pub reminders: Vec<ReminderOverride>,
}

/// Result of submitting one event to a calendar service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub event_id: Option<String>,
    pub html_link: Option<String>,
    pub status: String,
}

/// A trait for OAuth token acquisition.
///
/// This is the redesigned form of the callback-based token flow: one call,
/// one resolution. The future resolves exactly once with a bearer token or
/// rejects exactly once with a reason; callers treat a successful resolution
/// as the barrier that must be passed before any event dispatch.
pub trait TokenProvider: Send + Sync {
    /// Error type returned by token operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Request a bearer token for the configured scope.
    ///
    /// May prompt for or depend on user consent in interactive providers.
    fn request_access_token(&self) -> BoxFuture<'_, AccessToken, Self::Error>;
}

/// A trait for calendar service operations.
///
/// The push pipeline only needs event creation; retrieval and deletion stay
/// with the calendar service, which is the system of record for created
/// events.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create one event in the given calendar using the supplied bearer token.
    fn insert_event(
        &self,
        access_token: &AccessToken,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}
