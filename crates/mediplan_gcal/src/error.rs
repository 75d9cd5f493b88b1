// --- File: crates/mediplan_gcal/src/error.rs ---
use mediplan_common::{auth_error, external_service_error, HttpStatusCode, MediplanError};
use thiserror::Error;

/// Calendar-push specific error types.
///
/// `ClientUnavailable` and `TokenDenied` are fatal to a whole push operation
/// and always surface before any dispatch. `NetworkError` and `ApiError` are
/// local to one event submission and are accumulated per event rather than
/// aborting the batch.
#[derive(Error, Debug)]
pub enum GcalError {
    /// OAuth client could not be initialized
    #[error("OAuth client unavailable: {0}")]
    ClientUnavailable(String),

    /// Token endpoint answered without an access token
    #[error("Access token denied: {0}")]
    TokenDenied(String),

    /// Transport-level failure of a calendar API request (includes timeouts)
    #[error("Calendar API request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Error status returned by the calendar API
    #[error("Calendar API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a calendar API response
    #[error("Failed to parse calendar API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete calendar configuration
    #[error("Calendar configuration missing or incomplete")]
    ConfigError,

    /// Configured timezone name is not a known IANA zone
    #[error("Unknown timezone: {0}")]
    TimeZoneError(String),
}

/// Convert GcalError to MediplanError
impl From<GcalError> for MediplanError {
    fn from(err: GcalError) -> Self {
        match err {
            GcalError::ClientUnavailable(msg) => {
                auth_error(format!("OAuth client unavailable: {}", msg))
            }
            GcalError::TokenDenied(msg) => auth_error(format!("Access token denied: {}", msg)),
            GcalError::NetworkError(e) => {
                MediplanError::HttpError(format!("Calendar request error: {}", e))
            }
            GcalError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Google Calendar API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            GcalError::ParseError(e) => {
                MediplanError::ParseError(format!("Calendar response parse error: {}", e))
            }
            GcalError::ConfigError => MediplanError::ConfigError(
                "Calendar configuration missing or incomplete".to_string(),
            ),
            GcalError::TimeZoneError(name) => {
                MediplanError::ConfigError(format!("Unknown timezone: {}", name))
            }
        }
    }
}

/// Implement HttpStatusCode for GcalError to provide a consistent way to
/// convert GcalError to HTTP status codes.
impl HttpStatusCode for GcalError {
    fn status_code(&self) -> u16 {
        match self {
            GcalError::ClientUnavailable(_) => 503,
            GcalError::TokenDenied(_) => 401,
            GcalError::NetworkError(_) => 502,
            GcalError::ApiError { status_code, .. } => *status_code,
            GcalError::ParseError(_) => 400,
            GcalError::ConfigError => 500,
            GcalError::TimeZoneError(_) => 500,
        }
    }
}
