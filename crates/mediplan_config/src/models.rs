// --- File: crates/mediplan_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Google Calendar Config ---
// Holds non-secret calendar config. Secrets loaded directly from env vars.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub calendar_id: Option<String>,
    pub time_zone: Option<String>,
}

impl GcalConfig {
    /// Target calendar, defaulting to the user's primary calendar.
    pub fn calendar_id(&self) -> &str {
        self.calendar_id.as_deref().unwrap_or("primary")
    }

    /// Fixed timezone every instant of a push operation is interpreted in.
    /// This is a configured value, not derived from the user's locale.
    pub fn time_zone(&self) -> &str {
        self.time_zone.as_deref().unwrap_or("Asia/Kolkata")
    }
}

// --- OAuth Config ---
// Holds non-secret OAuth client config. Secrets loaded directly from env vars:
// GOOGLE_CLIENT_SECRET
// GOOGLE_REFRESH_TOKEN
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OAuthConfig {
    pub client_id: String, // Mandatory
    pub token_uri: Option<String>,
}

impl OAuthConfig {
    pub fn token_uri(&self) -> &str {
        self.token_uri
            .as_deref()
            .unwrap_or("https://oauth2.googleapis.com/token")
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub oauth: Option<OAuthConfig>,
}
