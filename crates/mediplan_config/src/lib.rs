// --- File: crates/mediplan_config/src/lib.rs ---
pub mod models;

pub use models::{AppConfig, GcalConfig, OAuthConfig};

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use tracing::debug;

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads `.env` into the process environment at most once.
/// Dependent crates call this before reading secret env vars directly.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment from .env");
        }
    });
}

/// Loads the application configuration.
///
/// Layered sources, later ones override earlier ones:
/// 1. `config/default.*` (optional file)
/// 2. `config/{RUN_ENV}.*` (optional file, RUN_ENV defaults to "default")
/// 3. Environment variables with the `APP` prefix and `__` separator,
///    e.g. `APP_GCAL__CALENDAR_ID=primary`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
