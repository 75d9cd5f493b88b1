// --- File: crates/mediplan_gcal/src/auth.rs ---
//! OAuth token acquisition for calendar-event write access.
//!
//! The token flow resolves exactly once per request: either with a bearer
//! token or with a denial reason. The client handle itself is built lazily
//! and exactly once per process through [`LazyTokenClient`].

use crate::error::GcalError;
use mediplan_common::services::{AccessToken, BoxFuture, TokenProvider};
use mediplan_common::HTTP_CLIENT;
use mediplan_config::OAuthConfig;
use serde::Deserialize;
use std::env;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// OAuth scope granting calendar-event write access.
pub const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Wire shape of the token endpoint response. A response without an access
/// token means consent was declined or the provider errored.
#[derive(Deserialize, Debug)]
struct TokenEndpointResponse {
    access_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// A ready-to-use OAuth token client.
///
/// Secrets come straight from env vars (`GOOGLE_CLIENT_SECRET`,
/// `GOOGLE_REFRESH_TOKEN`); only the non-secret client id and endpoint live
/// in configuration.
pub struct TokenClient {
    http: reqwest::Client,
    token_uri: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl TokenClient {
    fn from_config(config: &OAuthConfig) -> Result<Self, GcalError> {
        mediplan_config::ensure_dotenv_loaded();

        let client_secret = env::var("GOOGLE_CLIENT_SECRET").map_err(|_| {
            GcalError::ClientUnavailable("GOOGLE_CLIENT_SECRET is not set".to_string())
        })?;
        let refresh_token = env::var("GOOGLE_REFRESH_TOKEN").map_err(|_| {
            GcalError::ClientUnavailable("GOOGLE_REFRESH_TOKEN is not set".to_string())
        })?;

        Ok(Self {
            http: HTTP_CLIENT.clone(),
            token_uri: config.token_uri().to_string(),
            client_id: config.client_id.clone(),
            client_secret,
            refresh_token,
        })
    }
}

impl TokenProvider for TokenClient {
    type Error = GcalError;

    fn request_access_token(&self) -> BoxFuture<'_, AccessToken, GcalError> {
        Box::pin(async move {
            let params = [
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ];

            let response = self.http.post(&self.token_uri).form(&params).send().await?;
            let status = response.status();
            let body: TokenEndpointResponse = response.json().await?;

            match body.access_token {
                Some(token) if !token.is_empty() => {
                    debug!("Token endpoint returned a bearer token");
                    Ok(AccessToken::new(
                        token,
                        body.scope
                            .unwrap_or_else(|| CALENDAR_EVENTS_SCOPE.to_string()),
                    ))
                }
                _ => {
                    let reason = body.error_description.or(body.error).unwrap_or_else(|| {
                        format!(
                            "token endpoint answered {} without an access token",
                            status
                        )
                    });
                    Err(GcalError::TokenDenied(reason))
                }
            }
        })
    }
}

/// Lazily-initialized token client handle, safe to share across push
/// operations.
///
/// Initialization is single-flight: concurrent `load` calls await the same
/// outcome, and a later call observes the already-built client without
/// re-reading the environment.
pub struct LazyTokenClient {
    config: OAuthConfig,
    cell: OnceCell<TokenClient>,
}

impl LazyTokenClient {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Idempotent load of the underlying client.
    pub async fn load(&self) -> Result<&TokenClient, GcalError> {
        self.cell
            .get_or_try_init(|| async {
                info!(
                    "Initializing OAuth token client for {}",
                    self.config.client_id
                );
                TokenClient::from_config(&self.config)
            })
            .await
    }
}

impl TokenProvider for LazyTokenClient {
    type Error = GcalError;

    fn request_access_token(&self) -> BoxFuture<'_, AccessToken, GcalError> {
        Box::pin(async move {
            let client = self.load().await?;
            client.request_access_token().await
        })
    }
}
