//! Client for the Stryde backend: health check, OAuth start, and the
//! profile/training endpoints keyed by the OAuth correlation state.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{FitnessSnapshot, UserProfile},
    error::ApiError,
    protocol::{
        AuthStartResponse, PingResponse, StateQuery, AUTH_START_PATH, PING_PATH,
        TRAINING_VOLUME_PATH, USER_PROFILE_PATH,
    },
};
use tracing::{debug, info, warn};

pub mod config;
pub mod error;

pub use config::{ClientSettings, FailurePolicy, FailureSurface};
pub use error::{ClientError, FailureKind};

/// The backend contract the client depends on. Every call is a single
/// attempt; failures are returned to the caller as-is.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn ping(&self) -> Result<PingResponse, ClientError>;
    async fn start_auth(&self) -> Result<AuthStartResponse, ClientError>;
    async fn user_profile(&self, state: &str) -> Result<UserProfile, ClientError>;
    async fn training_volume(&self, state: &str) -> Result<FitnessSnapshot, ClientError>;
}

pub struct StrydeClient {
    http: Client,
    api_url: String,
}

impl StrydeClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: config::normalize_api_url(&api_url.into()),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(ClientError::Setup)?;
        Ok(Self {
            http,
            api_url: config::normalize_api_url(&settings.api_url),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        state: Option<&str>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.get(format!("{}{endpoint}", self.api_url));
        if let Some(state) = state {
            request = request.query(&StateQuery { state });
        }

        debug!(endpoint, "backend request");
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Network { endpoint, source })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Network { endpoint, source })?;

        if !status.is_success() {
            let detail = ApiError::from_body(&body).map(|err| err.detail);
            warn!(
                endpoint,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or_default(),
                "backend rejected request"
            );
            return Err(ClientError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|err| ClientError::Decode {
            endpoint,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl BackendApi for StrydeClient {
    async fn ping(&self) -> Result<PingResponse, ClientError> {
        self.get_json(PING_PATH, None).await
    }

    async fn start_auth(&self) -> Result<AuthStartResponse, ClientError> {
        let response: AuthStartResponse = self.get_json(AUTH_START_PATH, None).await?;
        if response.auth_url.trim().is_empty() || response.state.trim().is_empty() {
            return Err(ClientError::Decode {
                endpoint: AUTH_START_PATH,
                reason: "missing auth_url or state".to_string(),
            });
        }
        info!("oauth: authorization url issued");
        Ok(response)
    }

    async fn user_profile(&self, state: &str) -> Result<UserProfile, ClientError> {
        self.get_json(USER_PROFILE_PATH, Some(state)).await
    }

    async fn training_volume(&self, state: &str) -> Result<FitnessSnapshot, ClientError> {
        let snapshot: FitnessSnapshot = self.get_json(TRAINING_VOLUME_PATH, Some(state)).await?;
        info!(
            total_activities = snapshot.total_activities,
            weeks = snapshot.weekly_volume.len(),
            months = snapshot.monthly_volume.len(),
            "training volume received"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
