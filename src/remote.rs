//! HTTP profile and sector stores.
//!
//! Thin reqwest wrappers over the account REST API. Response parsing lives in
//! free functions so it can be tested without a server.
//!
//! ENDPOINTS
//! =========
//! - `GET   {base}/users/{uid}`          stored profile
//! - `PATCH {base}/users/{uid}`          profile patch
//! - `GET   {base}/users/{uid}/sectors`  synced sectors
//! - `POST  {base}/users/{uid}/sectors`  upload guest sectors

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::{AccountConfig, RemoteTimeouts};
use crate::error::{ConfigError, ProviderError};
use crate::ports::{EntityStore, ProfileStore};
use crate::profile::{Profile, ProfilePatch};
use crate::sector::{SavedSector, SyncedSector};

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeouts: RemoteTimeouts) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::Request(format!("http client build failed: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    /// # Errors
    ///
    /// Returns an error if `ACCOUNT_API_BASE_URL` is unset or the client
    /// cannot be built.
    pub fn from_config(config: &AccountConfig) -> Result<Self, ConfigError> {
        let base_url = config.require_api_base_url()?;
        Self::new(base_url, config.timeouts).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    #[must_use]
    pub fn user_url(&self, uid: &str) -> String {
        format!("{}/users/{uid}", self.base_url)
    }

    #[must_use]
    pub fn sectors_url(&self, uid: &str) -> String {
        format!("{}/users/{uid}/sectors", self.base_url)
    }

    async fn read(response: reqwest::Response) -> Result<String, ProviderError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        check_status(status, text)
    }
}

// =============================================================================
// STORES
// =============================================================================

pub struct HttpProfileStore {
    client: RestClient,
}

impl HttpProfileStore {
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn get_user_data(&self, uid: &str) -> Result<Profile, ProviderError> {
        let response = self
            .client
            .http
            .get(self.client.user_url(uid))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let body = RestClient::read(response).await?;
        parse_profile(&body)
    }

    async fn update_user(&self, uid: &str, patch: &ProfilePatch) -> Result<(), ProviderError> {
        let response = self
            .client
            .http
            .patch(self.client.user_url(uid))
            .json(patch)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        RestClient::read(response).await.map(|_| ())
    }
}

pub struct HttpEntityStore {
    client: RestClient,
}

impl HttpEntityStore {
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityStore for HttpEntityStore {
    async fn get_synced_sectors(&self, uid: &str) -> Result<Vec<SyncedSector>, ProviderError> {
        let response = self
            .client
            .http
            .get(self.client.sectors_url(uid))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let body = RestClient::read(response).await?;
        parse_sectors(&body)
    }

    async fn upload_entities(&self, uid: &str, sectors: &[SavedSector]) -> Result<(), ProviderError> {
        let response = self
            .client
            .http
            .post(self.client.sectors_url(uid))
            .json(&serde_json::json!({ "sectors": sectors }))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        RestClient::read(response).await.map(|_| ())
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn check_status(status: u16, body: String) -> Result<String, ProviderError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ProviderError::Http { status, body })
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))
}

/// A missing profile record comes back as an empty body or `null`.
fn parse_profile(body: &str) -> Result<Profile, ProviderError> {
    if body.trim().is_empty() {
        return Ok(Profile::default());
    }
    parse_json::<Option<Profile>>(body).map(Option::unwrap_or_default)
}

/// Accepts a bare array or `{"sectors": [...]}`.
fn parse_sectors(body: &str) -> Result<Vec<SyncedSector>, ProviderError> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum SectorsBody {
        List(Vec<SyncedSector>),
        Wrapped { sectors: Vec<SyncedSector> },
    }

    match parse_json::<SectorsBody>(body)? {
        SectorsBody::List(sectors) | SectorsBody::Wrapped { sectors } => Ok(sectors),
    }
}

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;
