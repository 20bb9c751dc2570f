use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::{ChartError, Result};

use super::{StatsData, StatsProvider};

pub const API_KEY_VAR: &str = "WAKATIME_API_KEY";
pub const BASE_URL_VAR: &str = "WAKATIME_BASE_URL";

const SERVICE: &str = "wakatime";

#[derive(Debug, Deserialize)]
struct StatsResponse {
    data: StatsData,
}

/// Reads weekly stats from a WakaTime compatible API. Credentials are checked on every call so
/// a server can start without them and fail per request.
pub struct WakatimeClient {
    http: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl WakatimeClient {
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("{API_KEY_VAR} couldn't be obtained from the environment");
            return Err(ChartError::MissingCredentials(API_KEY_VAR));
        };
        let Some(base_url) = self.base_url.as_deref() else {
            error!("{BASE_URL_VAR} couldn't be obtained from the environment");
            return Err(ChartError::MissingCredentials(BASE_URL_VAR));
        };
        Ok((base_url, api_key))
    }
}

pub fn stats_url(base_url: &str, username: &str) -> String {
    format!(
        "{}/users/{username}/stats/last_7_days",
        base_url.trim_end_matches('/')
    )
}

pub fn authorization_header(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(api_key))
}

#[async_trait]
impl StatsProvider for WakatimeClient {
    async fn fetch(&self, username: &str) -> Result<StatsData> {
        let (base_url, api_key) = self.credentials()?;

        info!("Requesting last 7 days data for {username}");

        let response = self
            .http
            .get(stats_url(base_url, username))
            .header(reqwest::header::AUTHORIZATION, authorization_header(api_key))
            .send()
            .await
            .map_err(|source| ChartError::Fetch {
                service: SERVICE,
                source,
            })?;

        debug!("Response status code: {}", response.status());

        let response = response
            .error_for_status()
            .map_err(|source| ChartError::Fetch {
                service: SERVICE,
                source,
            })?
            .json::<StatsResponse>()
            .await
            .map_err(|source| ChartError::Fetch {
                service: SERVICE,
                source,
            })?;

        Ok(response.data)
    }
}
