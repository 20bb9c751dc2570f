use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ChartError, Result};

use super::{ColorRegistry, RegistryColor};

pub const DEFAULT_LANGUAGES_URL: &str =
    "https://raw.githubusercontent.com/github-linguist/linguist/master/lib/linguist/languages.yml";

const SERVICE: &str = "linguist";

#[derive(Debug, Deserialize)]
struct LanguageAttributes {
    color: Option<String>,
}

/// Color registry backed by github-linguist's `languages.yml`.
pub struct LinguistClient {
    http: reqwest::Client,
    url: String,
}

impl LinguistClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for LinguistClient {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES_URL)
    }
}

/// Extracts language colors from a `languages.yml` document. Languages without a color are
/// skipped.
pub fn parse_languages(document: &str) -> Result<Vec<RegistryColor>> {
    let languages = serde_yaml::from_str::<BTreeMap<String, LanguageAttributes>>(document)?;
    Ok(languages
        .into_iter()
        .filter_map(|(name, attributes)| {
            attributes.color.map(|color| RegistryColor { name, color })
        })
        .collect())
}

#[async_trait]
impl ColorRegistry for LinguistClient {
    async fn fetch(&self) -> Result<Vec<RegistryColor>> {
        info!("Requesting languages.yml from {}", self.url);

        let to_error = |source: reqwest::Error| ChartError::Fetch {
            service: SERVICE,
            source,
        };

        let response = self.http.get(&self.url).send().await.map_err(to_error)?;

        debug!("Response status code: {}", response.status());

        let document = response
            .error_for_status()
            .map_err(to_error)?
            .text()
            .await
            .map_err(to_error)?;

        parse_languages(&document)
    }
}
