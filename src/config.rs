use std::{path::PathBuf, sync::Arc};

use anyhow::Result;

use crate::{
    client::{
        linguist::{LinguistClient, DEFAULT_LANGUAGES_URL},
        wakatime::WakatimeClient,
    },
    render::json::JsonChartRenderer,
    service::ChartService,
    utils::dir::{charts_dir, create_application_default_path},
};

/// Where stats, colors and rendered charts come from. Every value can also be given through the
/// environment.
#[derive(Debug, Clone, clap::Args)]
pub struct ProviderConfig {
    #[arg(long, env = "WAKATIME_API_KEY", hide_env_values = true, help = "WakaTime API key")]
    pub api_key: Option<String>,
    #[arg(
        long,
        env = "WAKATIME_BASE_URL",
        help = "Base url of the WakaTime API, for example https://wakatime.com/api/v1"
    )]
    pub base_url: Option<String>,
    #[arg(
        long,
        env = "LINGUIST_LANGUAGES_URL",
        default_value = DEFAULT_LANGUAGES_URL,
        help = "Location of linguist's languages.yml used for language colors"
    )]
    pub registry_url: String,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    pub dir: Option<PathBuf>,
}

impl ProviderConfig {
    pub fn application_dir(&self) -> Result<PathBuf> {
        self.dir
            .clone()
            .map_or_else(create_application_default_path, Ok)
    }

    pub fn build_service(&self) -> Result<ChartService> {
        let renderer = JsonChartRenderer::new(charts_dir(&self.application_dir()?))?;
        Ok(ChartService::new(
            Arc::new(WakatimeClient::new(
                self.base_url.clone(),
                self.api_key.clone(),
            )),
            Arc::new(LinguistClient::new(self.registry_url.clone())),
            Arc::new(renderer),
        ))
    }
}
