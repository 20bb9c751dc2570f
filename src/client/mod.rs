//! Providers of the data the pipeline shapes: weekly stats and the language color registry.

pub mod linguist;
pub mod wakatime;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::Result,
    pipeline::{colors::ColorMap, entry::UsageEntry, Category},
};

/// Last 7 days of stats for a user, split by category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsData {
    #[serde(default)]
    pub languages: Option<Vec<UsageEntry>>,
    #[serde(default)]
    pub projects: Option<Vec<UsageEntry>>,
    #[serde(default)]
    pub editors: Option<Vec<UsageEntry>>,
}

impl StatsData {
    pub fn select(self, category: Category) -> Option<Vec<UsageEntry>> {
        match category {
            Category::Languages => self.languages,
            Category::Projects => self.projects,
            Category::Editors => self.editors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryColor {
    pub name: String,
    pub color: String,
}

/// Colors missing from older registry snapshots.
const EXTRA_LANGUAGE_COLORS: [(&str, &str); 2] = [("Vue.js", "#41b883"), ("Bash", "#89e051")];

/// Turns registry colors into a [ColorMap], filling in [EXTRA_LANGUAGE_COLORS] the registry lacks.
pub fn registry_color_map(registry: Vec<RegistryColor>) -> ColorMap {
    let mut colors = registry
        .into_iter()
        .map(|RegistryColor { name, color }| (name, color))
        .collect::<ColorMap>();
    for (name, color) in EXTRA_LANGUAGE_COLORS {
        colors
            .entry(name.to_owned())
            .or_insert_with(|| color.to_owned());
    }
    colors
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<StatsData>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ColorRegistry: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RegistryColor>>;
}
