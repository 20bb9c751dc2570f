//! Shapes raw usage entries into what ends up on a chart. Colors are layered as
//! registry < user < group, then entries are grouped and finally hidden.

pub mod colors;
pub mod entry;
pub mod filter;
pub mod grouping;
pub mod matcher;

use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::{
    client::{registry_color_map, ColorRegistry, StatsProvider},
    error::{ChartError, Result},
};

use self::{colors::ColorMap, entry::UsageEntry, grouping::GroupSpec, matcher::PatternSet};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Languages,
    Projects,
    Editors,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Languages => write!(f, "languages"),
            Category::Projects => write!(f, "projects"),
            Category::Editors => write!(f, "editors"),
        }
    }
}

/// Requested chart dimensions, handed to the renderer untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One chart request. Every request gets its own id which later locates the rendered artifact.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub id: Uuid,
    pub category: Category,
    pub username: String,
    pub hide: Option<PatternSet>,
    pub colors: Option<ColorMap>,
    pub groups: Option<GroupSpec>,
    pub group_colors: Option<ColorMap>,
    pub size: ChartSize,
}

impl ChartRequest {
    pub fn new(category: Category, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            username: username.into(),
            hide: None,
            colors: None,
            groups: None,
            group_colors: None,
            size: ChartSize::default(),
        }
    }
}

/// Final entries with the colors they should be drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedChart {
    pub entries: Vec<UsageEntry>,
    pub colors: Option<ColorMap>,
}

/// Fetches the stats for a request and runs them through the color, grouping and hiding steps.
#[instrument(skip_all, fields(id = %request.id, category = %request.category))]
pub async fn shape_chart(
    request: &ChartRequest,
    stats: &dyn StatsProvider,
    registry: &dyn ColorRegistry,
) -> Result<ShapedChart> {
    let data = stats.fetch(&request.username).await?;

    let Some(entries) = data.select(request.category) else {
        error!("Stats for {} carry no {} list", request.username, request.category);
        return Err(ChartError::ContractViolation(request.category));
    };
    debug!("Fetched {} entries", entries.len());

    let mut palette = request.colors.clone();
    if request.category == Category::Languages {
        let registry_colors = registry_color_map(registry.fetch().await?);
        palette = colors::merge(Some(registry_colors), palette);
    }
    let palette = colors::normalize(colors::merge(palette, request.group_colors.clone()));

    let entries = grouping::group(entries, request.groups.as_ref());
    let entries = filter::hide(entries, request.hide.as_ref());

    Ok(ShapedChart {
        entries,
        colors: palette,
    })
}
