use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::Result,
    pipeline::{entry::UsageEntry, ChartSize, ShapedChart},
    utils::time::date_to_artifact_suffix,
};

use super::{slices, Renderer, Slice};

const SEPARATOR: char = '_';

#[derive(Debug, Serialize)]
struct ChartDocument<'a> {
    id: Uuid,
    size: ChartSize,
    entries: &'a [UsageEntry],
    slices: Vec<Slice>,
}

/// Stores every chart as a JSON document named `{id}_{yy-mm-dd}.json` inside one directory.
///
/// Documents are never removed. The directory grows with every chart served and [Renderer::find]
/// scans all of it, so operators should prune old dates themselves.
pub struct JsonChartRenderer {
    dir: PathBuf,
}

impl JsonChartRenderer {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl Renderer for JsonChartRenderer {
    async fn render(&self, id: Uuid, chart: &ShapedChart, size: ChartSize) -> Result<()> {
        let document = ChartDocument {
            id,
            size,
            entries: &chart.entries,
            slices: slices(chart),
        };
        let file_name = format!(
            "{id}{SEPARATOR}{}.json",
            date_to_artifact_suffix(Local::now().date_naive())
        );
        let path = self.dir.join(file_name);

        debug!("Saving chart {id} into {path:?}");
        tokio::fs::write(&path, serde_json::to_vec_pretty(&document)?).await?;
        Ok(())
    }

    /// Linear scan over the directory.
    async fn find(&self, id: Uuid) -> Result<Option<PathBuf>> {
        debug!("Searching chart {id}");
        let id = id.to_string();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().contains(&id) {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }
}
