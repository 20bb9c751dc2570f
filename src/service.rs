use std::{path::PathBuf, sync::Arc};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    client::{ColorRegistry, StatsProvider},
    error::Result,
    pipeline::{shape_chart, ChartRequest, ShapedChart},
    render::Renderer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub id: Uuid,
    pub path: PathBuf,
}

/// Connects the pipeline to its providers and the renderer. Cheap to clone and share between
/// request handlers.
#[derive(Clone)]
pub struct ChartService {
    stats: Arc<dyn StatsProvider>,
    registry: Arc<dyn ColorRegistry>,
    renderer: Arc<dyn Renderer>,
}

impl ChartService {
    pub fn new(
        stats: Arc<dyn StatsProvider>,
        registry: Arc<dyn ColorRegistry>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            stats,
            registry,
            renderer,
        }
    }

    pub async fn shape(&self, request: &ChartRequest) -> Result<ShapedChart> {
        shape_chart(request, self.stats.as_ref(), self.registry.as_ref()).await
    }

    /// Shapes and renders a chart. Returns `None` when the renderer can't find the artifact it
    /// was asked to produce.
    pub async fn create_chart(&self, request: &ChartRequest) -> Result<Option<Chart>> {
        info!("Creating chart {}", request.id);

        let chart = self.shape(request).await?;
        self.render(request, &chart).await
    }

    /// Renders an already shaped chart under the request's id.
    pub async fn render(
        &self,
        request: &ChartRequest,
        chart: &ShapedChart,
    ) -> Result<Option<Chart>> {
        self.renderer.render(request.id, chart, request.size).await?;

        let Some(path) = self.renderer.find(request.id).await? else {
            warn!("Chart {} was rendered but can't be found", request.id);
            return Ok(None);
        };
        Ok(Some(Chart {
            id: request.id,
            path,
        }))
    }
}
