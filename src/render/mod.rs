//! Turns a [ShapedChart] into an artifact on disk that can be located again by its id.

pub mod json;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::Result,
    pipeline::{colors, entry::UsageEntry, ChartSize, ShapedChart},
};

/// Only the longest entries are drawn, the rest stay in the shaped entries.
pub const MAX_SLICES: usize = 5;

/// Matplotlib's tab10, used for slices without a color of their own.
pub const FALLBACK_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, id: Uuid, chart: &ShapedChart, size: ChartSize) -> Result<()>;

    /// Finds a previously rendered artifact.
    async fn find(&self, id: Uuid) -> Result<Option<PathBuf>>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub percent: f64,
    pub color: String,
}

/// Pairs the first [MAX_SLICES] entries with the color they are drawn with. Entries are expected
/// to be sorted longest first.
pub fn slices(chart: &ShapedChart) -> Vec<Slice> {
    chart
        .entries
        .iter()
        .take(MAX_SLICES)
        .enumerate()
        .map(|(index, entry)| Slice {
            label: legend_label(entry),
            percent: entry.percent,
            color: chart
                .colors
                .as_ref()
                .and_then(|map| colors::resolve(map, &entry.name))
                .unwrap_or(FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()])
                .to_owned(),
        })
        .collect()
}

pub fn legend_label(entry: &UsageEntry) -> String {
    format!("{} {}% - {}", entry.name, entry.percent, entry.text)
}
