// Charting backend trait - keeps the renderer independent of any charting library
use crate::domain::chart::{ProportionChart, TimeSeriesChart};
use async_trait::async_trait;
use serde_json::Value;

/// Opaque handle to a chart owned by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[async_trait]
pub trait ChartBackend: Send + Sync {
    /// Draw a multi-series line chart into the given surface
    async fn render_time_series(&self, surface: &str, chart: &TimeSeriesChart) -> ChartHandle;

    /// Draw a single-series proportional chart into the given surface
    async fn render_proportions(&self, surface: &str, chart: &ProportionChart) -> ChartHandle;

    /// Replace series data positionally and redraw.
    /// Series beyond `series.len()` keep their current values.
    async fn update_time_series(&self, handle: ChartHandle, series: Vec<Vec<f64>>);

    /// Replace the single series and redraw
    async fn update_proportions(&self, handle: ChartHandle, values: Vec<f64>);

    /// Current dataset arrays, in series order
    async fn datasets(&self, handle: ChartHandle) -> Option<Vec<Vec<f64>>>;

    /// Backend-native payload a client needs to draw the chart
    async fn describe(&self, handle: ChartHandle) -> Option<Value>;

    async fn destroy(&self, handle: ChartHandle);
}
