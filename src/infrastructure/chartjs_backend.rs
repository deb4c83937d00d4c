// Chart.js backend - renders charts as Chart.js configuration objects
use crate::application::chart_backend::{ChartBackend, ChartHandle};
use crate::domain::chart::{ProportionChart, TimeSeriesChart};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct RenderedChart {
    surface: String,
    config: Value,
    revision: u64,
}

#[derive(Debug, Default)]
pub struct ChartJsBackend {
    next_id: AtomicU64,
    charts: RwLock<HashMap<u64, RenderedChart>>,
}

impl ChartJsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charts currently alive
    pub async fn live_charts(&self) -> usize {
        self.charts.read().await.len()
    }

    #[cfg(test)]
    pub async fn revision(&self, handle: ChartHandle) -> Option<u64> {
        self.charts.read().await.get(&handle.id()).map(|c| c.revision)
    }

    async fn store(&self, surface: &str, config: Value) -> ChartHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.charts.write().await.insert(
            id,
            RenderedChart {
                surface: surface.to_string(),
                config,
                revision: 0,
            },
        );
        ChartHandle::new(id)
    }

    /// Swap dataset arrays in place, then count a redraw
    async fn patch_datasets(&self, handle: ChartHandle, series: Vec<Vec<f64>>) {
        let mut charts = self.charts.write().await;
        let Some(chart) = charts.get_mut(&handle.id()) else {
            tracing::warn!("Update for unknown chart {}", handle.id());
            return;
        };

        if let Some(datasets) = chart
            .config
            .pointer_mut("/data/datasets")
            .and_then(Value::as_array_mut)
        {
            for (dataset, values) in datasets.iter_mut().zip(series) {
                if let Some(dataset) = dataset.as_object_mut() {
                    dataset.insert("data".to_string(), json!(values));
                }
            }
        }
        chart.revision += 1;
    }
}

fn time_series_config(chart: &TimeSeriesChart) -> Value {
    let datasets: Vec<Value> = chart
        .series
        .iter()
        .map(|s| {
            json!({
                "label": s.label,
                "data": s.values,
                "borderColor": s.border_color,
                "backgroundColor": s.fill_color,
                "tension": chart.tension,
                "fill": chart.filled,
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": chart.labels,
            "datasets": datasets,
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "position": chart.legend.as_str() }
            },
            "scales": {
                "y": {
                    "beginAtZero": chart.begin_at_zero,
                    "grid": { "color": chart.grid_color }
                },
                "x": {
                    "grid": { "color": chart.grid_color }
                }
            }
        }
    })
}

fn proportion_config(chart: &ProportionChart) -> Value {
    json!({
        "type": "doughnut",
        "data": {
            "labels": chart.labels,
            "datasets": [{
                "data": chart.values,
                "backgroundColor": chart.colors,
                "borderWidth": chart.border_width,
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": chart.legend.as_str(),
                    "labels": {
                        "padding": chart.legend_padding,
                        "usePointStyle": true
                    }
                }
            }
        }
    })
}

#[async_trait]
impl ChartBackend for ChartJsBackend {
    async fn render_time_series(&self, surface: &str, chart: &TimeSeriesChart) -> ChartHandle {
        self.store(surface, time_series_config(chart)).await
    }

    async fn render_proportions(&self, surface: &str, chart: &ProportionChart) -> ChartHandle {
        self.store(surface, proportion_config(chart)).await
    }

    async fn update_time_series(&self, handle: ChartHandle, series: Vec<Vec<f64>>) {
        self.patch_datasets(handle, series).await;
    }

    async fn update_proportions(&self, handle: ChartHandle, values: Vec<f64>) {
        self.patch_datasets(handle, vec![values]).await;
    }

    async fn datasets(&self, handle: ChartHandle) -> Option<Vec<Vec<f64>>> {
        let charts = self.charts.read().await;
        let datasets = charts
            .get(&handle.id())?
            .config
            .pointer("/data/datasets")?
            .as_array()?;

        Some(
            datasets
                .iter()
                .map(|ds| {
                    ds.get("data")
                        .and_then(Value::as_array)
                        .map(|values| values.iter().filter_map(Value::as_f64).collect::<Vec<f64>>())
                        .unwrap_or_default()
                })
                .collect(),
        )
    }

    async fn describe(&self, handle: ChartHandle) -> Option<Value> {
        let charts = self.charts.read().await;
        let chart = charts.get(&handle.id())?;
        Some(json!({
            "surface": chart.surface,
            "revision": chart.revision,
            "config": chart.config,
        }))
    }

    async fn destroy(&self, handle: ChartHandle) {
        if let Some(chart) = self.charts.write().await.remove(&handle.id()) {
            tracing::debug!("Destroyed chart {} on surface {}", handle.id(), chart.surface);
        }
    }
}
