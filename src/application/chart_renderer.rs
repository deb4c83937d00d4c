// Chart renderer - owns the portfolio and customer charts of one widget instance
use crate::application::chart_backend::{ChartBackend, ChartHandle};
use crate::application::page_view::PageView;
use crate::domain::chart::{ProportionChart, TimeSeriesChart};
use crate::domain::snapshot::DashboardSnapshot;
use std::sync::Arc;

pub struct ChartRenderer {
    backend: Arc<dyn ChartBackend>,
    line_chart: Option<ChartHandle>,
    doughnut_chart: Option<ChartHandle>,
}

impl ChartRenderer {
    pub fn new(backend: Arc<dyn ChartBackend>) -> Self {
        Self {
            backend,
            line_chart: None,
            doughnut_chart: None,
        }
    }

    pub fn line_chart(&self) -> Option<ChartHandle> {
        self.line_chart
    }

    pub fn doughnut_chart(&self) -> Option<ChartHandle> {
        self.doughnut_chart
    }

    pub fn backend(&self) -> &Arc<dyn ChartBackend> {
        &self.backend
    }

    /// Build both charts with placeholder data. A chart whose surface is not
    /// attached is skipped and its handle stays `None`.
    pub async fn initialize(&mut self, page: &dyn PageView, line_target: &str, doughnut_target: &str) {
        if self.line_chart.is_none() {
            if page.surface_attached(line_target).await {
                let handle = self
                    .backend
                    .render_time_series(line_target, &TimeSeriesChart::portfolio_placeholder())
                    .await;
                self.line_chart = Some(handle);
            } else {
                tracing::debug!("Surface {} not attached, skipping portfolio chart", line_target);
            }
        }

        if self.doughnut_chart.is_none() {
            if page.surface_attached(doughnut_target).await {
                let handle = self
                    .backend
                    .render_proportions(doughnut_target, &ProportionChart::customer_placeholder())
                    .await;
                self.doughnut_chart = Some(handle);
            } else {
                tracing::debug!(
                    "Surface {} not attached, skipping customer chart",
                    doughnut_target
                );
            }
        }
    }

    /// Patch chart datasets from a snapshot. Datasets the snapshot lacks keep
    /// their current values.
    pub async fn apply_snapshot(&self, snapshot: &DashboardSnapshot) {
        if let (Some(handle), Some(portfolio)) = (self.line_chart, &snapshot.portfolio) {
            self.backend
                .update_time_series(
                    handle,
                    vec![portfolio.deposits.clone(), portfolio.loans.clone()],
                )
                .await;
        }

        if let (Some(handle), Some(shares)) = (self.doughnut_chart, &snapshot.customer_distribution) {
            self.backend.update_proportions(handle, shares.clone()).await;
        }
    }

    /// Destroy both charts; handles are cleared
    pub async fn teardown(&mut self) {
        for handle in [self.line_chart.take(), self.doughnut_chart.take()]
            .into_iter()
            .flatten()
        {
            self.backend.destroy(handle).await;
        }
    }
}
