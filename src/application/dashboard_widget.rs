// Banking dashboard widget - composes the fetcher, the chart renderer and the scoped loops
use crate::application::action_registry::{ClientAction, MountedAction};
use crate::application::chart_backend::ChartBackend;
use crate::application::chart_renderer::ChartRenderer;
use crate::application::dashboard_source::DashboardSource;
use crate::application::lifecycle::TaskGuard;
use crate::application::page_view::PageView;
use crate::application::pulse::{reset_cards, spawn_pulse_loop};
use crate::domain::error::DashboardError;
use crate::domain::snapshot::DashboardSnapshot;
use crate::infrastructure::config::{DashboardConfig, PulseConfig, RefreshConfig, WidgetConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

/// Render state of a mounted dashboard, as handed to the shell
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub action: String,
    pub portfolio_chart: Option<Value>,
    pub customer_chart: Option<Value>,
    pub last_refreshed: Option<String>,
}

/// Registered client action; each mount builds a fresh widget instance
#[derive(Clone)]
pub struct BankingDashboard {
    source: Arc<dyn DashboardSource>,
    backend: Arc<dyn ChartBackend>,
    page: Arc<dyn PageView>,
    widget_config: WidgetConfig,
    pulse_config: PulseConfig,
    refresh_config: RefreshConfig,
}

impl BankingDashboard {
    pub fn new(
        source: Arc<dyn DashboardSource>,
        backend: Arc<dyn ChartBackend>,
        page: Arc<dyn PageView>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            source,
            backend,
            page,
            widget_config: config.widget.clone(),
            pulse_config: config.pulse.clone(),
            refresh_config: config.refresh.clone(),
        }
    }

    pub fn instance(&self) -> Arc<DashboardWidget> {
        Arc::new(DashboardWidget {
            source: self.source.clone(),
            page: self.page.clone(),
            widget_config: self.widget_config.clone(),
            pulse_config: self.pulse_config.clone(),
            refresh_config: self.refresh_config.clone(),
            renderer: Mutex::new(ChartRenderer::new(self.backend.clone())),
            last_refreshed: Mutex::new(None),
        })
    }
}

#[async_trait]
impl ClientAction for BankingDashboard {
    async fn mount(&self) -> Box<dyn MountedAction> {
        Box::new(self.instance().mount().await)
    }
}

pub struct DashboardWidget {
    source: Arc<dyn DashboardSource>,
    page: Arc<dyn PageView>,
    widget_config: WidgetConfig,
    pulse_config: PulseConfig,
    refresh_config: RefreshConfig,
    renderer: Mutex<ChartRenderer>,
    last_refreshed: Mutex<Option<DateTime<Utc>>>,
}

impl DashboardWidget {
    pub async fn initialize_charts(&self) {
        self.renderer
            .lock()
            .await
            .initialize(
                self.page.as_ref(),
                &self.widget_config.portfolio_surface,
                &self.widget_config.customer_surface,
            )
            .await;
    }

    pub async fn apply_snapshot(&self, snapshot: &DashboardSnapshot) {
        self.renderer.lock().await.apply_snapshot(snapshot).await;
    }

    /// Fetch a snapshot and apply it. Charts are untouched on failure.
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        let snapshot = self.source.fetch_snapshot().await?;
        self.apply_snapshot(&snapshot).await;
        *self.last_refreshed.lock().await = Some(Utc::now());
        Ok(())
    }

    /// Refresh, logging and swallowing any failure
    pub async fn load_dashboard_data(&self) {
        if let Err(e) = self.refresh().await {
            tracing::error!("Error loading dashboard data: {}", e);
        }
    }

    pub async fn view(&self) -> DashboardView {
        let renderer = self.renderer.lock().await;
        let backend = renderer.backend();

        let portfolio_chart = match renderer.line_chart() {
            Some(handle) => backend.describe(handle).await,
            None => None,
        };
        let customer_chart = match renderer.doughnut_chart() {
            Some(handle) => backend.describe(handle).await,
            None => None,
        };

        DashboardView {
            action: self.widget_config.action_key.clone(),
            portfolio_chart,
            customer_chart,
            last_refreshed: self.last_refreshed.lock().await.map(|t| t.to_rfc3339()),
        }
    }

    pub async fn teardown(&self) {
        self.renderer.lock().await.teardown().await;
    }

    /// Initialise the charts, load data once and start the loops this mount owns
    pub async fn mount(self: Arc<Self>) -> MountedDashboard {
        self.initialize_charts().await;
        self.load_dashboard_data().await;

        let pulse_loop = self
            .pulse_config
            .active_interval()
            .map(|period| spawn_pulse_loop(self.page.clone(), self.pulse_config.clone(), period));
        let refresh_loop = self
            .refresh_config
            .data_interval()
            .map(|period| spawn_refresh_loop(self.clone(), period));

        tracing::info!(
            "Mounted {} (pulse: {}, data refresh: {:?})",
            self.widget_config.action_key,
            pulse_loop.is_some(),
            self.refresh_config.data_interval()
        );

        MountedDashboard {
            widget: self,
            pulse_loop,
            refresh_loop,
            torn_down: false,
        }
    }
}

fn spawn_refresh_loop(widget: Arc<DashboardWidget>, period: Duration) -> TaskGuard {
    TaskGuard::spawn("dashboard-data-refresh", async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = IntervalStream::new(ticker);
        while ticks.next().await.is_some() {
            widget.load_dashboard_data().await;
        }
    })
}

/// A mounted widget. Its loops stop and its charts are destroyed on unmount;
/// dropping it without unmounting does the same on a best-effort basis.
pub struct MountedDashboard {
    widget: Arc<DashboardWidget>,
    pulse_loop: Option<TaskGuard>,
    refresh_loop: Option<TaskGuard>,
    torn_down: bool,
}

impl MountedDashboard {
    pub fn widget(&self) -> &Arc<DashboardWidget> {
        &self.widget
    }

    pub async fn view(&self) -> DashboardView {
        self.widget.view().await
    }

    pub async fn unmount(mut self) {
        if let Some(pulse_loop) = self.pulse_loop.take() {
            pulse_loop.stop().await;
        }
        if let Some(refresh_loop) = self.refresh_loop.take() {
            refresh_loop.stop().await;
        }

        reset_cards(self.widget.page.as_ref(), &self.widget.pulse_config).await;
        self.widget.teardown().await;
        self.torn_down = true;

        tracing::info!("Unmounted {}", self.widget.widget_config.action_key);
    }
}

impl Drop for MountedDashboard {
    fn drop(&mut self) {
        self.pulse_loop.take();
        self.refresh_loop.take();
        if self.torn_down {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let widget = self.widget.clone();
                runtime.spawn(async move {
                    reset_cards(widget.page.as_ref(), &widget.pulse_config).await;
                    widget.teardown().await;
                });
            }
            Err(_) => {
                tracing::warn!(
                    "{} dropped outside a runtime; charts were not destroyed",
                    self.widget.widget_config.action_key
                );
            }
        }
    }
}

#[async_trait]
impl MountedAction for MountedDashboard {
    async fn state(&self) -> Value {
        serde_json::to_value(self.view().await).unwrap_or_default()
    }

    async fn unmount(self: Box<Self>) {
        let mounted = *self;
        mounted.unmount().await;
    }
}
