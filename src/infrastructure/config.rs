use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub widget: WidgetConfig,
    pub pulse: PulseConfig,
    pub refresh: RefreshConfig,
    pub page: PageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Actions mounted as soon as the shell starts
    pub open_on_start: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            open_on_start: vec!["banking_dashboard".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    pub method: String,
    pub timeout_secs: u64,
    pub session_id: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8069".to_string(),
            model: "banking.dashboard".to_string(),
            method: "get_dashboard_data".to_string(),
            timeout_secs: 10,
            session_id: None,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WidgetConfig {
    pub action_key: String,
    pub portfolio_surface: String,
    pub customer_surface: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            action_key: "banking_dashboard".to_string(),
            portfolio_surface: "portfolioChart".to_string(),
            customer_surface: "customerChart".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PulseConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub stagger_ms: u64,
    pub duration_ms: u64,
    pub scale: f64,
    pub dashboard_marker: String,
    pub card_class: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 30_000,
            stagger_ms: 100,
            duration_ms: 200,
            scale: 1.02,
            dashboard_marker: "o_banking_dashboard_modern".to_string(),
            card_class: "metric-card".to_string(),
        }
    }
}

impl PulseConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Loop period, or `None` when pulsing is disabled or the interval is zero
    pub fn active_interval(&self) -> Option<Duration> {
        Some(self.interval()).filter(|period| self.enabled && !period.is_zero())
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RefreshConfig {
    /// Periodic data refresh; unset or zero keeps the fetch-once-per-mount behaviour
    pub data_interval_secs: Option<u64>,
}

impl RefreshConfig {
    pub fn data_interval(&self) -> Option<Duration> {
        self.data_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Layout of the page the shell renders the widget into
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub attached_surfaces: Vec<String>,
    pub container_class: String,
    pub card_class: String,
    pub metric_cards: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            attached_surfaces: vec!["portfolioChart".to_string(), "customerChart".to_string()],
            container_class: "o_banking_dashboard_modern".to_string(),
            card_class: "metric-card".to_string(),
            metric_cards: vec![
                "total_deposits".to_string(),
                "total_loans".to_string(),
                "active_customers".to_string(),
                "monthly_transactions".to_string(),
            ],
        }
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_dashboard_config_from("config/dashboard")
}

/// Optional config file at `path`, overlaid with `DASHBOARD__SECTION__KEY` variables
pub fn load_dashboard_config_from(path: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = parse("");
        assert_eq!(config.backend.model, "banking.dashboard");
        assert_eq!(config.backend.method, "get_dashboard_data");
        assert_eq!(config.widget.action_key, "banking_dashboard");
        assert_eq!(config.pulse.interval(), Duration::from_secs(30));
        assert_eq!(config.pulse.stagger(), Duration::from_millis(100));
        assert_eq!(config.pulse.duration(), Duration::from_millis(200));
        assert!(config.refresh.data_interval().is_none());
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = parse(
            r#"
            [backend]
            base_url = "https://erp.example.com"

            [refresh]
            data_interval_secs = 60

            [pulse]
            enabled = false
            "#,
        );
        assert_eq!(config.backend.base_url, "https://erp.example.com");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.refresh.data_interval(), Some(Duration::from_secs(60)));
        assert!(!config.pulse.enabled);
        assert_eq!(config.pulse.card_class, "metric-card");
    }

    #[test]
    fn test_pulse_active_interval() {
        assert_eq!(
            parse("").pulse.active_interval(),
            Some(Duration::from_secs(30))
        );
        assert!(parse("[pulse]\ninterval_ms = 0\n").pulse.active_interval().is_none());
        assert!(parse("[pulse]\nenabled = false\n").pulse.active_interval().is_none());
    }

    // Environment variables are process-wide, so every loader case lives in one test
    #[test]
    fn test_loader_reads_file_then_environment() {
        let shipped = load_dashboard_config().unwrap();
        assert_eq!(shipped.pulse.interval_ms, 30_000);
        assert_eq!(shipped.page.metric_cards.len(), 4);

        unsafe {
            std::env::set_var("DASHBOARD__PULSE__INTERVAL_MS", "5000");
            std::env::set_var("DASHBOARD__BACKEND__BASE_URL", "http://erp:8069");
        }
        let loaded = load_dashboard_config_from("config/no-such-dashboard");
        unsafe {
            std::env::remove_var("DASHBOARD__PULSE__INTERVAL_MS");
            std::env::remove_var("DASHBOARD__BACKEND__BASE_URL");
        }

        let config = loaded.unwrap();
        assert_eq!(config.pulse.interval_ms, 5000);
        assert_eq!(config.backend.base_url, "http://erp:8069");
        assert_eq!(config.backend.model, "banking.dashboard");
        assert_eq!(config.pulse.stagger_ms, 100);

        let defaults = load_dashboard_config_from("config/no-such-dashboard").unwrap();
        assert_eq!(defaults.backend.base_url, "http://localhost:8069");
        assert_eq!(defaults.pulse.interval_ms, 30_000);
    }

    #[test]
    fn test_zero_refresh_interval_disables_data_refresh() {
        let config = parse("[refresh]\ndata_interval_secs = 0\n");
        assert!(config.refresh.data_interval().is_none());
    }
}
