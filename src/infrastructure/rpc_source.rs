// JSON-RPC dashboard source - calls the backend's model method over HTTP
use crate::application::dashboard_source::DashboardSource;
use crate::domain::error::DashboardError;
use crate::domain::snapshot::DashboardSnapshot;
use crate::infrastructure::config::BackendConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct RpcDashboardSource {
    client: reqwest::Client,
    base_url: String,
    model: String,
    method: String,
    session_id: Option<String>,
    next_request_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
    #[serde(default)]
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        Self::fetch(err.to_string())
    }
}

impl RpcError {
    fn describe(&self) -> String {
        let detail = self
            .data
            .as_ref()
            .and_then(|d| match (&d.name, &d.message) {
                (Some(name), Some(message)) => Some(format!("{}: {}", name, message)),
                (None, Some(message)) => Some(message.clone()),
                _ => None,
            });

        match (self.code, detail) {
            (Some(code), Some(detail)) => format!("{} ({}): {}", self.message, code, detail),
            (Some(code), None) => format!("{} ({})", self.message, code),
            (None, Some(detail)) => format!("{}: {}", self.message, detail),
            (None, None) => self.message.clone(),
        }
    }
}

impl RpcDashboardSource {
    pub fn new(config: &BackendConfig) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            method: config.method.clone(),
            session_id: config.session_id.clone(),
            next_request_id: AtomicU64::new(1),
        })
    }

    fn call_url(&self) -> String {
        format!(
            "{}/web/dataset/call_kw/{}/{}",
            self.base_url, self.model, self.method
        )
    }

    async fn call_kw(&self) -> Result<Value, DashboardError> {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let envelope = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "id": id,
            "params": {
                "model": self.model,
                "method": self.method,
                "args": [],
                "kwargs": {},
            }
        });

        let mut request = self.client.post(self.call_url()).json(&envelope);
        if let Some(session_id) = &self.session_id {
            request = request.header(reqwest::header::COOKIE, format!("session_id={}", session_id));
        }

        tracing::debug!("Calling {}.{} (request {})", self.model, self.method, id);
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::fetch(format!(
                "{}.{} failed with status {}: {}",
                self.model, self.method, status, body
            )));
        }

        let rpc = response.json::<RpcResponse>().await?;
        if let Some(error) = rpc.error {
            return Err(DashboardError::fetch(error.describe()));
        }

        Ok(rpc.result)
    }
}

#[async_trait]
impl DashboardSource for RpcDashboardSource {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, DashboardError> {
        let result = self.call_kw().await?;
        DashboardSnapshot::from_value(result)
    }
}
