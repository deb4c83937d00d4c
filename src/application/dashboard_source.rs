// Source trait for dashboard snapshots
use crate::domain::error::DashboardError;
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Fetch one validated snapshot from the backend
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, DashboardError>;
}
