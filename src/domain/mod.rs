// Domain layer - Snapshot schema, chart models and errors
pub mod chart;
pub mod error;
pub mod snapshot;
