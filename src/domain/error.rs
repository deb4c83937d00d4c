// Dashboard error taxonomy
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    /// Transport, server or decoding failure while fetching a snapshot
    #[error("fetch failed: {message}")]
    Fetch { message: String },

    /// The backend answered, but the payload does not match the snapshot schema
    #[error("malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    #[error("no client action registered under '{key}'")]
    UnknownAction { key: String },

    #[error("client action '{key}' is already registered")]
    DuplicateAction { key: String },
}

impl DashboardError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            reason: reason.into(),
        }
    }
}
