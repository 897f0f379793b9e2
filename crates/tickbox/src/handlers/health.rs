//! Health check endpoint.
//!
//! `/api/v1/health` reports the process as running and actively probes the
//! store and, when enabled, the cache. A failed probe is reported, not raised.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Connected,
    Disconnected,
    Disabled,
}

impl DependencyStatus {
    fn from_probe<E: std::fmt::Display>(dependency: &str, probe: Result<(), E>) -> Self {
        match probe {
            Ok(()) => Self::Connected,
            Err(err) => {
                tracing::warn!(dependency, error = %err, "Health probe failed");
                Self::Disconnected
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub storage: DependencyStatus,
    pub cache: DependencyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub app_status: String,
    pub timestamp: DateTime<Utc>,
    pub dependencies: Dependencies,
}

/// GET /api/v1/health - Dependency health report.
///
/// Always answers 200; inspect `dependencies` for the probe results.
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthReport> {
    let storage = DependencyStatus::from_probe("storage", state.todos.ping_storage().await);

    let cache = match &state.cache {
        Some(cache) => DependencyStatus::from_probe("cache", cache.ping().await),
        None => DependencyStatus::Disabled,
    };

    ApiResponse::ok(
        "Service is running",
        HealthReport {
            app_status: "running".to_string(),
            timestamp: Utc::now(),
            dependencies: Dependencies { storage, cache },
        },
    )
}
