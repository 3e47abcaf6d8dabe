use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "OK".to_string(),
            timestamp: Utc::now(),
            uptime: state.started_at.elapsed().as_secs_f64(),
        },
    )
}

pub async fn root() -> &'static str {
    "Hello from acquisitions"
}

pub async fn api_index() -> ApiSuccess<ApiIndexResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ApiIndexResponseData {
            message: "Acquisitions API is running".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the router was built.
    pub uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiIndexResponseData {
    pub message: String,
}
