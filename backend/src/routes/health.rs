//! Health check endpoints
//!
//! Provides Kubernetes-compatible health check endpoints:
//! - /health - Basic health check
//! - /health/ready - Readiness check (runs a calculator self-check)
//! - /health/live - Liveness check (always returns OK if server is running)

use axum::{http::StatusCode, Json};
use serde::Serialize;
use wellness_shared::{calculate_bmi_result, BmiCategory};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub calculators: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}

/// 70 kg at 170 cm must come out as BMI 24.2, normal weight
fn calculator_self_check() -> CheckStatus {
    match calculate_bmi_result(70.0, 170.0) {
        Ok(r) if r.value == 24.2 && r.category == BmiCategory::Normal => CheckStatus {
            status: "healthy".to_string(),
            message: None,
        },
        Ok(r) => CheckStatus {
            status: "unhealthy".to_string(),
            message: Some(format!("unexpected BMI self-check result {:.2}", r.value)),
        },
        Err(e) => CheckStatus {
            status: "unhealthy".to_string(),
            message: Some(e.to_string()),
        },
    }
}

/// Readiness check - checks if the service is ready to accept traffic
/// Returns 503 if the calculator self-check fails
pub async fn readiness_check() -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let calc_check = calculator_self_check();
    let is_healthy = calc_check.status == "healthy";

    let response = HealthResponse {
        status: if is_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(HealthChecks {
            calculators: calc_check,
        }),
    };

    if is_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness check - checks if the service is alive
/// Always returns OK if the server is running
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}
