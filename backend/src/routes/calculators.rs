//! Calculator API routes

use crate::error::{ApiError, ApiResult};
use crate::services::CalculatorService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use wellness_shared::{Calculation, CalculatorInfo, CalculatorInput, CalculatorKind};

/// Create calculator routes
pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_calculators))
        .route("/:kind", post(run_calculator))
        .route("/:kind/form", post(run_calculator_form))
}

/// Calculator catalog
#[derive(Serialize)]
pub struct CalculatorListResponse {
    pub calculators: Vec<CalculatorInfo>,
}

/// GET /api/v1/calculators - List available calculators and their inputs
async fn list_calculators() -> Json<CalculatorListResponse> {
    Json(CalculatorListResponse {
        calculators: CalculatorKind::ALL.iter().map(|k| k.info()).collect(),
    })
}

/// POST /api/v1/calculators/:kind - Run a calculator
async fn run_calculator(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<CalculatorInput>, JsonRejection>,
) -> ApiResult<Json<Calculation>> {
    let kind = CalculatorService::parse_kind(&kind)?;
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let calculation = CalculatorService::run(&state.config().calculator, kind, input)?;
    Ok(Json(calculation))
}

/// POST /api/v1/calculators/:kind/form - Run a calculator on url-encoded form values
async fn run_calculator_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Form<HashMap<String, String>>, FormRejection>,
) -> ApiResult<Json<Calculation>> {
    let kind = CalculatorService::parse_kind(&kind)?;
    let Form(fields) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let input = CalculatorInput::from_form_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let calculation = CalculatorService::run(&state.config().calculator, kind, input)?;
    Ok(Json(calculation))
}
