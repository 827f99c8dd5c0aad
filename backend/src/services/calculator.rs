//! Calculator service
//!
//! Runs a calculator request end to end:
//! - structural validation of the payload
//! - unit normalization using the configured defaults
//! - dispatch to the shared calculators
//! - outcome logging and metrics

use crate::config::CalculatorConfig;
use crate::error::ApiError;
use chrono::{NaiveDate, Utc};
use std::time::Instant;
use tracing::{debug, info, warn};
use validator::Validate;
use wellness_shared::{calculate, Calculation, CalculatorError, CalculatorInput, CalculatorKind};

pub struct CalculatorService;

impl CalculatorService {
    /// Run `kind` against `input`, anchoring date-derived values at today (UTC)
    pub fn run(
        config: &CalculatorConfig,
        kind: CalculatorKind,
        input: CalculatorInput,
    ) -> Result<Calculation, ApiError> {
        Self::run_on(config, kind, input, Utc::now().date_naive())
    }

    /// Same as [`CalculatorService::run`] with an explicit reference date
    pub fn run_on(
        config: &CalculatorConfig,
        kind: CalculatorKind,
        input: CalculatorInput,
        today: NaiveDate,
    ) -> Result<Calculation, ApiError> {
        let started = Instant::now();

        if let Err(errors) = input.validate() {
            record_outcome(kind, "invalid");
            return Err(errors.into());
        }

        let result = input
            .into_si(config.default_weight_unit, config.default_height_unit)
            .and_then(|si| calculate(kind, &si, today));

        metrics::histogram!("calculation_duration_seconds", "calculator" => kind.as_str())
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(calculation) => {
                record_outcome(kind, "ok");
                info!(
                    calculator = %kind,
                    value = calculation.result.value,
                    category = %calculation.result.category,
                    "Calculation completed"
                );
                Ok(calculation)
            }
            Err(err) => {
                let outcome = match &err {
                    CalculatorError::InvalidInput { .. } => "invalid",
                    CalculatorError::UnsupportedCategory { .. } => "unsupported",
                };
                record_outcome(kind, outcome);
                warn!(calculator = %kind, field = ?err.field(), error = %err, "Calculation rejected");
                Err(err.into())
            }
        }
    }

    /// Resolve a calculator name from the URL path
    pub fn parse_kind(name: &str) -> Result<CalculatorKind, ApiError> {
        name.parse::<CalculatorKind>().map_err(|err| {
            debug!(name, "Unknown calculator requested");
            ApiError::NotFound(err.to_string())
        })
    }
}

fn record_outcome(kind: CalculatorKind, outcome: &'static str) {
    metrics::counter!(
        "calculations_total",
        "calculator" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
