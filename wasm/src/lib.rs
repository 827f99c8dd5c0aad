//! Wellness WASM Module
//!
//! WebAssembly bindings so the browser can run the same calculators as the
//! backend. Every export takes the calculator form as a JSON string and
//! returns the serialized `Calculation`, or throws with the error message.

use chrono::{NaiveDate, Utc};
use wasm_bindgen::prelude::*;
use wellness_shared::units::{HeightUnit, WeightUnit};
use wellness_shared::{calculate as run_calculator, CalculatorError, CalculatorInput, CalculatorKind};

/// Parse, normalize units and run one calculator; the result is JSON
fn calculate_json(kind: CalculatorKind, input_json: &str, today: NaiveDate) -> Result<String, CalculatorError> {
    let input: CalculatorInput = serde_json::from_str(input_json)
        .map_err(|e| CalculatorError::invalid("input", e.to_string()))?;
    let input = input.into_si(WeightUnit::Kg, HeightUnit::Cm)?;
    let calculation = run_calculator(kind, &input, today)?;
    serde_json::to_string(&calculation).map_err(|e| CalculatorError::invalid("input", e.to_string()))
}

/// Same as [`calculate_json`] for a flat object of raw form values
///
/// Values may be strings or numbers; strings are parsed strictly.
fn calculate_form_json(kind: CalculatorKind, form_json: &str, today: NaiveDate) -> Result<String, CalculatorError> {
    let form: serde_json::Map<String, serde_json::Value> = serde_json::from_str(form_json)
        .map_err(|e| CalculatorError::invalid("input", e.to_string()))?;
    let fields: Vec<(&str, String)> = form
        .iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(text) => Some((key.as_str(), text.clone())),
            serde_json::Value::Number(n) => Some((key.as_str(), n.to_string())),
            _ => None,
        })
        .collect();
    let input = CalculatorInput::from_form_fields(fields.iter().map(|(k, v)| (*k, v.as_str())))?
        .into_si(WeightUnit::Kg, HeightUnit::Cm)?;
    let calculation = run_calculator(kind, &input, today)?;
    serde_json::to_string(&calculation).map_err(|e| CalculatorError::invalid("input", e.to_string()))
}

fn run(kind: CalculatorKind, input_json: &str) -> Result<String, JsError> {
    calculate_json(kind, input_json, Utc::now().date_naive()).map_err(|e| JsError::new(&e.user_message()))
}

/// Run the calculator named `kind` (e.g. "bmi", "body-fat")
#[wasm_bindgen]
pub fn calculate(kind: &str, input_json: &str) -> Result<String, JsError> {
    let kind: CalculatorKind = kind.parse().map_err(|e: CalculatorError| JsError::new(&e.to_string()))?;
    run(kind, input_json)
}

/// Run the calculator named `kind` on raw form values, e.g. `{"height": "170"}`
#[wasm_bindgen]
pub fn calculate_form(kind: &str, form_json: &str) -> Result<String, JsError> {
    let kind: CalculatorKind = kind.parse().map_err(|e: CalculatorError| JsError::new(&e.to_string()))?;
    calculate_form_json(kind, form_json, Utc::now().date_naive()).map_err(|e| JsError::new(&e.user_message()))
}

/// List the calculators and their required and optional fields as JSON
#[wasm_bindgen]
pub fn list_calculators() -> Result<String, JsError> {
    let infos: Vec<_> = CalculatorKind::ALL.iter().map(|k| k.info()).collect();
    serde_json::to_string(&infos).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
pub fn calculate_bmi(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::Bmi, input_json)
}

#[wasm_bindgen]
pub fn calculate_tdee(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::Tdee, input_json)
}

/// U.S. Navy circumference method; `hip` is required for women
#[wasm_bindgen]
pub fn calculate_body_fat(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::BodyFat, input_json)
}

#[wasm_bindgen]
pub fn calculate_ideal_weight(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::IdealWeight, input_json)
}

#[wasm_bindgen]
pub fn calculate_water_intake(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::WaterIntake, input_json)
}

#[wasm_bindgen]
pub fn calculate_pregnancy_weight_gain(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::PregnancyWeightGain, input_json)
}

#[wasm_bindgen]
pub fn calculate_health_score(input_json: &str) -> Result<String, JsError> {
    run(CalculatorKind::HealthScore, input_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_bmi_json() {
        let out = calculate_json(CalculatorKind::Bmi, r#"{"height": 175, "weight": 70}"#, today()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["calculator"], "bmi");
        assert_eq!(json["result"]["value"], 22.9);
    }

    #[test]
    fn test_imperial_units_are_converted() {
        let out = calculate_json(
            CalculatorKind::WaterIntake,
            r#"{"weight": 154, "weight_unit": "lbs", "activity_level": "sedentary"}"#,
            today(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["result"]["value"], 2.1);
    }

    #[test]
    fn test_tdee_age_from_date_of_birth() {
        let out = calculate_json(
            CalculatorKind::Tdee,
            r#"{"height": 180, "weight": 80, "date_of_birth": "1994-01-15", "sex": "m", "activity_level": "moderately_active"}"#,
            today(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["details"]["bmr"], 1780.0);
    }

    #[test]
    fn test_missing_field_error() {
        let err = calculate_json(CalculatorKind::Bmi, r#"{"weight": 70}"#, today()).unwrap_err();
        assert_eq!(err.field(), Some("height"));
    }

    #[test]
    fn test_form_values_are_parsed() {
        let out = calculate_form_json(
            CalculatorKind::Bmi,
            r#"{"height": "170", "weight": 70, "hip": ""}"#,
            today(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["result"]["value"], 24.2);
    }

    #[test]
    fn test_form_rejects_non_numeric_text() {
        let err = calculate_form_json(CalculatorKind::Bmi, r#"{"height": "tall", "weight": "70"}"#, today())
            .unwrap_err();
        assert_eq!(err.field(), Some("height"));
    }

    #[test]
    fn test_malformed_json_error() {
        let err = calculate_json(CalculatorKind::Bmi, "not json", today()).unwrap_err();
        assert_eq!(err.field(), Some("input"));
    }
}
