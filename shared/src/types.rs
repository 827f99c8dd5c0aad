//! Request and response types shared by the HTTP and WASM surfaces

use crate::calculator::CalculatorKind;
use crate::errors::CalcResult;
use crate::health_metrics::{
    BmiResult, BodyFatResult, IdealWeightResult, TdeeResult, WaterIntakeResult,
};
use crate::health_score::HealthScoreResult;
use crate::interpretation::CalculatorResult;
use crate::pregnancy::PregnancyWeightGainResult;
use crate::units::{HeightUnit, WeightUnit};
use crate::validation::{parse_age, parse_date, parse_number, parse_whole_number};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Calculator form payload
///
/// Every field is optional; the selected calculator decides which ones are
/// required. Lengths are in `height_unit` (default cm) and weights in
/// `weight_unit` (default kg) until [`CalculatorInput::into_si`] is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CalculatorInput {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[validate(range(max = 130))]
    pub age_years: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 32))]
    pub sex: Option<String>,
    #[validate(length(max = 32))]
    pub activity_level: Option<String>,
    pub waist: Option<f64>,
    pub neck: Option<f64>,
    pub hip: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub bmi: Option<f64>,
    #[validate(length(max = 32))]
    pub bmr_method: Option<String>,
    pub pre_pregnancy_weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub current_week: Option<u32>,
    pub last_menstrual_period: Option<NaiveDate>,
    #[validate(length(max = 16))]
    pub weight_unit: Option<String>,
    #[validate(length(max = 16))]
    pub height_unit: Option<String>,
}

impl CalculatorInput {
    /// Build an input from raw form values
    ///
    /// Blank values count as absent and unknown keys are ignored. Numbers are
    /// parsed strictly: "abc" is an error for its field, never zero.
    pub fn from_form_fields<'a, I>(fields: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut input = Self::default();
        for (key, raw) in fields {
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "height" => input.height = Some(parse_number("height", value)?),
                "weight" => input.weight = Some(parse_number("weight", value)?),
                "waist" => input.waist = Some(parse_number("waist", value)?),
                "neck" => input.neck = Some(parse_number("neck", value)?),
                "hip" => input.hip = Some(parse_number("hip", value)?),
                "body_fat_percent" => input.body_fat_percent = Some(parse_number("body_fat_percent", value)?),
                "bmi" => input.bmi = Some(parse_number("bmi", value)?),
                "pre_pregnancy_weight" => {
                    input.pre_pregnancy_weight = Some(parse_number("pre_pregnancy_weight", value)?)
                }
                "current_weight" => input.current_weight = Some(parse_number("current_weight", value)?),
                "age_years" => input.age_years = Some(parse_age("age_years", value)?),
                "current_week" => input.current_week = Some(parse_whole_number("current_week", value)?),
                "date_of_birth" => input.date_of_birth = Some(parse_date("date_of_birth", value)?),
                "last_menstrual_period" => {
                    input.last_menstrual_period = Some(parse_date("last_menstrual_period", value)?)
                }
                "sex" => input.sex = Some(value.to_string()),
                "activity_level" => input.activity_level = Some(value.to_string()),
                "bmr_method" => input.bmr_method = Some(value.to_string()),
                "weight_unit" => input.weight_unit = Some(value.to_string()),
                "height_unit" => input.height_unit = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(input)
    }

    /// Convert every length to cm and every weight to kg
    ///
    /// Units named in the payload win over the supplied defaults. The
    /// returned input has both unit fields cleared.
    pub fn into_si(self, default_weight: WeightUnit, default_height: HeightUnit) -> CalcResult<Self> {
        let weight_unit = match self.weight_unit.as_deref() {
            Some(u) => u.parse::<WeightUnit>()?,
            None => default_weight,
        };
        let height_unit = match self.height_unit.as_deref() {
            Some(u) => u.parse::<HeightUnit>()?,
            None => default_height,
        };
        let kg = |v: Option<f64>| v.map(|v| weight_unit.to_kg(v));
        let cm = |v: Option<f64>| v.map(|v| height_unit.to_cm(v));

        Ok(Self {
            height: cm(self.height),
            weight: kg(self.weight),
            waist: cm(self.waist),
            neck: cm(self.neck),
            hip: cm(self.hip),
            pre_pregnancy_weight: kg(self.pre_pregnancy_weight),
            current_weight: kg(self.current_weight),
            weight_unit: None,
            height_unit: None,
            ..self
        })
    }
}

/// Full numeric breakdown behind a [`CalculatorResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationDetails {
    Bmi(BmiResult),
    Tdee(TdeeResult),
    BodyFat(BodyFatResult),
    IdealWeight(IdealWeightResult),
    WaterIntake(WaterIntakeResult),
    PregnancyWeightGain(PregnancyWeightGainResult),
    HealthScore(HealthScoreResult),
}

/// Response of a calculator run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub calculator: CalculatorKind,
    pub result: CalculatorResult,
    pub details: CalculationDetails,
}

/// Catalog entry describing one calculator
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorInfo {
    pub calculator: CalculatorKind,
    pub description: &'static str,
    pub required_fields: &'static [&'static str],
    pub optional_fields: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_si_converts_imperial() {
        let input = CalculatorInput {
            height: Some(70.0),
            weight: Some(154.0),
            waist: Some(34.0),
            weight_unit: Some("lbs".to_string()),
            height_unit: Some("in".to_string()),
            ..Default::default()
        };
        let si = input.into_si(WeightUnit::Kg, HeightUnit::Cm).unwrap();
        assert!((si.height.unwrap() - 177.8).abs() < 1e-9);
        assert!((si.weight.unwrap() - 69.853).abs() < 0.001);
        assert!((si.waist.unwrap() - 86.36).abs() < 1e-9);
        assert!(si.weight_unit.is_none());
        assert!(si.neck.is_none());
    }

    #[test]
    fn test_into_si_uses_defaults() {
        let input = CalculatorInput {
            weight: Some(11.0),
            ..Default::default()
        };
        let si = input.into_si(WeightUnit::Stone, HeightUnit::Cm).unwrap();
        assert!((si.weight.unwrap() - 69.853).abs() < 0.001);
    }

    #[test]
    fn test_into_si_rejects_unknown_unit() {
        let input = CalculatorInput {
            weight_unit: Some("grain".to_string()),
            ..Default::default()
        };
        assert!(input.into_si(WeightUnit::Kg, HeightUnit::Cm).is_err());
    }

    #[test]
    fn test_from_form_fields() {
        let input = CalculatorInput::from_form_fields([
            ("height", " 170 "),
            ("weight", "70.5"),
            ("age_years", "30"),
            ("sex", "female"),
            ("hip", ""),
            ("last_menstrual_period", "2024-01-13"),
            ("submit", "Calculate"),
        ])
        .unwrap();
        assert_eq!(input.height, Some(170.0));
        assert_eq!(input.weight, Some(70.5));
        assert_eq!(input.age_years, Some(30));
        assert_eq!(input.sex.as_deref(), Some("female"));
        assert!(input.hip.is_none());
        assert_eq!(input.last_menstrual_period, NaiveDate::from_ymd_opt(2024, 1, 13));
    }

    #[test]
    fn test_from_form_fields_rejects_non_numeric_text() {
        let err = CalculatorInput::from_form_fields([("height", "170"), ("weight", "seventy")]).unwrap_err();
        assert_eq!(err.field(), Some("weight"));

        let err = CalculatorInput::from_form_fields([("current_week", "12.5")]).unwrap_err();
        assert_eq!(err.field(), Some("current_week"));
    }

    #[test]
    fn test_validate_string_lengths() {
        let input = CalculatorInput {
            sex: Some("x".repeat(100)),
            ..Default::default()
        };
        assert!(input.validate().is_err());
        assert!(CalculatorInput::default().validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let input: CalculatorInput =
            serde_json::from_str(r#"{"height": 170, "weight": 70, "date_of_birth": "1990-05-01"}"#).unwrap();
        assert_eq!(input.height, Some(170.0));
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 1));
        assert!(input.sex.is_none());
    }
}
