//! Pregnancy weight-gain guidance
//!
//! Total gain targets follow the IOM (2009) guidelines keyed by the
//! pre-pregnancy BMI category. The cumulative target at a given week is a
//! linear share of the 40-week total.

use crate::errors::{CalcResult, CalculatorError};
use crate::health_metrics::{calculate_bmi, classify_bmi, BmiCategory};
use crate::validation::{validate_gestational_week, validate_weight_field, MAX_GESTATIONAL_WEEK};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Length of a full-term pregnancy in weeks
pub const TERM_WEEKS: u32 = 40;

/// Recommended total gain (kg) over a full term
pub fn total_gain_range_kg(category: BmiCategory) -> (f64, f64) {
    match category {
        BmiCategory::Underweight => (12.5, 18.0),
        BmiCategory::Normal => (11.5, 16.0),
        BmiCategory::Overweight => (7.0, 11.5),
        BmiCategory::Obese => (5.0, 9.0),
    }
}

/// Recommended weekly gain (kg/week) in the second and third trimesters
pub fn weekly_gain_range_kg(category: BmiCategory) -> (f64, f64) {
    match category {
        BmiCategory::Underweight => (0.44, 0.58),
        BmiCategory::Normal => (0.35, 0.50),
        BmiCategory::Overweight => (0.23, 0.33),
        BmiCategory::Obese => (0.17, 0.27),
    }
}

/// Trimester of a gestational week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub fn of_week(week: u32) -> Self {
        match week {
            0..=13 => Trimester::First,
            14..=27 => Trimester::Second,
            _ => Trimester::Third,
        }
    }
}

/// Where the measured gain sits against the expected band for the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainStatus {
    BelowRange,
    WithinRange,
    AboveRange,
}

/// Input to the pregnancy calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PregnancyInput {
    pub height_cm: f64,
    pub pre_pregnancy_weight_kg: f64,
    /// Gestational week, 1-42
    pub current_week: u32,
    /// When present, the gain so far is assessed
    #[serde(default)]
    pub current_weight_kg: Option<f64>,
    /// When present, the due date is reported
    #[serde(default)]
    pub last_menstrual_period: Option<NaiveDate>,
}

/// Pregnancy weight-gain guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregnancyWeightGainResult {
    pub pre_pregnancy_bmi: f64,
    /// Pre-pregnancy BMI category
    pub category: BmiCategory,
    /// Recommended total gain over the whole pregnancy
    pub min_gain_kg: f64,
    pub max_gain_kg: f64,
    pub current_week: u32,
    pub trimester: Trimester,
    /// Cumulative gain expected by `current_week` (range midpoint)
    pub recommended_gain_so_far_kg: f64,
    pub expected_gain_so_far_min_kg: f64,
    pub expected_gain_so_far_max_kg: f64,
    pub weekly_gain_min_kg: f64,
    pub weekly_gain_max_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain_so_far_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_due_date: Option<NaiveDate>,
}

/// Share of the full-term gain expected by `week`; weeks past term count as term
fn term_fraction(week: u32) -> f64 {
    week.clamp(1, TERM_WEEKS) as f64 / TERM_WEEKS as f64
}

/// Calculate the recommended gain for the current week
pub fn calculate_pregnancy_weight_gain(input: &PregnancyInput) -> CalcResult<PregnancyWeightGainResult> {
    let pre_weight = validate_weight_field("pre_pregnancy_weight_kg", input.pre_pregnancy_weight_kg)?;
    let week = validate_gestational_week(input.current_week)?;
    let bmi = calculate_bmi(pre_weight, input.height_cm)?;

    let category = classify_bmi(bmi);
    let (min_total, max_total) = total_gain_range_kg(category);
    let (weekly_min, weekly_max) = weekly_gain_range_kg(category);
    let fraction = term_fraction(week);
    let expected_min = min_total * fraction;
    let expected_max = max_total * fraction;

    let (gain_so_far, status) = match input.current_weight_kg {
        Some(current) => {
            let current = validate_weight_field("current_weight_kg", current)?;
            let gain = current - pre_weight;
            let status = if gain < expected_min {
                GainStatus::BelowRange
            } else if gain > expected_max {
                GainStatus::AboveRange
            } else {
                GainStatus::WithinRange
            };
            (Some(gain), Some(status))
        }
        None => (None, None),
    };

    Ok(PregnancyWeightGainResult {
        pre_pregnancy_bmi: bmi,
        category,
        min_gain_kg: min_total,
        max_gain_kg: max_total,
        current_week: week,
        trimester: Trimester::of_week(week),
        recommended_gain_so_far_kg: (min_total + max_total) / 2.0 * fraction,
        expected_gain_so_far_min_kg: expected_min,
        expected_gain_so_far_max_kg: expected_max,
        weekly_gain_min_kg: weekly_min,
        weekly_gain_max_kg: weekly_max,
        gain_so_far_kg: gain_so_far,
        status,
        estimated_due_date: input.last_menstrual_period.map(estimated_due_date),
    })
}

/// Gestational week (1-based) from the first day of the last menstrual period
pub fn gestational_week_from_lmp(last_menstrual_period: NaiveDate, today: NaiveDate) -> CalcResult<u32> {
    let days = (today - last_menstrual_period).num_days();
    if days < 0 {
        return Err(CalculatorError::invalid(
            "last_menstrual_period",
            "cannot be in the future",
        ));
    }
    let week = (days / 7) as u32 + 1;
    if week > MAX_GESTATIONAL_WEEK {
        return Err(CalculatorError::invalid(
            "last_menstrual_period",
            format!("is more than {} weeks ago", MAX_GESTATIONAL_WEEK),
        ));
    }
    Ok(week)
}

/// Estimated due date (Naegele's rule: LMP + 280 days)
pub fn estimated_due_date(last_menstrual_period: NaiveDate) -> NaiveDate {
    last_menstrual_period + chrono::Duration::days(i64::from(TERM_WEEKS) * 7)
}
