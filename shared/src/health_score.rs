//! Composite health score (0-100)
//!
//! score = (bmi_points + activity_points [+ body_fat_points]) / max_points × 100
//!
//! `max_points` only counts the components that were supplied, so a score
//! without a body fat reading is still on the 0-100 scale.

use crate::errors::CalcResult;
use crate::health_metrics::{
    classify_bmi, classify_body_fat, round_to, ActivityLevel, BiologicalSex, BmiCategory, BodyFatCategory,
    BMI_NORMAL_MAX, BMI_NORMAL_MIN,
};
use crate::validation::{validate_age, validate_bmi, validate_percentage};
use serde::{Deserialize, Serialize};

/// Points for a BMI inside the normal band
pub const BMI_WEIGHT: f64 = 60.0;
/// Points for the most active level
pub const ACTIVITY_WEIGHT: f64 = 25.0;
/// Points for an athletic/fitness body fat reading
pub const BODY_FAT_WEIGHT: f64 = 15.0;
/// Share of the BMI points lost per BMI unit outside the normal band
pub const BMI_PENALTY_PER_UNIT: f64 = 0.1;

/// Score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthScoreCategory {
    Poor,
    BelowAverage,
    Fair,
    Good,
    Excellent,
}

impl HealthScoreCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            HealthScoreCategory::Excellent
        } else if score >= 80.0 {
            HealthScoreCategory::Good
        } else if score >= 70.0 {
            HealthScoreCategory::Fair
        } else if score >= 60.0 {
            HealthScoreCategory::BelowAverage
        } else {
            HealthScoreCategory::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthScoreCategory::Poor => "poor",
            HealthScoreCategory::BelowAverage => "below_average",
            HealthScoreCategory::Fair => "fair",
            HealthScoreCategory::Good => "good",
            HealthScoreCategory::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScoreInput {
    /// Validated, but not weighted
    pub age_years: u32,
    pub sex: BiologicalSex,
    pub bmi: f64,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub body_fat_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreResult {
    pub score: f64,
    pub category: HealthScoreCategory,
    pub bmi_category: BmiCategory,
    pub bmi_points: f64,
    pub activity_points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_category: Option<BodyFatCategory>,
    pub max_points: f64,
}

/// BMI units outside the normal band (0 inside it)
fn distance_from_normal_bmi(bmi: f64) -> f64 {
    if bmi < BMI_NORMAL_MIN {
        BMI_NORMAL_MIN - bmi
    } else if bmi >= BMI_NORMAL_MAX {
        bmi - BMI_NORMAL_MAX
    } else {
        0.0
    }
}

fn bmi_points(bmi: f64) -> f64 {
    let share = (1.0 - BMI_PENALTY_PER_UNIT * distance_from_normal_bmi(bmi)).max(0.0);
    BMI_WEIGHT * share
}

fn activity_points(level: ActivityLevel) -> f64 {
    let share = match level {
        ActivityLevel::Sedentary => 0.0,
        ActivityLevel::LightlyActive => 0.4,
        ActivityLevel::ModeratelyActive => 0.7,
        ActivityLevel::VeryActive => 0.9,
        ActivityLevel::ExtremelyActive => 1.0,
    };
    ACTIVITY_WEIGHT * share
}

fn body_fat_points(category: BodyFatCategory) -> f64 {
    let share = match category {
        BodyFatCategory::Essential => 0.4,
        BodyFatCategory::Athletic | BodyFatCategory::Fitness => 1.0,
        BodyFatCategory::Average => 0.7,
        BodyFatCategory::Obese => 0.2,
    };
    BODY_FAT_WEIGHT * share
}

/// Calculate the composite score
pub fn calculate_health_score(input: &HealthScoreInput) -> CalcResult<HealthScoreResult> {
    validate_age(input.age_years)?;
    let bmi = validate_bmi(input.bmi)?;

    let bmi_pts = bmi_points(bmi);
    let activity_pts = activity_points(input.activity_level);
    let mut earned = bmi_pts + activity_pts;
    let mut max_points = BMI_WEIGHT + ACTIVITY_WEIGHT;

    let (body_fat_pts, body_fat_category) = match input.body_fat_percent {
        Some(bf) => {
            let bf = validate_percentage("body_fat_percent", bf)?;
            let category = classify_body_fat(bf, input.sex);
            let points = body_fat_points(category);
            earned += points;
            max_points += BODY_FAT_WEIGHT;
            (Some(points), Some(category))
        }
        None => (None, None),
    };

    // Whole points; the band is taken from the reported score
    let score = round_to((earned / max_points * 100.0).clamp(0.0, 100.0), 0);

    Ok(HealthScoreResult {
        score,
        category: HealthScoreCategory::from_score(score),
        bmi_category: classify_bmi(bmi),
        bmi_points: bmi_pts,
        activity_points: activity_pts,
        body_fat_points: body_fat_pts,
        body_fat_category,
        max_points,
    })
}
