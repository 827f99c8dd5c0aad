//! Health metrics calculations module
//!
//! Provides calculations for BMI, BMR/TDEE, body fat, ideal weight and daily
//! water intake from anthropometric inputs.
//!
//! Every public calculator validates its inputs first and returns
//! [`CalculatorError::InvalidInput`] naming the offending field instead of
//! handing `NaN` or `Infinity` back to the caller. All functions are pure.

use crate::errors::{CalcResult, CalculatorError};
use crate::validation::{
    validate_age, validate_circumference_cm, validate_height_cm, validate_percentage,
    validate_weight_kg,
};
use serde::{Deserialize, Serialize};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// User Profile Types
// ============================================================================

/// Biological sex for health calculations
/// Note: This is used to select formula constants only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl BiologicalSex {
    pub fn label(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(CalculatorError::unsupported("biological sex", s)),
        }
    }
}

/// Activity level for TDEE and hydration
///
/// Variants are declared in ascending order of activity; the derived `Ord`
/// follows that order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    #[serde(alias = "extra_active")]
    ExtremelyActive,
}

impl ActivityLevel {
    /// Every level, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Scale applied to the baseline water requirement
    pub fn water_multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.0,
            ActivityLevel::LightlyActive => 1.1,
            ActivityLevel::ModeratelyActive => 1.2,
            ActivityLevel::VeryActive => 1.3,
            ActivityLevel::ExtremelyActive => 1.4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extremely_active" | "extra_active" => Ok(ActivityLevel::ExtremelyActive),
            _ => Err(CalculatorError::unsupported("activity level", s)),
        }
    }
}

/// Profile data needed for energy calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age_years: u32,
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
    /// Measured body fat, only needed by Katch-McArdle
    #[serde(default)]
    pub body_fat_percent: Option<f64>,
}

impl HealthProfile {
    /// Check every numeric field, failing on the first bad one
    pub fn validate(&self) -> CalcResult<()> {
        validate_height_cm(self.height_cm)?;
        validate_weight_kg(self.weight_kg)?;
        validate_age(self.age_years)?;
        if let Some(bf) = self.body_fat_percent {
            validate_percentage("body_fat_percent", bf)?;
        }
        Ok(())
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
///
/// The four bands partition `(0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// Lower bound of the normal BMI band
pub const BMI_NORMAL_MIN: f64 = 18.5;
/// Upper (exclusive) bound of the normal BMI band
pub const BMI_NORMAL_MAX: f64 = 25.0;
const BMI_OBESE_MIN: f64 = 30.0;

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// BMI range `[min, max)` for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, BMI_NORMAL_MIN),
            BmiCategory::Normal => (BMI_NORMAL_MIN, BMI_NORMAL_MAX),
            BmiCategory::Overweight => (BMI_NORMAL_MAX, BMI_OBESE_MIN),
            BmiCategory::Obese => (BMI_OBESE_MIN, f64::INFINITY),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

/// BMI calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal; `category` classifies this value
    pub value: f64,
    pub category: BmiCategory,
    /// Healthy weight range in kg for this height
    pub healthy_weight_range_kg: (f64, f64),
    /// Distance from healthy range (negative = under, positive = over, 0 = in range)
    pub distance_from_healthy_kg: f64,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> CalcResult<f64> {
    let weight_kg = validate_weight_kg(weight_kg)?;
    let height_cm = validate_height_cm(height_cm)?;
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < BMI_NORMAL_MIN {
        BmiCategory::Underweight
    } else if bmi < BMI_NORMAL_MAX {
        BmiCategory::Normal
    } else if bmi < BMI_OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Calculate healthy weight range for a given height
///
/// Based on BMI 18.5-25 (normal range)
pub fn healthy_weight_range_kg(height_cm: f64) -> CalcResult<(f64, f64)> {
    let height_cm = validate_height_cm(height_cm)?;
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    Ok((BMI_NORMAL_MIN * height_m_sq, BMI_NORMAL_MAX * height_m_sq))
}

/// Calculate complete BMI result
pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64) -> CalcResult<BmiResult> {
    let bmi = calculate_bmi(weight_kg, height_cm)?;
    let healthy_range = healthy_weight_range_kg(height_cm)?;

    let distance = if weight_kg < healthy_range.0 {
        weight_kg - healthy_range.0
    } else if weight_kg > healthy_range.1 {
        weight_kg - healthy_range.1
    } else {
        0.0
    };

    let value = round_to(bmi, 1);
    Ok(BmiResult {
        value,
        category: classify_bmi(value),
        healthy_weight_range_kg: healthy_range,
        distance_from_healthy_kg: distance,
    })
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// BMR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrMethod {
    /// Mifflin-St Jeor (most accurate for most people)
    #[default]
    MifflinStJeor,
    /// Harris-Benedict (revised 1984)
    HarrisBenedict,
    /// Katch-McArdle (requires body fat %)
    KatchMcArdle,
}

/// Calories removed from / added to TDEE for loss and gain targets
const CALORIE_ADJUSTMENT: f64 = 500.0;
/// Floor for the weight-loss target
const MIN_SAFE_CALORIES: f64 = 1200.0;

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// Inputs are assumed validated; extreme inputs may yield a negative BMR.
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Calculate BMR using Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn calculate_bmr_harris_benedict(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let age = age_years as f64;
    match sex {
        BiologicalSex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        BiologicalSex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// Calculate BMR using Katch-McArdle equation
///
/// BMR = 370 + 21.6 × LBM(kg)
pub fn calculate_bmr_katch_mcardle(weight_kg: f64, body_fat_percent: f64) -> f64 {
    370.0 + 21.6 * lean_body_mass_kg(weight_kg, body_fat_percent)
}

/// Calculate BMR with specified method
pub fn calculate_bmr(profile: &HealthProfile, method: BmrMethod) -> CalcResult<f64> {
    profile.validate()?;
    let bmr = match method {
        BmrMethod::MifflinStJeor => calculate_bmr_mifflin(
            profile.weight_kg,
            profile.height_cm,
            profile.age_years,
            profile.sex,
        ),
        BmrMethod::HarrisBenedict => calculate_bmr_harris_benedict(
            profile.weight_kg,
            profile.height_cm,
            profile.age_years,
            profile.sex,
        ),
        BmrMethod::KatchMcArdle => {
            let body_fat = profile
                .body_fat_percent
                .ok_or_else(|| CalculatorError::missing("body_fat_percent"))?;
            calculate_bmr_katch_mcardle(profile.weight_kg, body_fat)
        }
    };
    Ok(bmr)
}

/// TDEE calculation result with breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeResult {
    pub method: BmrMethod,
    /// Basal Metabolic Rate
    pub bmr: f64,
    /// Total Daily Energy Expenditure
    pub tdee: f64,
    pub activity_level: ActivityLevel,
    pub activity_multiplier: f64,
    /// Calories for weight loss (500 deficit, never below 1200)
    pub calories_for_loss: f64,
    /// Calories for weight gain (500 surplus)
    pub calories_for_gain: f64,
    pub calories_for_maintenance: f64,
}

/// Calculate complete TDEE result with Mifflin-St Jeor
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee_result(profile: &HealthProfile) -> CalcResult<TdeeResult> {
    calculate_tdee_result_with(profile, BmrMethod::MifflinStJeor)
}

/// Calculate complete TDEE result with a chosen BMR method
pub fn calculate_tdee_result_with(profile: &HealthProfile, method: BmrMethod) -> CalcResult<TdeeResult> {
    let bmr = calculate_bmr(profile, method)?;
    let multiplier = profile.activity_level.multiplier();
    let tdee = bmr * multiplier;

    Ok(TdeeResult {
        method,
        bmr,
        tdee,
        activity_level: profile.activity_level,
        activity_multiplier: multiplier,
        calories_for_loss: (tdee - CALORIE_ADJUSTMENT).max(MIN_SAFE_CALORIES),
        calories_for_gain: tdee + CALORIE_ADJUSTMENT,
        calories_for_maintenance: tdee,
    })
}

// ============================================================================
// Hydration Calculations
// ============================================================================

/// Baseline water requirement per kg of body weight
pub const WATER_ML_PER_KG: f64 = 30.0;
/// Volume of one glass used for display
pub const GLASS_ML: f64 = 250.0;

/// Daily water intake recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterIntakeResult {
    pub daily_ml: f64,
    pub daily_liters: f64,
    /// Number of 250 ml glasses, rounded up
    pub glasses: u32,
    pub activity_level: ActivityLevel,
}

/// Calculate recommended daily water intake
///
/// Base formula: 30 ml per kg of body weight, scaled by activity level
pub fn calculate_water_intake(weight_kg: f64, activity_level: ActivityLevel) -> CalcResult<WaterIntakeResult> {
    let weight_kg = validate_weight_kg(weight_kg)?;
    let daily_ml = weight_kg * WATER_ML_PER_KG * activity_level.water_multiplier();
    Ok(WaterIntakeResult {
        daily_ml,
        daily_liters: daily_ml / 1000.0,
        glasses: (daily_ml / GLASS_ML).ceil() as u32,
        activity_level,
    })
}

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Body fat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub const ALL: [BodyFatCategory; 5] = [
        BodyFatCategory::Essential,
        BodyFatCategory::Athletic,
        BodyFatCategory::Fitness,
        BodyFatCategory::Average,
        BodyFatCategory::Obese,
    ];

    /// Body fat range `[min, max)` for this category by sex
    pub fn range(&self, sex: BiologicalSex) -> (f64, f64) {
        let cutoffs = body_fat_cutoffs(sex);
        match self {
            BodyFatCategory::Essential => (0.0, cutoffs[0]),
            BodyFatCategory::Athletic => (cutoffs[0], cutoffs[1]),
            BodyFatCategory::Fitness => (cutoffs[1], cutoffs[2]),
            BodyFatCategory::Average => (cutoffs[2], cutoffs[3]),
            BodyFatCategory::Obese => (cutoffs[3], 100.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::Essential => "essential",
            BodyFatCategory::Athletic => "athletic",
            BodyFatCategory::Fitness => "fitness",
            BodyFatCategory::Average => "average",
            BodyFatCategory::Obese => "obese",
        }
    }
}

/// Upper bounds of essential/athletic/fitness/average
fn body_fat_cutoffs(sex: BiologicalSex) -> [f64; 4] {
    match sex {
        BiologicalSex::Male => [6.0, 14.0, 18.0, 25.0],
        BiologicalSex::Female => [14.0, 21.0, 25.0, 32.0],
    }
}

/// Classify body fat percentage
pub fn classify_body_fat(body_fat_percent: f64, sex: BiologicalSex) -> BodyFatCategory {
    let [essential, athletic, fitness, average] = body_fat_cutoffs(sex);
    if body_fat_percent < essential {
        BodyFatCategory::Essential
    } else if body_fat_percent < athletic {
        BodyFatCategory::Athletic
    } else if body_fat_percent < fitness {
        BodyFatCategory::Fitness
    } else if body_fat_percent < average {
        BodyFatCategory::Average
    } else {
        BodyFatCategory::Obese
    }
}

/// Tape measurements for the US Navy method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircumferenceMeasurements {
    pub sex: BiologicalSex,
    pub height_cm: f64,
    pub waist_cm: f64,
    pub neck_cm: f64,
    /// Required for women
    #[serde(default)]
    pub hip_cm: Option<f64>,
    /// When present, fat and lean mass are reported too
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// With `weight_kg`, adds the BMI-based estimate as a cross-check
    #[serde(default)]
    pub age_years: Option<u32>,
}

/// Body fat calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    pub body_fat_percent: f64,
    pub category: BodyFatCategory,
    pub sex: BiologicalSex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_mass_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass_kg: Option<f64>,
    /// Body fat estimated from BMI, age and sex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_estimate_percent: Option<f64>,
}

/// Body fat percentage using the US Navy circumference method
///
/// Men:   495 / (1.0324 - 0.19077 × log10(waist - neck) + 0.15456 × log10(height)) - 450
/// Women: 495 / (1.29579 - 0.35004 × log10(waist + hip - neck) + 0.22100 × log10(height)) - 450
pub fn calculate_body_fat_navy(
    sex: BiologicalSex,
    height_cm: f64,
    waist_cm: f64,
    neck_cm: f64,
    hip_cm: Option<f64>,
) -> CalcResult<f64> {
    let height_cm = validate_height_cm(height_cm)?;
    let waist_cm = validate_circumference_cm("waist_cm", waist_cm)?;
    let neck_cm = validate_circumference_cm("neck_cm", neck_cm)?;

    let density = match sex {
        BiologicalSex::Male => {
            let girth = waist_cm - neck_cm;
            if girth <= 0.0 {
                return Err(CalculatorError::invalid(
                    "waist_cm",
                    "must be greater than neck circumference",
                ));
            }
            1.0324 - 0.19077 * girth.log10() + 0.15456 * height_cm.log10()
        }
        BiologicalSex::Female => {
            let hip_cm = hip_cm.ok_or_else(|| CalculatorError::missing("hip_cm"))?;
            let hip_cm = validate_circumference_cm("hip_cm", hip_cm)?;
            let girth = waist_cm + hip_cm - neck_cm;
            if girth <= 0.0 {
                return Err(CalculatorError::invalid(
                    "waist_cm",
                    "waist plus hip must be greater than neck circumference",
                ));
            }
            1.29579 - 0.35004 * girth.log10() + 0.22100 * height_cm.log10()
        }
    };

    if density <= 0.0 {
        return Err(CalculatorError::invalid(
            "waist_cm",
            "measurements are outside the range of the formula",
        ));
    }

    let percent = 495.0 / density - 450.0;
    if !(percent > 0.0 && percent < 100.0) {
        return Err(CalculatorError::invalid(
            "waist_cm",
            "measurements produce an implausible body fat percentage",
        ));
    }
    Ok(percent)
}

/// Calculate body fat with category and optional mass breakdown
pub fn calculate_body_fat_result(m: &CircumferenceMeasurements) -> CalcResult<BodyFatResult> {
    let percent = calculate_body_fat_navy(m.sex, m.height_cm, m.waist_cm, m.neck_cm, m.hip_cm)?;
    let weight = m.weight_kg.map(validate_weight_kg).transpose()?;
    let (fat_mass_kg, lean_mass_kg) = match weight {
        Some(weight) => {
            let lean = lean_body_mass_kg(weight, percent);
            (Some(weight - lean), Some(lean))
        }
        None => (None, None),
    };
    let bmi_estimate_percent = match (weight, m.age_years) {
        (Some(weight), Some(age)) => {
            let bmi = calculate_bmi(weight, m.height_cm)?;
            Some(estimate_body_fat_from_bmi(bmi, age, m.sex))
        }
        _ => None,
    };

    Ok(BodyFatResult {
        body_fat_percent: percent,
        category: classify_body_fat(percent, m.sex),
        sex: m.sex,
        fat_mass_kg,
        lean_mass_kg,
        bmi_estimate_percent,
    })
}

/// Lean body mass from weight and body fat percentage
pub fn lean_body_mass_kg(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percent / 100.0)
}

/// Estimate body fat percentage from BMI (rough estimate)
///
/// Formula: BF% = 1.20 × BMI + 0.23 × Age - 10.8 × sex - 5.4
/// where sex = 1 for male, 0 for female
pub fn estimate_body_fat_from_bmi(bmi: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let sex_factor = match sex {
        BiologicalSex::Male => 1.0,
        BiologicalSex::Female => 0.0,
    };
    let bf = 1.20 * bmi + 0.23 * age_years as f64 - 10.8 * sex_factor - 5.4;
    bf.clamp(3.0, 60.0)
}

// ============================================================================
// Ideal Weight Calculations
// ============================================================================

/// Youngest age the adult ideal-weight formulas apply to
pub const IDEAL_WEIGHT_MIN_AGE: u32 = 18;

/// Ideal body weight with a healthy band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealWeightResult {
    /// Devine formula result
    pub devine: f64,
    /// Robinson formula result
    pub robinson: f64,
    /// Miller formula result
    pub miller: f64,
    /// Hamwi formula result
    pub hamwi: f64,
    /// Average of the four formulas, clamped into the healthy band
    pub ideal_weight_kg: f64,
    /// Weight at BMI 18.5
    pub min_weight_kg: f64,
    /// Weight at BMI 25
    pub max_weight_kg: f64,
}

/// Calculate ideal body weight for an adult
pub fn calculate_ideal_weight(height_cm: f64, sex: BiologicalSex, age_years: u32) -> CalcResult<IdealWeightResult> {
    let height_cm = validate_height_cm(height_cm)?;
    let age_years = validate_age(age_years)?;
    if age_years < IDEAL_WEIGHT_MIN_AGE {
        return Err(CalculatorError::invalid(
            "age_years",
            format!("must be at least {} for adult weight formulas", IDEAL_WEIGHT_MIN_AGE),
        ));
    }

    let height_inches = height_cm / 2.54;
    let inches_over_5ft = (height_inches - 60.0).max(0.0);

    let (devine, robinson, miller, hamwi) = match sex {
        BiologicalSex::Male => (
            50.0 + 2.3 * inches_over_5ft,
            52.0 + 1.9 * inches_over_5ft,
            56.2 + 1.41 * inches_over_5ft,
            48.0 + 2.7 * inches_over_5ft,
        ),
        BiologicalSex::Female => (
            45.5 + 2.3 * inches_over_5ft,
            49.0 + 1.7 * inches_over_5ft,
            53.1 + 1.36 * inches_over_5ft,
            45.5 + 2.2 * inches_over_5ft,
        ),
    };

    let (min_weight, max_weight) = healthy_weight_range_kg(height_cm)?;
    let average = (devine + robinson + miller + hamwi) / 4.0;

    Ok(IdealWeightResult {
        devine,
        robinson,
        miller,
        hamwi,
        ideal_weight_kg: average.clamp(min_weight, max_weight),
        min_weight_kg: min_weight,
        max_weight_kg: max_weight,
    })
}
