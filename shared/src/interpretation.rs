//! Interpretation and recommendation tables
//!
//! Each calculator category maps to one static interpretation and three to
//! five static recommendations. [`CalculatorResult`] bundles a rounded value,
//! its category label, that guidance and the reference ranges a UI shows
//! alongside the number.

use crate::health_metrics::{
    round_to, ActivityLevel, BiologicalSex, BmiCategory, BmiResult, BodyFatCategory,
    BodyFatResult, IdealWeightResult, TdeeResult, WaterIntakeResult,
};
use crate::health_score::{HealthScoreCategory, HealthScoreResult};
use crate::pregnancy::PregnancyWeightGainResult;
use serde::{Deserialize, Serialize};

/// Static guidance for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guidance {
    pub interpretation: &'static str,
    pub recommendations: &'static [&'static str],
}

// ============================================================================
// Tables
// ============================================================================

pub fn bmi_guidance(category: BmiCategory) -> Guidance {
    match category {
        BmiCategory::Underweight => Guidance {
            interpretation: "Your BMI is below the healthy range. You may need to gain some weight.",
            recommendations: &[
                "Increase calorie intake with nutrient-dense foods",
                "Include protein at every meal to support muscle",
                "Add strength training to build lean mass",
                "Talk to a healthcare provider about underlying causes",
            ],
        },
        BmiCategory::Normal => Guidance {
            interpretation: "Your BMI is within the healthy range. Keep up the good work!",
            recommendations: &[
                "Maintain a balanced diet rich in whole foods",
                "Aim for at least 150 minutes of moderate activity per week",
                "Keep monitoring your weight periodically",
            ],
        },
        BmiCategory::Overweight => Guidance {
            interpretation: "Your BMI is above the healthy range. Modest weight loss can improve your health.",
            recommendations: &[
                "Create a moderate calorie deficit of around 500 kcal per day",
                "Increase daily physical activity",
                "Choose whole foods over processed ones",
                "Limit sugary drinks and alcohol",
            ],
        },
        BmiCategory::Obese => Guidance {
            interpretation: "Your BMI is in the obese range, which increases the risk of several health conditions.",
            recommendations: &[
                "Consult a healthcare provider for a personalised plan",
                "Start with low-impact activity such as walking or swimming",
                "Focus on sustainable changes to eating habits",
                "Track meals to build awareness of portion sizes",
                "Prioritise sleep and stress management",
            ],
        },
    }
}

pub fn tdee_guidance(sex: BiologicalSex) -> Guidance {
    match sex {
        BiologicalSex::Male => Guidance {
            interpretation: "This is the estimated number of calories you burn per day. Men typically need more energy because of higher lean mass.",
            recommendations: &[
                "Eat around this amount to maintain your weight",
                "Subtract about 500 kcal per day to lose roughly 0.5 kg per week",
                "Add about 500 kcal per day to support muscle gain",
                "Aim for 1.6-2.2 g of protein per kg when strength training",
            ],
        },
        BiologicalSex::Female => Guidance {
            interpretation: "This is the estimated number of calories you burn per day. Needs can change with the menstrual cycle, pregnancy and breastfeeding.",
            recommendations: &[
                "Eat around this amount to maintain your weight",
                "Subtract about 500 kcal per day to lose roughly 0.5 kg per week",
                "Do not go below 1200 kcal per day without medical supervision",
                "Include iron and calcium rich foods",
            ],
        },
    }
}

pub fn body_fat_guidance(category: BodyFatCategory) -> Guidance {
    match category {
        BodyFatCategory::Essential => Guidance {
            interpretation: "Your body fat is at the essential level. This is the minimum needed for basic physiological function.",
            recommendations: &[
                "Make sure you are eating enough to fuel your activity",
                "Include healthy fats such as nuts, seeds and olive oil",
                "Consult a healthcare provider if this level is not intentional",
            ],
        },
        BodyFatCategory::Athletic => Guidance {
            interpretation: "Your body fat is in the athletic range, typical of people who train regularly.",
            recommendations: &[
                "Keep protein intake high to preserve lean mass",
                "Schedule rest days for recovery",
                "Monitor energy levels and performance",
            ],
        },
        BodyFatCategory::Fitness => Guidance {
            interpretation: "Your body fat is in the fitness range, which is healthy and sustainable.",
            recommendations: &[
                "Combine resistance training with cardio",
                "Maintain a balanced diet",
                "Reassess measurements every few weeks",
            ],
        },
        BodyFatCategory::Average => Guidance {
            interpretation: "Your body fat is in the average range for the general population.",
            recommendations: &[
                "Add two or more strength sessions per week",
                "Reduce refined carbohydrates and added sugars",
                "Increase daily movement such as walking",
                "Aim for seven to nine hours of sleep",
            ],
        },
        BodyFatCategory::Obese => Guidance {
            interpretation: "Your body fat is above the recommended range, which raises cardiometabolic risk.",
            recommendations: &[
                "Consult a healthcare provider for a personalised plan",
                "Create a sustainable calorie deficit",
                "Combine strength training with regular cardio",
                "Track waist circumference as well as weight",
            ],
        },
    }
}

/// Where a current weight sits against the ideal band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdealWeightCategory {
    /// No current weight supplied
    Reference,
    BelowRange,
    WithinRange,
    AboveRange,
}

impl IdealWeightCategory {
    pub fn assess(result: &IdealWeightResult, current_weight_kg: Option<f64>) -> Self {
        match current_weight_kg {
            None => IdealWeightCategory::Reference,
            Some(w) if w < result.min_weight_kg => IdealWeightCategory::BelowRange,
            Some(w) if w > result.max_weight_kg => IdealWeightCategory::AboveRange,
            Some(_) => IdealWeightCategory::WithinRange,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdealWeightCategory::Reference => "reference",
            IdealWeightCategory::BelowRange => "below_range",
            IdealWeightCategory::WithinRange => "within_range",
            IdealWeightCategory::AboveRange => "above_range",
        }
    }
}

pub fn ideal_weight_guidance(category: IdealWeightCategory) -> Guidance {
    match category {
        IdealWeightCategory::Reference => Guidance {
            interpretation: "This is a healthy weight range for your height. Ideal weight formulas are estimates and do not account for muscle mass.",
            recommendations: &[
                "Use the range as a guide, not a strict target",
                "Consider body composition as well as weight",
                "Discuss personal goals with a healthcare provider",
            ],
        },
        IdealWeightCategory::BelowRange => Guidance {
            interpretation: "Your current weight is below the healthy range for your height.",
            recommendations: &[
                "Gradually increase calorie intake",
                "Prioritise protein and strength training",
                "Check in with a healthcare provider",
            ],
        },
        IdealWeightCategory::WithinRange => Guidance {
            interpretation: "Your current weight is within the healthy range for your height.",
            recommendations: &[
                "Maintain your current habits",
                "Stay active most days of the week",
                "Reassess if your activity level changes",
            ],
        },
        IdealWeightCategory::AboveRange => Guidance {
            interpretation: "Your current weight is above the healthy range for your height.",
            recommendations: &[
                "Aim for a gradual loss of 0.5-1 kg per week",
                "Increase daily physical activity",
                "Focus on vegetables, lean protein and whole grains",
                "Check whether muscle mass explains the difference",
            ],
        },
    }
}

pub fn water_intake_guidance(level: ActivityLevel) -> Guidance {
    match level {
        ActivityLevel::Sedentary => Guidance {
            interpretation: "This is your baseline daily water requirement.",
            recommendations: &[
                "Keep a water bottle within reach",
                "Drink a glass of water with every meal",
                "Check that your urine is pale yellow",
            ],
        },
        ActivityLevel::LightlyActive => Guidance {
            interpretation: "Light activity adds a little to your daily water needs.",
            recommendations: &[
                "Drink a glass of water before and after exercise",
                "Spread intake evenly across the day",
                "Increase intake on hot days",
            ],
        },
        ActivityLevel::ModeratelyActive => Guidance {
            interpretation: "Regular exercise increases fluid losses through sweat.",
            recommendations: &[
                "Drink 400-600 ml in the two hours before exercise",
                "Sip water during workouts longer than 30 minutes",
                "Rehydrate after training",
            ],
        },
        ActivityLevel::VeryActive => Guidance {
            interpretation: "Hard daily training substantially raises your fluid needs.",
            recommendations: &[
                "Weigh yourself before and after sessions to estimate sweat loss",
                "Replace electrolytes during long sessions",
                "Drink 150-250 ml every 15-20 minutes during exercise",
                "Increase intake further in heat or at altitude",
            ],
        },
        ActivityLevel::ExtremelyActive => Guidance {
            interpretation: "Very high activity or physical work requires the most fluid.",
            recommendations: &[
                "Plan regular hydration breaks during work or training",
                "Use electrolyte drinks for sessions over an hour",
                "Watch for signs of dehydration such as headache or dizziness",
                "Do not rely on thirst alone",
            ],
        },
    }
}

pub fn pregnancy_guidance(category: BmiCategory) -> Guidance {
    match category {
        BmiCategory::Underweight => Guidance {
            interpretation: "Your pre-pregnancy BMI was below the healthy range, so a larger total gain is recommended.",
            recommendations: &[
                "Add an extra nutritious snack each day",
                "Take prenatal vitamins as advised",
                "Discuss your weight gain at every prenatal visit",
            ],
        },
        BmiCategory::Normal => Guidance {
            interpretation: "Your pre-pregnancy BMI was in the healthy range.",
            recommendations: &[
                "Eat a balanced diet with plenty of fruit and vegetables",
                "Stay active with pregnancy-safe exercise",
                "Take folic acid and prenatal vitamins",
            ],
        },
        BmiCategory::Overweight => Guidance {
            interpretation: "Your pre-pregnancy BMI was above the healthy range, so a smaller total gain is recommended.",
            recommendations: &[
                "Focus on nutrient quality rather than extra quantity",
                "Walk or swim regularly if your provider agrees",
                "Ask about screening for gestational diabetes",
            ],
        },
        BmiCategory::Obese => Guidance {
            interpretation: "Your pre-pregnancy BMI was in the obese range, so the smallest total gain is recommended.",
            recommendations: &[
                "Work with your provider on a personalised nutrition plan",
                "Monitor blood pressure and blood sugar as advised",
                "Choose low-impact activity approved by your provider",
                "Do not attempt to lose weight during pregnancy",
            ],
        },
    }
}

pub fn health_score_guidance(category: HealthScoreCategory) -> Guidance {
    match category {
        HealthScoreCategory::Excellent => Guidance {
            interpretation: "Excellent! Your weight, activity and body composition are all in great shape.",
            recommendations: &[
                "Keep up your current routine",
                "Schedule regular check-ups",
                "Set a new performance goal to stay motivated",
            ],
        },
        HealthScoreCategory::Good => Guidance {
            interpretation: "Good overall health with some room to improve.",
            recommendations: &[
                "Add one more active day per week",
                "Review your diet for processed foods",
                "Keep tracking your progress",
            ],
        },
        HealthScoreCategory::Fair => Guidance {
            interpretation: "Fair health. A few changes could make a noticeable difference.",
            recommendations: &[
                "Build up to 150 minutes of activity per week",
                "Work toward a BMI in the normal range",
                "Improve sleep consistency",
            ],
        },
        HealthScoreCategory::BelowAverage => Guidance {
            interpretation: "Below average. Several areas would benefit from attention.",
            recommendations: &[
                "Start with short daily walks",
                "Plan meals around vegetables and lean protein",
                "Set small, measurable weekly goals",
                "Consider speaking with a healthcare provider",
            ],
        },
        HealthScoreCategory::Poor => Guidance {
            interpretation: "Your score indicates elevated health risk.",
            recommendations: &[
                "Book a check-up with a healthcare provider",
                "Begin with gentle, regular movement",
                "Make one sustainable dietary change at a time",
                "Ask about support programs in your area",
            ],
        },
    }
}

// ============================================================================
// CalculatorResult
// ============================================================================

/// A reference band shown next to a result; `max` is absent when unbounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: Option<f64>,
    pub label: String,
}

impl ReferenceRange {
    fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self {
            min,
            max: max.is_finite().then_some(max),
            label: label.into(),
        }
    }
}

/// User-facing result of any calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub value: f64,
    pub category: String,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<ReferenceRange>,
}

impl CalculatorResult {
    fn new(value: f64, category: &str, guidance: Guidance) -> Self {
        Self {
            value,
            category: category.to_string(),
            interpretation: guidance.interpretation.to_string(),
            recommendations: guidance.recommendations.iter().map(|r| r.to_string()).collect(),
            health_score: None,
            ranges: Vec::new(),
        }
    }

    fn with_ranges(mut self, ranges: Vec<ReferenceRange>) -> Self {
        self.ranges = ranges;
        self
    }
}

impl From<&BmiResult> for CalculatorResult {
    fn from(result: &BmiResult) -> Self {
        CalculatorResult::new(
            round_to(result.value, 1),
            result.category.label(),
            bmi_guidance(result.category),
        )
        .with_ranges(
            BmiCategory::ALL
                .iter()
                .map(|c| {
                    let (min, max) = c.range();
                    ReferenceRange::new(min, max, c.description())
                })
                .collect(),
        )
    }
}

/// TDEE guidance depends on sex, which the result itself does not carry
pub fn tdee_calculator_result(result: &TdeeResult, sex: BiologicalSex) -> CalculatorResult {
    CalculatorResult::new(result.tdee.round(), sex.label(), tdee_guidance(sex)).with_ranges(vec![
        ReferenceRange::new(
            result.calories_for_loss.round(),
            result.calories_for_loss.round(),
            "Weight loss",
        ),
        ReferenceRange::new(
            result.calories_for_maintenance.round(),
            result.calories_for_maintenance.round(),
            "Maintenance",
        ),
        ReferenceRange::new(
            result.calories_for_gain.round(),
            result.calories_for_gain.round(),
            "Weight gain",
        ),
    ])
}

impl From<&BodyFatResult> for CalculatorResult {
    fn from(result: &BodyFatResult) -> Self {
        CalculatorResult::new(
            round_to(result.body_fat_percent, 1),
            result.category.label(),
            body_fat_guidance(result.category),
        )
        .with_ranges(
            BodyFatCategory::ALL
                .iter()
                .map(|c| {
                    let (min, max) = c.range(result.sex);
                    ReferenceRange::new(min, max, c.label())
                })
                .collect(),
        )
    }
}

pub fn ideal_weight_calculator_result(
    result: &IdealWeightResult,
    current_weight_kg: Option<f64>,
) -> CalculatorResult {
    let category = IdealWeightCategory::assess(result, current_weight_kg);
    CalculatorResult::new(
        round_to(result.ideal_weight_kg, 1),
        category.label(),
        ideal_weight_guidance(category),
    )
    .with_ranges(vec![ReferenceRange::new(
        round_to(result.min_weight_kg, 1),
        round_to(result.max_weight_kg, 1),
        "Healthy weight (BMI 18.5-25)",
    )])
}

impl From<&WaterIntakeResult> for CalculatorResult {
    fn from(result: &WaterIntakeResult) -> Self {
        CalculatorResult::new(
            round_to(result.daily_liters, 1),
            result.activity_level.label(),
            water_intake_guidance(result.activity_level),
        )
    }
}

impl From<&PregnancyWeightGainResult> for CalculatorResult {
    fn from(result: &PregnancyWeightGainResult) -> Self {
        CalculatorResult::new(
            round_to(result.recommended_gain_so_far_kg, 1),
            result.category.label(),
            pregnancy_guidance(result.category),
        )
        .with_ranges(vec![
            ReferenceRange::new(result.min_gain_kg, result.max_gain_kg, "Total recommended gain"),
            ReferenceRange::new(
                round_to(result.expected_gain_so_far_min_kg, 1),
                round_to(result.expected_gain_so_far_max_kg, 1),
                format!("Expected gain by week {}", result.current_week),
            ),
        ])
    }
}

impl From<&HealthScoreResult> for CalculatorResult {
    fn from(result: &HealthScoreResult) -> Self {
        let score = round_to(result.score, 0);
        let mut out = CalculatorResult::new(
            score,
            result.category.label(),
            health_score_guidance(result.category),
        )
        .with_ranges(vec![
            ReferenceRange::new(90.0, 100.0, "Excellent"),
            ReferenceRange::new(80.0, 90.0, "Good"),
            ReferenceRange::new(70.0, 80.0, "Fair"),
            ReferenceRange::new(60.0, 70.0, "Below average"),
            ReferenceRange::new(0.0, 60.0, "Poor"),
        ]);
        out.health_score = Some(score);
        out
    }
}
