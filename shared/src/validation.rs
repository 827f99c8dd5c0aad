//! Input validation functions
//!
//! Every calculator validates its numeric inputs through these guards before
//! touching a formula. Text coming from form fields goes through the `parse_*`
//! helpers: blank or non-numeric input is an error, never a silent zero.

use crate::errors::{CalcResult, CalculatorError};

/// Upper bound for height (tallest recorded humans are ~272 cm)
pub const MAX_HEIGHT_CM: f64 = 300.0;
/// Upper bound for body weight
pub const MAX_WEIGHT_KG: f64 = 500.0;
/// Upper bound for age
pub const MAX_AGE_YEARS: u32 = 130;
/// Upper bound for a body circumference
pub const MAX_CIRCUMFERENCE_CM: f64 = 300.0;
/// Valid gestational weeks
pub const MIN_GESTATIONAL_WEEK: u32 = 1;
pub const MAX_GESTATIONAL_WEEK: u32 = 42;

fn ensure_finite(field: &'static str, value: f64) -> CalcResult<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(CalculatorError::invalid(field, "must be a valid number"));
    }
    Ok(())
}

/// Require a finite, strictly positive value no greater than `max`
pub fn ensure_positive_at_most(field: &'static str, value: f64, max: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalculatorError::invalid(field, "must be greater than 0"));
    }
    if value > max {
        return Err(CalculatorError::invalid(
            field,
            format!("must be at most {}", max),
        ));
    }
    Ok(value)
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> CalcResult<f64> {
    ensure_positive_at_most("height_cm", height_cm, MAX_HEIGHT_CM)
}

/// Validate weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> CalcResult<f64> {
    ensure_positive_at_most("weight_kg", weight_kg, MAX_WEIGHT_KG)
}

/// Validate a named weight field (e.g. pre-pregnancy weight)
pub fn validate_weight_field(field: &'static str, weight_kg: f64) -> CalcResult<f64> {
    ensure_positive_at_most(field, weight_kg, MAX_WEIGHT_KG)
}

/// Validate a body circumference (waist, neck, hip) in cm
pub fn validate_circumference_cm(field: &'static str, value: f64) -> CalcResult<f64> {
    ensure_positive_at_most(field, value, MAX_CIRCUMFERENCE_CM)
}

/// Validate age in years
pub fn validate_age(age_years: u32) -> CalcResult<u32> {
    if age_years > MAX_AGE_YEARS {
        return Err(CalculatorError::invalid(
            "age_years",
            format!("must be at most {}", MAX_AGE_YEARS),
        ));
    }
    Ok(age_years)
}

/// Validate percentage value (0-100)
pub fn validate_percentage(field: &'static str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(CalculatorError::invalid(
            field,
            "must be between 0 and 100",
        ));
    }
    Ok(value)
}

/// Validate a BMI value handed in directly (health score input)
pub fn validate_bmi(bmi: f64) -> CalcResult<f64> {
    ensure_positive_at_most("bmi", bmi, 250.0)
}

/// Validate a gestational week (1-42)
pub fn validate_gestational_week(week: u32) -> CalcResult<u32> {
    if !(MIN_GESTATIONAL_WEEK..=MAX_GESTATIONAL_WEEK).contains(&week) {
        return Err(CalculatorError::invalid(
            "current_week",
            format!(
                "must be between {} and {}",
                MIN_GESTATIONAL_WEEK, MAX_GESTATIONAL_WEEK
            ),
        ));
    }
    Ok(week)
}

/// Parse a decimal number typed into a form field
pub fn parse_number(field: &'static str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalculatorError::missing(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalculatorError::invalid(field, format!("'{}' is not a number", trimmed)))?;
    ensure_finite(field, value)?;
    Ok(value)
}

/// Parse a non-negative whole number typed into a form field
pub fn parse_whole_number(field: &'static str, text: &str) -> CalcResult<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalculatorError::missing(field));
    }
    trimmed
        .parse()
        .map_err(|_| CalculatorError::invalid(field, format!("'{}' is not a whole number", trimmed)))
}

/// Parse a whole number of years typed into a form field
pub fn parse_age(field: &'static str, text: &str) -> CalcResult<u32> {
    validate_age(parse_whole_number(field, text)?)
}

/// Parse an ISO date (YYYY-MM-DD) typed into a form field
pub fn parse_date(field: &'static str, text: &str) -> CalcResult<chrono::NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalculatorError::missing(field));
    }
    trimmed
        .parse()
        .map_err(|_| CalculatorError::invalid(field, format!("'{}' is not a date (YYYY-MM-DD)", trimmed)))
}

/// Unwrap an optional input, naming the field when it is absent
pub fn require<T>(field: &'static str, value: Option<T>) -> CalcResult<T> {
    value.ok_or_else(|| CalculatorError::missing(field))
}

/// Whole years between a birth date and `today`
pub fn age_from_date_of_birth(
    date_of_birth: chrono::NaiveDate,
    today: chrono::NaiveDate,
) -> CalcResult<u32> {
    if date_of_birth > today {
        return Err(CalculatorError::invalid(
            "date_of_birth",
            "cannot be in the future",
        ));
    }
    let age = today
        .years_since(date_of_birth)
        .ok_or_else(|| CalculatorError::invalid("date_of_birth", "is not a valid date"))?;
    validate_age(age).map_err(|_| {
        CalculatorError::invalid(
            "date_of_birth",
            format!("age cannot exceed {} years", MAX_AGE_YEARS),
        )
    })
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn field_display_label(field_name: &str) -> &str {
    match field_name {
        "height_cm" | "height" => "Height",
        "weight_kg" | "weight" => "Weight",
        "age_years" | "age" => "Age",
        "date_of_birth" => "Date of Birth",
        "sex" | "biological_sex" => "Biological Sex",
        "activity_level" => "Activity Level",
        "waist_cm" | "waist" => "Waist Circumference",
        "neck_cm" | "neck" => "Neck Circumference",
        "hip_cm" | "hip" => "Hip Circumference",
        "body_fat_percent" => "Body Fat Percentage",
        "bmi" => "BMI",
        "pre_pregnancy_weight_kg" | "pre_pregnancy_weight" => "Pre-pregnancy Weight",
        "current_weight_kg" | "current_weight" => "Current Weight",
        "current_week" => "Pregnancy Week",
        "last_menstrual_period" => "Last Menstrual Period",
        _ => field_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());
        assert!(validate_height_cm(0.5).is_ok());

        assert!(validate_height_cm(0.0).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(300.1).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
        assert!(validate_height_cm(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_weight_kg() {
        assert!(validate_weight_kg(70.0).is_ok());
        assert!(validate_weight_kg(500.0).is_ok());
        assert!(validate_weight_kg(0.0).is_err());
        assert!(validate_weight_kg(600.0).is_err());
        assert!(validate_weight_kg(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("body_fat_percent", 0.0).is_ok());
        assert!(validate_percentage("body_fat_percent", 100.0).is_ok());
        assert!(validate_percentage("body_fat_percent", -1.0).is_err());
        assert!(validate_percentage("body_fat_percent", 101.0).is_err());
    }

    #[test]
    fn test_validate_gestational_week() {
        assert!(validate_gestational_week(1).is_ok());
        assert!(validate_gestational_week(42).is_ok());
        assert_eq!(
            validate_gestational_week(0).unwrap_err().field(),
            Some("current_week")
        );
        assert!(validate_gestational_week(43).is_err());
    }

    #[rstest]
    #[case("170", 170.0)]
    #[case(" 72.5 ", 72.5)]
    #[case("1e2", 100.0)]
    fn test_parse_number_accepts(#[case] text: &str, #[case] expected: f64) {
        assert_eq!(parse_number("height_cm", text).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    fn test_parse_number_rejects_instead_of_zero(#[case] text: &str) {
        let err = parse_number("weight_kg", text).unwrap_err();
        assert_eq!(err.field(), Some("weight_kg"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date_of_birth", "1990-05-01").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
        );
        assert_eq!(parse_date("date_of_birth", "01/05/1990").unwrap_err().field(), Some("date_of_birth"));
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("age_years", "30").unwrap(), 30);
        assert!(parse_age("age_years", "-3").is_err());
        assert!(parse_age("age_years", "30.5").is_err());
        assert!(parse_age("age_years", "200").is_err());
        assert!(parse_age("age_years", "").is_err());
    }

    #[test]
    fn test_require_names_missing_field() {
        assert_eq!(require("hip_cm", Some(90.0)).unwrap(), 90.0);
        let err = require::<f64>("hip_cm", None).unwrap_err();
        assert_eq!(err.field(), Some("hip_cm"));
    }

    #[test]
    fn test_age_from_date_of_birth() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let dob = NaiveDate::from_ymd_opt(1990, 6, 16).unwrap();
        assert_eq!(age_from_date_of_birth(dob, today).unwrap(), 33);

        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(age_from_date_of_birth(dob, today).unwrap(), 34);

        let future = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(age_from_date_of_birth(future, today).is_err());

        let too_old = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap();
        assert!(age_from_date_of_birth(too_old, today).is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(field_display_label("hip_cm"), "Hip Circumference");
        assert_eq!(field_display_label("current_week"), "Pregnancy Week");
        assert_eq!(field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_height_range(height in 0.01f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok());
        }

        #[test]
        fn prop_non_positive_height_rejected(height in -500.0f64..=0.0) {
            prop_assert!(validate_height_cm(height).is_err());
        }

        #[test]
        fn prop_valid_weight_range(weight in 0.01f64..=500.0) {
            prop_assert!(validate_weight_kg(weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_above_max(weight in 500.1f64..1000.0) {
            prop_assert!(validate_weight_kg(weight).is_err());
        }
    }
}
