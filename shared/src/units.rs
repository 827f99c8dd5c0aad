//! Unit conversion for calculator inputs
//!
//! The calculators only ever see SI values (kg, cm). Forms may submit imperial
//! values; they are converted here, at the boundary, before any formula runs.

use crate::errors::CalculatorError;
use serde::{Deserialize, Serialize};
use std::fmt;

const KG_PER_LB: f64 = 0.453_592_37;
const KG_PER_STONE: f64 = 6.350_293_18;
const CM_PER_INCH: f64 = 2.54;

// ============================================================================
// Weight Units
// ============================================================================

/// Unit a submitted weight is expressed in
///
/// Serde accepts the same spellings as `FromStr`, so config files and
/// request bodies agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    #[serde(alias = "kilogram", alias = "kilograms")]
    Kg,
    #[serde(alias = "lb", alias = "pound", alias = "pounds")]
    Lbs,
    #[serde(alias = "st", alias = "stones")]
    Stone,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
            WeightUnit::Stone => value * KG_PER_STONE,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(CalculatorError::unsupported("weight unit", s)),
        }
    }
}

// ============================================================================
// Length Units (height and circumferences)
// ============================================================================

/// Unit a submitted height or body circumference is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    #[serde(alias = "centimeter", alias = "centimeters")]
    Cm,
    #[serde(alias = "m", alias = "meter")]
    Meters,
    #[serde(alias = "in", alias = "inch")]
    Inches,
}

impl HeightUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Meters => value * 100.0,
            HeightUnit::Inches => value * CM_PER_INCH,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Meters => "m",
            HeightUnit::Inches => "in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "m" | "meter" | "meters" => Ok(HeightUnit::Meters),
            "in" | "inch" | "inches" => Ok(HeightUnit::Inches),
            _ => Err(CalculatorError::unsupported("height unit", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_conversions() {
        assert!((WeightUnit::Lbs.to_kg(154.0) - 69.85).abs() < 0.01);
        assert!((WeightUnit::Stone.to_kg(11.0) - 69.85).abs() < 0.01);
        assert_eq!(WeightUnit::Kg.to_kg(70.0), 70.0);
    }

    #[test]
    fn test_height_conversions() {
        assert!((HeightUnit::Inches.to_cm(70.0) - 177.8).abs() < 1e-9);
        assert_eq!(HeightUnit::Meters.to_cm(1.75), 175.0);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("LBS".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("stone".parse::<WeightUnit>().unwrap(), WeightUnit::Stone);
        assert_eq!("inches".parse::<HeightUnit>().unwrap(), HeightUnit::Inches);
        assert!(matches!(
            "furlong".parse::<HeightUnit>(),
            Err(CalculatorError::UnsupportedCategory { .. })
        ));
    }

    #[test]
    fn test_serde_accepts_short_spellings() {
        let height: HeightUnit = serde_json::from_str(r#""in""#).unwrap();
        assert_eq!(height, HeightUnit::Inches);
        let height: HeightUnit = serde_json::from_str(r#""m""#).unwrap();
        assert_eq!(height, HeightUnit::Meters);
        let weight: WeightUnit = serde_json::from_str(r#""lb""#).unwrap();
        assert_eq!(weight, WeightUnit::Lbs);
        assert_eq!(serde_json::to_string(&HeightUnit::Inches).unwrap(), r#""inches""#);
    }
}
