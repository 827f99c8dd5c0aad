//! Wellness Shared Library
//!
//! Pure health-metric calculators (BMI, BMR/TDEE, body fat, ideal weight,
//! water intake, pregnancy weight gain, composite health score) together with
//! their interpretation tables, input validation and unit conversion. Used by
//! the backend API and the WASM module; performs no I/O.

pub mod calculator;
pub mod errors;
pub mod health_metrics;
pub mod health_score;
pub mod interpretation;
pub mod pregnancy;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use calculator::{calculate, CalculatorKind};
pub use errors::*;
pub use health_metrics::*;
pub use health_score::*;
pub use interpretation::{CalculatorResult, Guidance, IdealWeightCategory, ReferenceRange};
pub use pregnancy::*;
pub use types::*;
pub use units::*;
