//! Error types for the health calculators

use thiserror::Error;

/// Errors raised by calculator input handling and formulas
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// A field is missing, non-numeric, out of range, or makes a formula undefined
    #[error("Invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// An enumerated value (activity level, sex, unit, calculator) is not recognised
    #[error("Unsupported {kind}: '{value}'")]
    UnsupportedCategory { kind: &'static str, value: String },
}

impl CalculatorError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CalculatorError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::invalid(field, "is required for this calculator")
    }

    pub fn unsupported(kind: &'static str, value: impl Into<String>) -> Self {
        CalculatorError::UnsupportedCategory {
            kind,
            value: value.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalculatorError::InvalidInput { field, .. } => Some(field),
            CalculatorError::UnsupportedCategory { .. } => None,
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CalculatorError::InvalidInput { field, message } => {
                format!(
                    "{} {}",
                    crate::validation::field_display_label(field),
                    message
                )
            }
            CalculatorError::UnsupportedCategory { .. } => self.to_string(),
        }
    }
}

/// Result alias used throughout the calculators
pub type CalcResult<T> = Result<T, CalculatorError>;
