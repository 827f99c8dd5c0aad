//! Business logic services
//!
//! Services sit between the HTTP handlers and the pure calculators in
//! `wellness-shared`.

pub mod calculator;

pub use calculator::CalculatorService;
