//! Health calculators
//!
//! Energy expenditure estimates for the health tools screens.

pub mod bmr;

use thiserror::Error;

pub use bmr::{
    bmr, energy_report, goal_targets, tdee, ActivityLevel, BodyProfile, EnergyReport,
    GoalTargets, Sex,
};

/// Calculator input errors
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("{field} must be a positive number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("unknown activity level `{0}`; expected sedentary|light|moderate|very|extra")]
    UnknownActivity(String),
    #[error("unknown sex `{0}`; expected male|female")]
    UnknownSex(String),
}
