//! Basal metabolic rate and daily energy expenditure

use std::fmt;
use std::str::FromStr;

use super::CalculatorError;

/// Surplus or deficit applied for weight goals, in kcal per day
pub const GOAL_ADJUSTMENT_KCAL: i32 = 500;

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(CalculatorError::UnknownSex(other.to_string())),
        }
    }
}

/// Activity level and its TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days/week
    Light,
    /// 3-5 days/week
    #[default]
    Moderate,
    /// 6-7 days/week
    VeryActive,
    /// Physical job plus training
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Short identifier accepted by `from_str`
    pub fn id(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very",
            ActivityLevel::ExtraActive => "extra",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Lightly Active",
            ActivityLevel::Moderate => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityLevel {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.id() == wanted)
            .ok_or(CalculatorError::UnknownActivity(wanted))
    }
}

/// Body measurements the calculator takes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub sex: Sex,
}

impl BodyProfile {
    fn validate(&self) -> Result<(), CalculatorError> {
        for (field, value) in [
            ("weight", self.weight_kg),
            ("height", self.height_cm),
            ("age", self.age_years),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalculatorError::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

/// Daily calorie targets derived from TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalTargets {
    pub lose_weight: i32,
    pub maintain: i32,
    pub gain_muscle: i32,
}

/// Full calculator output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyReport {
    /// Basal metabolic rate, kcal/day
    pub bmr: i32,
    /// Total daily energy expenditure, kcal/day
    pub tdee: i32,
    pub targets: GoalTargets,
}

/// Mifflin-St Jeor BMR, rounded to whole kcal
pub fn bmr(profile: &BodyProfile) -> Result<i32, CalculatorError> {
    profile.validate()?;

    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age_years;
    let value = match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    };
    Ok(value.round() as i32)
}

/// BMR scaled by the activity multiplier, rounded
pub fn tdee(bmr: i32, level: ActivityLevel) -> i32 {
    (f64::from(bmr) * level.multiplier()).round() as i32
}

/// Targets a fixed adjustment either side of TDEE, saturating at the `i32` range
pub fn goal_targets(tdee: i32) -> GoalTargets {
    GoalTargets {
        lose_weight: tdee.saturating_sub(GOAL_ADJUSTMENT_KCAL),
        maintain: tdee,
        gain_muscle: tdee.saturating_add(GOAL_ADJUSTMENT_KCAL),
    }
}

/// BMR, TDEE and goal targets in one call
pub fn energy_report(
    profile: &BodyProfile,
    level: ActivityLevel,
) -> Result<EnergyReport, CalculatorError> {
    let bmr = bmr(profile)?;
    let tdee = tdee(bmr, level);
    Ok(EnergyReport {
        bmr,
        tdee,
        targets: goal_targets(tdee),
    })
}
