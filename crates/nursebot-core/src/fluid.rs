//! Pediatric maintenance-fluid calculator (Holliday-Segar).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FluidError;

/// Calculator form input. Age is collected but does not enter the formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidInput {
    /// Age in years.
    pub age: f64,
    /// Body weight in kilograms.
    pub weight: f64,
}

impl FluidInput {
    /// Build an input from optional form fields, rejecting blanks and
    /// values that are negative or not finite.
    pub fn from_fields(age: Option<f64>, weight: Option<f64>) -> Result<Self, FluidError> {
        let age = require("age", age)?;
        let weight = require("weight", weight)?;
        Ok(Self { age, weight })
    }

    /// Parse the raw text of the two form fields.
    pub fn parse(age: &str, weight: &str) -> Result<Self, FluidError> {
        Self::from_fields(parse_field("age", age)?, parse_field("weight", weight)?)
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<Option<f64>, FluidError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| FluidError::Invalid {
            field,
            value: f64::NAN,
        })
}

fn require(field: &'static str, value: Option<f64>) -> Result<f64, FluidError> {
    match value {
        None => Err(FluidError::Missing { field }),
        Some(v) if !v.is_finite() || v < 0.0 => Err(FluidError::Invalid { field, value: v }),
        Some(v) => Ok(v),
    }
}

/// Daily maintenance fluid in whole millilitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidResult {
    pub millilitres: i64,
}

impl fmt::Display for FluidResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mL", self.millilitres)
    }
}

/// Three linear regimes: 100 mL/kg up to 10 kg, 50 mL/kg for the next
/// 10 kg, 20 mL/kg above 20 kg.
pub fn calculate_fluid_requirement(_age: f64, weight: f64) -> i64 {
    let ml = if weight <= 10.0 {
        weight * 100.0
    } else if weight <= 20.0 {
        1000.0 + (weight - 10.0) * 50.0
    } else {
        1500.0 + (weight - 20.0) * 20.0
    };
    ml.round() as i64
}

/// Compute the result for a validated form input.
pub fn maintenance_fluid(input: &FluidInput) -> FluidResult {
    FluidResult {
        millilitres: calculate_fluid_requirement(input.age, input.weight),
    }
}
