//! Body-mass index calculator
//!
//! Bands are half-open and lower-inclusive. Values in [24.9, 25.0) match
//! neither the normal nor the overweight band and fall through to
//! `Obese`; that gap is kept as documented behavior.

use crate::errors::BmiError;
use std::fmt;

/// Smallest accepted weight in kilograms
pub const MIN_WEIGHT_KG: f64 = 1.0;

/// Smallest accepted height in centimetres
pub const MIN_HEIGHT_CM: f64 = 50.0;

/// Weight classification band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Computed index plus its band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl BmiResult {
    /// Index rounded for display
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.bmi)
    }
}

/// weight / (height in metres)^2
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if (18.5..24.9).contains(&bmi) {
        BmiCategory::Normal
    } else if (25.0..29.9).contains(&bmi) {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Validate the input floor, then compute and classify
pub fn calculate(weight_kg: f64, height_cm: f64) -> Result<BmiResult, BmiError> {
    if !(weight_kg >= MIN_WEIGHT_KG) {
        return Err(BmiError::WeightTooLow { value: weight_kg, min: MIN_WEIGHT_KG });
    }
    if !(height_cm >= MIN_HEIGHT_CM) {
        return Err(BmiError::HeightTooLow { value: height_cm, min: MIN_HEIGHT_CM });
    }

    let value = bmi(weight_kg, height_cm);
    Ok(BmiResult {
        bmi: value,
        category: classify(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(18.49), BmiCategory::Underweight);
        assert_eq!(classify(18.5), BmiCategory::Normal);
        assert_eq!(classify(24.89), BmiCategory::Normal);
        assert_eq!(classify(25.0), BmiCategory::Overweight);
        assert_eq!(classify(29.89), BmiCategory::Overweight);
        assert_eq!(classify(29.9), BmiCategory::Obese);
    }

    #[test]
    fn test_band_gap_falls_through() {
        assert_eq!(classify(24.9), BmiCategory::Obese);
        assert_eq!(classify(24.95), BmiCategory::Obese);
    }

    #[test]
    fn test_typical_adult() {
        let result = calculate(70.0, 175.0).unwrap();
        assert_eq!(result.formatted(), "22.86");
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(result.category.to_string(), "Normal weight");
    }

    #[test]
    fn test_input_floor() {
        assert_eq!(
            calculate(0.5, 170.0),
            Err(BmiError::WeightTooLow { value: 0.5, min: MIN_WEIGHT_KG })
        );
        assert_eq!(
            calculate(60.0, 49.9),
            Err(BmiError::HeightTooLow { value: 49.9, min: MIN_HEIGHT_CM })
        );
        assert!(calculate(MIN_WEIGHT_KG, MIN_HEIGHT_CM).is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(calculate(f64::NAN, 170.0).is_err());
        assert!(calculate(70.0, f64::NAN).is_err());
    }
}
