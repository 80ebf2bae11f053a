//! Measurement units for lengths in the plan.
//!
//! Model lengths are always stored in centimeters; `LengthUnit` controls how
//! they are displayed, parsed and snapped ("magnetized") during editing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Measurement unit used to display and snap lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Metric unit, lengths edited in centimeters.
    Centimeter,
    /// Imperial unit, lengths edited in inches and fractions.
    Inch,
}

impl Default for LengthUnit {
    fn default() -> Self {
        LengthUnit::Centimeter
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Centimeter => write!(f, "cm"),
            LengthUnit::Inch => write!(f, "in"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "metric" => Ok(LengthUnit::Centimeter),
            "in" | "inch" | "imperial" => Ok(LengthUnit::Inch),
            _ => Err(ModelError::UnknownUnit {
                value: s.to_string(),
            }),
        }
    }
}

impl LengthUnit {
    /// Returns the value close to `length` (in centimeters) snapped to the
    /// unit's preferred granularity. `max_delta` is how far in centimeters
    /// the snapped value may drift from the raw one, typically the length of
    /// one pixel at the current scale; a larger allowance selects a coarser
    /// precision step.
    pub fn magnetized_length(&self, length: f64, max_delta: f64) -> f64 {
        match self {
            LengthUnit::Centimeter => {
                let max_delta = max_delta * 2.0;
                let precision = if max_delta > 100.0 {
                    100.0
                } else if max_delta > 10.0 {
                    10.0
                } else if max_delta > 5.0 {
                    5.0
                } else if max_delta > 1.0 {
                    1.0
                } else if max_delta > 0.5 {
                    0.5
                } else {
                    0.1
                };
                (length / precision).round() * precision
            }
            LengthUnit::Inch => {
                let max_delta = centimeter_to_inch(max_delta) * 2.0;
                let precision = if max_delta > 6.0 {
                    6.0
                } else if max_delta > 3.0 {
                    3.0
                } else if max_delta > 1.0 {
                    1.0
                } else if max_delta > 0.5 {
                    0.5
                } else if max_delta > 0.25 {
                    0.25
                } else {
                    0.125
                };
                inch_to_centimeter((centimeter_to_inch(length) / precision).round() * precision)
            }
        }
    }

    /// Smallest length in centimeters an entity may be resized to.
    pub fn minimum_length(&self) -> f64 {
        match self {
            LengthUnit::Centimeter => 0.1,
            LengthUnit::Inch => inch_to_centimeter(0.125),
        }
    }

    /// Formats a length in centimeters for display in this unit.
    pub fn format(&self, length: f64) -> String {
        match self {
            LengthUnit::Centimeter => format!("{:.1} cm", length),
            LengthUnit::Inch => format!("{:.3} in", centimeter_to_inch(length)),
        }
    }

    /// Parses a length typed in this unit into centimeters.
    /// Imperial input accepts fractions such as `1 1/2`.
    pub fn parse(&self, input: &str) -> crate::Result<f64> {
        let text = input.trim();
        if text.is_empty() {
            return Err(ModelError::InvalidLength {
                input: input.to_string(),
                reason: "empty input".to_string(),
            });
        }
        let value = match self {
            LengthUnit::Centimeter => parse_decimal(text)?,
            LengthUnit::Inch => inch_to_centimeter(parse_inches(text)?),
        };
        Ok(value)
    }
}

/// Converts a length in centimeters to inches.
pub fn centimeter_to_inch(length: f64) -> f64 {
    length / 2.54
}

/// Converts a length in inches to centimeters.
pub fn inch_to_centimeter(length: f64) -> f64 {
    length * 2.54
}

fn parse_decimal(text: &str) -> crate::Result<f64> {
    text.parse::<f64>().map_err(|e| ModelError::InvalidLength {
        input: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_inches(text: &str) -> crate::Result<f64> {
    // "5", "5.25", "1 1/2" or "3/8"
    let invalid = |reason: &str| ModelError::InvalidLength {
        input: text.to_string(),
        reason: reason.to_string(),
    };
    if let Some((num, den)) = text.rsplit_once('/') {
        let den: f64 = den.trim().parse().map_err(|_| invalid("bad denominator"))?;
        if den == 0.0 {
            return Err(invalid("zero denominator"));
        }
        let (whole, num) = match num.trim().rsplit_once(' ') {
            Some((w, n)) => (
                w.trim().parse::<f64>().map_err(|_| invalid("bad number"))?,
                n.trim().parse::<f64>().map_err(|_| invalid("bad numerator"))?,
            ),
            None => (
                0.0,
                num.trim().parse::<f64>().map_err(|_| invalid("bad numerator"))?,
            ),
        };
        Ok(whole + num / den)
    } else {
        text.parse::<f64>().map_err(|_| invalid("not a number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse_unit_names() {
        assert_eq!(LengthUnit::Centimeter.to_string(), "cm");
        assert_eq!("inch".parse::<LengthUnit>().unwrap(), LengthUnit::Inch);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_magnetized_length_metric_precision_ladder() {
        let unit = LengthUnit::Centimeter;
        // One pixel at scale 1 allows 2 cm of drift: snap to whole centimeters
        assert_eq!(unit.magnetized_length(123.4, 1.0), 123.0);
        // Very coarse zoom snaps to meters
        assert_eq!(unit.magnetized_length(1234.0, 60.0), 1200.0);
        // Fine zoom snaps to millimeters
        assert!((unit.magnetized_length(12.34, 0.2) - 12.3).abs() < 1e-9);
    }

    #[test]
    fn test_magnetized_length_imperial_precision_ladder() {
        let unit = LengthUnit::Inch;
        // Half a centimeter of drift selects quarter-inch precision
        let snapped = unit.magnetized_length(inch_to_centimeter(5.2), 0.5);
        assert!((centimeter_to_inch(snapped) - 5.25).abs() < 1e-9);
        // Fine zoom snaps to eighths
        let snapped = unit.magnetized_length(inch_to_centimeter(5.06), 0.2);
        assert!((centimeter_to_inch(snapped) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_length() {
        assert_eq!(LengthUnit::Centimeter.minimum_length(), 0.1);
        assert!((LengthUnit::Inch.minimum_length() - 0.3175).abs() < 1e-9);
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!(LengthUnit::Centimeter.parse("250").unwrap(), 250.0);
        assert!(LengthUnit::Centimeter.parse("abc").is_err());
    }

    #[test]
    fn test_parse_imperial_fractions() {
        let cm = LengthUnit::Inch.parse("1 1/2").unwrap();
        assert!((cm - 3.81).abs() < 1e-9);
        let cm = LengthUnit::Inch.parse("3/8").unwrap();
        assert!((cm - inch_to_centimeter(0.375)).abs() < 1e-9);
        assert!(LengthUnit::Inch.parse("1/0").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(LengthUnit::Centimeter.format(250.0), "250.0 cm");
        assert_eq!(LengthUnit::Inch.format(inch_to_centimeter(5.25)), "5.250 in");
    }
}
