//! Unit-bearing scalar quantities
//!
//! Provides [`Distance`] and [`Angle`], the physical quantities used by
//! symbol properties such as depth-offset biases and crease angles. Values
//! carry their unit explicitly; parsing accepts `"5m"`, `"5 m"`, `"5km"`,
//! or a bare number (defaulting to meters for distances and degrees for
//! angles).

use std::fmt;
use std::str::FromStr;

use approx::relative_eq;
use serde::{Deserialize, Serialize};

/// Error returned when a quantity string cannot be parsed
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid quantity: {0:?}")]
pub struct QuantityParseError(pub String);

/// Linear (distance) units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinearUnit {
    /// Meters (the default unit)
    Meters,
    /// Kilometers
    Kilometers,
    /// International feet
    Feet,
    /// Yards
    Yards,
    /// Statute miles
    Miles,
    /// Nautical miles
    NauticalMiles,
}

impl LinearUnit {
    /// Conversion factor from this unit to meters
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => 1000.0,
            Self::Feet => 0.3048,
            Self::Yards => 0.9144,
            Self::Miles => 1609.344,
            Self::NauticalMiles => 1852.0,
        }
    }

    /// Canonical suffix used when formatting
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Feet => "ft",
            Self::Yards => "yd",
            Self::Miles => "mi",
            Self::NauticalMiles => "nm",
        }
    }

    /// Resolve a unit suffix (case-insensitive)
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Some(Self::Meters),
            "km" | "kilometer" | "kilometers" => Some(Self::Kilometers),
            "ft" | "foot" | "feet" => Some(Self::Feet),
            "yd" | "yds" | "yard" | "yards" => Some(Self::Yards),
            "mi" | "mile" | "miles" => Some(Self::Miles),
            "nm" | "nmi" => Some(Self::NauticalMiles),
            _ => None,
        }
    }
}

/// Angular units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngularUnit {
    /// Degrees (the default unit)
    Degrees,
    /// Radians
    Radians,
}

impl AngularUnit {
    /// Conversion factor from this unit to degrees
    pub fn degrees_per_unit(self) -> f64 {
        match self {
            Self::Degrees => 1.0,
            Self::Radians => 180.0 / std::f64::consts::PI,
        }
    }

    /// Canonical suffix used when formatting
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Degrees => "deg",
            Self::Radians => "rad",
        }
    }

    /// Resolve a unit suffix (case-insensitive)
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Some(Self::Degrees),
            "rad" | "radian" | "radians" => Some(Self::Radians),
            _ => None,
        }
    }
}

/// A linear distance with an explicit unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Distance {
    value: f64,
    unit: LinearUnit,
}

impl Distance {
    /// Create a distance from a value and unit
    pub fn new(value: f64, unit: LinearUnit) -> Self {
        Self { value, unit }
    }

    /// The raw value in this distance's own unit
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit this distance is denominated in
    pub fn unit(&self) -> LinearUnit {
        self.unit
    }

    /// This distance converted to meters
    pub fn as_meters(&self) -> f64 {
        self.value * self.unit.meters_per_unit()
    }

    /// Parse a distance string such as `"5m"`, `"5 km"`, or `"5"`.
    ///
    /// A bare number defaults to meters. Returns `None` when the text is
    /// not a number or carries an unrecognized suffix; callers decide
    /// whether that means "leave the target untouched".
    pub fn parse(s: &str) -> Option<Self> {
        let (value, suffix) = split_number_suffix(s)?;
        let unit = if suffix.is_empty() {
            LinearUnit::Meters
        } else {
            LinearUnit::from_suffix(suffix)?
        };
        Some(Self::new(value, unit))
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        relative_eq!(self.as_meters(), other.as_meters())
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Distance {
    type Err = QuantityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| QuantityParseError(s.to_string()))
    }
}

/// An angle with an explicit unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Angle {
    value: f64,
    unit: AngularUnit,
}

impl Angle {
    /// Create an angle from a value and unit
    pub fn new(value: f64, unit: AngularUnit) -> Self {
        Self { value, unit }
    }

    /// The raw value in this angle's own unit
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit this angle is denominated in
    pub fn unit(&self) -> AngularUnit {
        self.unit
    }

    /// This angle converted to degrees
    pub fn as_degrees(&self) -> f64 {
        self.value * self.unit.degrees_per_unit()
    }

    /// This angle converted to radians
    pub fn as_radians(&self) -> f64 {
        self.as_degrees() * std::f64::consts::PI / 180.0
    }

    /// Parse an angle string such as `"45deg"`, `"0.5 rad"`, or `"45"`.
    ///
    /// A bare number defaults to degrees. Returns `None` when the text is
    /// not a number or carries an unrecognized suffix.
    pub fn parse(s: &str) -> Option<Self> {
        let (value, suffix) = split_number_suffix(s)?;
        let unit = if suffix.is_empty() {
            AngularUnit::Degrees
        } else {
            AngularUnit::from_suffix(suffix)?
        };
        Some(Self::new(value, unit))
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        relative_eq!(self.as_degrees(), other.as_degrees())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Angle {
    type Err = QuantityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| QuantityParseError(s.to_string()))
    }
}

/// Split a quantity string into its numeric prefix and unit suffix.
///
/// Exponent notation ("5e3km") is kept with the number; the suffix starts
/// at the first alphabetic character that cannot continue the number.
fn split_number_suffix(s: &str) -> Option<(f64, &str)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let mut split = s.len();
    for (i, ch) in s.char_indices() {
        if ch.is_ascii_alphabetic() {
            if ch == 'e' || ch == 'E' {
                let rest = &s[i + 1..];
                if rest.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
                    continue;
                }
            }
            split = i;
            break;
        }
    }
    let value: f64 = s[..split].trim().parse().ok()?;
    Some((value, s[split..].trim()))
}
