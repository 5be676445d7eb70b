//! Unary scientific functions and constants

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// How trigonometric functions read their argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// The display value is taken as radians
    #[default]
    Radians,
    /// The display value is taken as degrees
    Degrees,
}

impl std::fmt::Display for AngleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Radians => "radians",
            Self::Degrees => "degrees",
        })
    }
}

impl AngleMode {
    fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_radians(),
        }
    }
}

/// Functions applied in place to the display value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScientificFunction {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    /// Square root
    Sqrt,
    /// x²
    Square,
    /// x³
    Cube,
}

impl ScientificFunction {
    /// All functions in keypad order
    pub const ALL: [ScientificFunction; 8] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
        Self::Square,
        Self::Cube,
    ];

    /// Keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "√",
            Self::Square => "x²",
            Self::Cube => "x³",
        }
    }

    /// Parses a keypad label or its ASCII spelling
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "log" => Some(Self::Log),
            "ln" => Some(Self::Ln),
            "√" | "sqrt" => Some(Self::Sqrt),
            "x²" | "x^2" | "sqr" => Some(Self::Square),
            "x³" | "x^3" | "cube" => Some(Self::Cube),
            _ => None,
        }
    }

    /// Applies the function
    ///
    /// A NaN result means the argument is outside the domain; an infinite
    /// one (`log 0`) is reported as non-finite.
    pub fn apply(&self, value: f64, angle_mode: AngleMode) -> CalcResult<f64> {
        let result = match self {
            Self::Sin => angle_mode.to_radians(value).sin(),
            Self::Cos => angle_mode.to_radians(value).cos(),
            Self::Tan => angle_mode.to_radians(value).tan(),
            Self::Log => value.log10(),
            Self::Ln => value.ln(),
            Self::Sqrt => value.sqrt(),
            Self::Square => value * value,
            Self::Cube => value * value * value,
        };

        if result.is_nan() {
            Err(CalcError::Domain {
                function: self.label(),
                value,
            })
        } else if result.is_infinite() {
            Err(CalcError::NonFinite)
        } else {
            Ok(result)
        }
    }
}

/// Constants that overwrite the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Parses a keypad label or its ASCII spelling
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "π" | "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    /// Full-precision value
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}
