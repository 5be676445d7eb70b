//! Binary operators and the evaluation rule
//!
//! Type-safe operation enum: only the four keypad operators exist, so the
//! evaluator never sees an unknown symbol.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operator awaiting its right-hand operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Operation; 4] = [
        Operation::Divide,
        Operation::Multiply,
        Operation::Subtract,
        Operation::Add,
    ];

    /// ASCII operator symbol carried by the input contract
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Symbol shown on the keypad and in the expression trace
    #[must_use]
    pub const fn display_symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Parses either the ASCII or the keypad symbol
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' | 'x' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// What dividing by zero produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionByZero {
    /// The quotient is `0`
    #[default]
    Zero,
    /// The division fails and the display shows the error marker
    Error,
}

/// Applies `op` to `a` and `b`
///
/// Evaluation is strictly pairwise; there is no precedence. Non-finite
/// results are rejected so an overflow never reaches the display as a numeral.
pub fn calculate(a: f64, b: f64, op: Operation, on_zero: DivisionByZero) -> CalcResult<f64> {
    let result = match op {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide if b == 0.0 => match on_zero {
            DivisionByZero::Zero => 0.0,
            DivisionByZero::Error => return Err(CalcError::DivisionByZero),
        },
        Operation::Divide => a / b,
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::NonFinite)
    }
}
