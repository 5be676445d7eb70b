//! Calculator core: tokens, arithmetic, trace, history and the token engine
//!
//! Nothing in here touches a terminal or a sink. Front ends feed
//! [`Token`]s into a [`Calculator`] and read back display text.

pub mod engine;
pub mod functions;
pub mod history;
pub mod number;
mod operations;
pub mod token;
pub mod trace;

pub use engine::Calculator;
pub use functions::{AngleMode, Constant, ScientificFunction};
pub use operations::{calculate, DivisionByZero, Operation};
pub use token::{MemoryAction, Token, TokenCategory};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these escape token handling: the engine turns them into the
/// configured error marker and keeps the most recent one for status display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A `(label, category, operator)` triple that names no known token
    #[error("Invalid token '{label}' for category '{category}'")]
    InvalidToken {
        /// Button label as received
        label: String,
        /// Category as received
        category: String,
    },
    /// An `op` token arrived without an operator symbol
    #[error("Operator token '{0}' is missing its operator symbol")]
    MissingOperator(String),
    /// Display text could not be read as a number
    #[error("Not a number: '{0}'")]
    InvalidNumber(String),
    /// Division by zero under the `error` policy
    #[error("Division by zero")]
    DivisionByZero,
    /// Function applied outside its domain
    #[error("{function} is undefined for {value}")]
    Domain {
        /// Function label
        function: &'static str,
        /// Offending argument
        value: f64,
    },
    /// Result overflowed to infinity or became NaN
    #[error("Result is not a finite number")]
    NonFinite,
}
