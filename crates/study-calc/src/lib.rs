//! Scientific keypad calculator
//!
//! A token-driven calculator: every button press is one [`core::Token`],
//! handled to completion by a [`core::Calculator`] that keeps a running
//! accumulator, a pending operator, an expression trace and a memory
//! register. After each token a [`display::Controller`] pushes a
//! [`display::Snapshot`] to whatever [`display::DisplaySink`] is attached.
//!
//! Binary operators evaluate strictly left to right; there is no precedence
//! and parentheses are cosmetic.
//!
//! # Example
//!
//! ```rust
//! use study_calc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for label in ["3", "+", "4", "×", "2", "="] {
//!     calc.handle(label.parse().unwrap());
//! }
//! assert_eq!(calc.display(), "14");
//! assert_eq!(calc.expression_text(), "7 × 2 = 14");
//!
//! // The same thing through a sink
//! let mut controller = Controller::new(RecordingSink::new());
//! controller.press("9", TokenCategory::Num, None).unwrap();
//! controller.press("√", TokenCategory::Func, None).unwrap();
//! assert_eq!(controller.sink().current().unwrap().display, "3");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod keypad;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        AngleMode, CalcError, CalcResult, Calculator, Constant, DivisionByZero, MemoryAction,
        Operation, ScientificFunction, Token, TokenCategory,
    };
    pub use crate::display::{Controller, DisplaySink, RecordingSink, Snapshot};
    pub use crate::driver::{CalculatorDriver, HeadlessDriver, HistoryItem};
    pub use crate::keypad::{Keypad, KeypadButton};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
