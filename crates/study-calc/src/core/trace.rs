//! Expression trace shown above the display
//!
//! Stored as `{operand, operator}` terms and rendered only when a front end
//! asks for text, so swapping an operator never edits a string in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::number::format_number;
use crate::core::operations::Operation;

/// One `operand operator` pair of the trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceTerm {
    /// Left-hand operand as entered or chained
    pub operand: f64,
    /// Operator typed after it
    pub operator: Operation,
}

/// Ordered record of the expression in progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionTrace {
    terms: Vec<TraceTerm>,
}

impl ExpressionTrace {
    /// Creates an empty trace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no expression is in progress
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in entry order
    #[must_use]
    pub fn terms(&self) -> &[TraceTerm] {
        &self.terms
    }

    /// Appends a term
    pub fn push(&mut self, operand: f64, operator: Operation) {
        self.terms.push(TraceTerm { operand, operator });
    }

    /// Replaces the trace with a single term (after a chained evaluation)
    pub fn restart(&mut self, operand: f64, operator: Operation) {
        self.terms.clear();
        self.push(operand, operator);
    }

    /// Swaps the operator of the last term
    ///
    /// Returns `false` when the trace is empty.
    pub fn replace_operator(&mut self, operator: Operation) -> bool {
        match self.terms.last_mut() {
            Some(term) => {
                term.operator = operator;
                true
            }
            None => false,
        }
    }

    /// Empties the trace
    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Renders the trace as `"3 + "` style text
    #[must_use]
    pub fn render(&self) -> String {
        self.terms
            .iter()
            .map(|t| format!("{} {} ", format_number(t.operand), t.operator.display_symbol()))
            .collect()
    }

    /// Renders the finished line `"3 + 4 = 7"`
    #[must_use]
    pub fn complete(&self, operand: f64, result: f64) -> String {
        format!(
            "{}{} = {}",
            self.render(),
            format_number(operand),
            format_number(result)
        )
    }
}

impl fmt::Display for ExpressionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
