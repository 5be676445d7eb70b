//! Token-driven calculator engine
//!
//! The calculator is a small state machine whose states are implicit in
//! three fields: whether an operator is pending, whether the next digit
//! starts a fresh operand, and whether an expression is being traced.
//!
//! ```text
//! Idle --digit--> OperandEntry --op--> AwaitingOperand --digit--> OperandEntry
//!  ^                                        |  ^                      |
//!  |                                        +--+ op (replace)         |
//!  +---------------- '=' / clear ------------------------------------+
//! ```
//!
//! Evaluation is strictly left to right: `3 + 4 × 2 =` computes `3 + 4`
//! when `×` is pressed and then `7 × 2`. An operator pressed while the next
//! digit would start a fresh operand only swaps the pending operator, so
//! `3 + 1 6 √ ×` leaves `3 × ` in the trace.

use crate::config::CalculatorConfig;
use crate::core::history::History;
use crate::core::number::{format_number, parse_leading, round_to};
use crate::core::trace::ExpressionTrace;
use crate::core::{
    calculate, CalcError, CalcResult, Constant, MemoryAction, Operation, ScientificFunction,
    Token, TokenCategory,
};

/// Calculator state and token dispatcher
///
/// Owns every piece of calculator state; front ends only read it back after
/// each token. Token handling never fails: problems show up as the configured
/// error marker in the display and as [`Calculator::last_error`].
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    /// Operand currently shown
    display: String,
    /// Operator waiting for its right-hand operand
    pending: Option<Operation>,
    /// Left-hand operand carried across chained operations
    accumulator: f64,
    trace: ExpressionTrace,
    memory: f64,
    /// Next digit starts a fresh operand
    reset_pending: bool,
    /// Line produced by the last `=`, shown until the expression text refreshes
    completed: Option<String>,
    last_error: Option<CalcError>,
    history: History,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator with custom settings
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let history = History::with_capacity(config.history_capacity);
        Self {
            config,
            display: "0".to_string(),
            pending: None,
            accumulator: 0.0,
            trace: ExpressionTrace::new(),
            memory: 0.0,
            reset_pending: false,
            completed: None,
            last_error: None,
            history,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Current display value
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Operator awaiting its second operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending
    }

    /// Left-hand operand of the pending operation
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Expression in progress
    #[must_use]
    pub fn trace(&self) -> &ExpressionTrace {
        &self.trace
    }

    /// Memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// True when the next digit starts a new operand
    #[must_use]
    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Completed expressions
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Reason behind the error marker, if the last token produced one
    #[must_use]
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// True when the display shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display == self.config.error_marker
    }

    /// Text for the expression line
    ///
    /// Right after `=` this is the completed line (`"3 + 4 = 7"`) even though
    /// the trace itself is already empty.
    #[must_use]
    pub fn expression_text(&self) -> String {
        match &self.completed {
            Some(line) => line.clone(),
            None => self.trace.render(),
        }
    }

    /// Memory indicator, present while the register is non-zero
    #[must_use]
    pub fn memory_label(&self) -> Option<String> {
        (self.memory != 0.0).then(|| format!("M: {}", format_number(self.memory)))
    }

    /// Validates an input-contract triple and handles it
    pub fn press(
        &mut self,
        label: &str,
        category: TokenCategory,
        operator: Option<char>,
    ) -> CalcResult<()> {
        let token = Token::from_parts(label, category, operator).map_err(|err| {
            tracing::warn!(label, %category, ?operator, %err, "rejected key press");
            err
        })?;
        self.handle(token);
        Ok(())
    }

    /// Handles a single token to completion
    pub fn handle(&mut self, token: Token) {
        tracing::trace!(?token, display = %self.display, "handling token");
        self.last_error = None;

        match token {
            Token::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.enter_digit(c);
                }
            }
            Token::Point => self.enter_point(),
            Token::Operator(op) => self.apply_operator(op),
            Token::Equals => self.equals(),
            Token::Function(f) => self.apply_function(f),
            Token::Constant(c) => self.insert_constant(c),
            Token::Memory(action) => self.memory_action(action),
            Token::OpenParen => self.display.push('('),
            Token::Clear => self.clear(),
            Token::Delete => self.delete(),
        }
    }

    /// Handles a sequence of tokens
    pub fn handle_all(&mut self, tokens: impl IntoIterator<Item = Token>) {
        for token in tokens {
            self.handle(token);
        }
    }

    /// Clear token: everything except the memory register
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.trace.clear();
        self.pending = None;
        self.accumulator = 0.0;
        self.reset_pending = false;
        self.completed = None;
        self.last_error = None;
        self.history.clear();
    }

    /// Full reset, memory included
    pub fn reset(&mut self) {
        self.clear();
        self.memory = 0.0;
    }

    fn enter_digit(&mut self, digit: char) {
        self.completed = None;
        if self.reset_pending {
            self.display = digit.to_string();
            self.reset_pending = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    fn enter_point(&mut self) {
        if self.reset_pending {
            self.completed = None;
            self.display = "0.".to_string();
            self.reset_pending = false;
        } else if !self.display.contains('.') {
            self.completed = None;
            self.display.push('.');
        }
    }

    fn apply_operator(&mut self, op: Operation) {
        self.completed = None;
        let Some(current) = parse_leading(&self.display) else {
            self.abandon(CalcError::InvalidNumber(self.display.clone()));
            return;
        };

        let pending = self.pending;
        match pending {
            _ if self.trace.is_empty() => {
                self.accumulator = current;
                self.trace.push(current, op);
            }
            Some(_) if self.reset_pending => {
                self.trace.replace_operator(op);
            }
            Some(pending) => match self.evaluate(self.accumulator, current, pending) {
                Ok(result) => {
                    tracing::debug!(
                        lhs = self.accumulator,
                        rhs = current,
                        op = ?pending,
                        result,
                        "chained evaluation"
                    );
                    self.display = format_number(result);
                    self.accumulator = result;
                    self.trace.restart(result, op);
                }
                Err(err) => {
                    self.abandon(err);
                    return;
                }
            },
            None => {
                self.accumulator = current;
                self.trace.restart(current, op);
            }
        }

        self.pending = Some(op);
        self.reset_pending = true;
    }

    fn equals(&mut self) {
        let Some(op) = self.pending else {
            return;
        };
        self.completed = None;

        let Some(current) = parse_leading(&self.display) else {
            self.abandon(CalcError::InvalidNumber(self.display.clone()));
            return;
        };

        match self.evaluate(self.accumulator, current, op) {
            Ok(result) => {
                let line = self.trace.complete(current, result);
                tracing::debug!(expression = %line, "expression completed");
                self.history.record(&line, result);
                self.display = format_number(result);
                self.completed = Some(line);
                self.accumulator = result;
                self.pending = None;
                self.trace.clear();
                self.reset_pending = true;
            }
            Err(err) => self.abandon(err),
        }
    }

    fn apply_function(&mut self, function: ScientificFunction) {
        let result = parse_leading(&self.display)
            .ok_or_else(|| CalcError::InvalidNumber(self.display.clone()))
            .and_then(|value| function.apply(value, self.config.angle_mode));

        match result {
            Ok(value) => {
                self.display = format_number(round_to(value, self.config.precision));
                self.reset_pending = true;
            }
            Err(err) => self.fail(err),
        }
    }

    fn insert_constant(&mut self, constant: Constant) {
        self.display = format_number(constant.value());
        self.reset_pending = true;
    }

    fn memory_action(&mut self, action: MemoryAction) {
        match action {
            MemoryAction::Add => match parse_leading(&self.display) {
                Some(value) if (self.memory + value).is_finite() => self.memory += value,
                _ => tracing::debug!(display = %self.display, "memory add ignored"),
            },
            MemoryAction::Recall => {
                self.display = format_number(self.memory);
                self.reset_pending = true;
            }
            MemoryAction::Clear => self.memory = 0.0,
        }
    }

    fn delete(&mut self) {
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
    }

    fn evaluate(&self, a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        calculate(a, b, op, self.config.division_by_zero)
            .map(|result| round_to(result, self.config.precision))
    }

    /// Shows the error marker; the expression in progress survives
    fn fail(&mut self, err: CalcError) {
        tracing::debug!(%err, "token produced an error");
        self.display = self.config.error_marker.clone();
        self.reset_pending = true;
        self.last_error = Some(err);
    }

    /// Shows the error marker and drops the expression in progress
    fn abandon(&mut self, err: CalcError) {
        self.fail(err);
        self.pending = None;
        self.trace.clear();
        self.completed = None;
    }
}
