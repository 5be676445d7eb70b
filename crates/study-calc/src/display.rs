//! Display sinks
//!
//! The calculator never reads anything back from its display. After every
//! token the [`Controller`] pushes a [`Snapshot`] to a [`DisplaySink`], which
//! only has to show it.

use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::core::number::format_number;
use crate::core::{CalcResult, Calculator, Token, TokenCategory};

/// Everything a display shows after a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current display value
    pub display: String,
    /// Expression line
    pub expression: String,
    /// Memory indicator (`"M: 12"`), absent while memory is zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    /// True when `display` is the error marker
    pub error: bool,
}

impl Snapshot {
    /// Captures the visible state of `calc`
    #[must_use]
    pub fn of(calc: &Calculator) -> Self {
        Self {
            display: calc.display().to_string(),
            expression: calc.expression_text(),
            memory: calc.memory_label(),
            error: calc.is_error(),
        }
    }
}

/// Status lines describing calculator state beyond the display
///
/// Shared by the terminal panel and the headless driver.
#[must_use]
pub fn status_lines(calc: &Calculator) -> Vec<String> {
    let mut lines = Vec::new();
    match calc.last_error() {
        Some(err) => lines.push(format!("✗ {err}")),
        None => lines.push("Ready".to_string()),
    }
    if let Some(op) = calc.pending_operator() {
        lines.push(format!("Pending: {}", op.display_symbol()));
    }
    lines.push(format!("Memory: {}", format_number(calc.memory())));
    lines.push(format!("Angles: {}", calc.config().angle_mode));
    lines
}

/// Render target for calculator output
pub trait DisplaySink {
    /// Shows a snapshot, replacing whatever was shown before
    fn show(&mut self, snapshot: &Snapshot);
}

/// Sink that keeps every snapshot it was shown
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Vec<Snapshot>,
}

impl RecordingSink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent snapshot
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    /// All snapshots, oldest first
    #[must_use]
    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    /// Forgets recorded snapshots except the latest
    pub fn truncate(&mut self) {
        if let Some(last) = self.frames.pop() {
            self.frames.clear();
            self.frames.push(last);
        }
    }
}

impl DisplaySink for RecordingSink {
    fn show(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

/// Binds one calculator to one sink
///
/// Constructed once when a display attaches; writes the initial `"0"` frame
/// immediately and one frame per token afterwards.
#[derive(Debug)]
pub struct Controller<S: DisplaySink> {
    calc: Calculator,
    sink: S,
}

impl<S: DisplaySink> Controller<S> {
    /// Attaches a default calculator to `sink`
    pub fn new(sink: S) -> Self {
        Self::with_config(CalculatorConfig::default(), sink)
    }

    /// Attaches a configured calculator to `sink`
    pub fn with_config(config: CalculatorConfig, sink: S) -> Self {
        let mut controller = Self {
            calc: Calculator::with_config(config),
            sink,
        };
        controller.refresh();
        controller
    }

    /// Handles a token and updates the sink
    pub fn dispatch(&mut self, token: Token) {
        self.calc.handle(token);
        self.refresh();
    }

    /// Handles an input-contract triple and updates the sink
    ///
    /// Rejected triples leave both the calculator and the sink untouched.
    pub fn press(
        &mut self,
        label: &str,
        category: TokenCategory,
        operator: Option<char>,
    ) -> CalcResult<()> {
        self.calc.press(label, category, operator)?;
        self.refresh();
        Ok(())
    }

    /// Full reset including memory
    pub fn reset(&mut self) {
        self.calc.reset();
        self.refresh();
    }

    /// Pushes the current state to the sink
    pub fn refresh(&mut self) {
        let snapshot = Snapshot::of(&self.calc);
        self.sink.show(&snapshot);
    }

    /// The calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    /// The sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Detaches and returns the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
