//! Platform-neutral calculator driver
//!
//! Behaviour checks are written once against [`CalculatorDriver`] and run
//! against every front end: the headless controller and, with the `tui`
//! feature, the terminal app.

use crate::config::CalculatorConfig;
use crate::core::history::History;
use crate::core::{CalcResult, Token};
use crate::display::{status_lines, Controller, RecordingSink, Snapshot};

/// Button-level interface shared by all front ends
pub trait CalculatorDriver {
    /// Presses the button with this label
    fn press(&mut self, label: &str) -> CalcResult<()>;

    /// Presses whitespace-separated labels in order
    fn press_sequence(&mut self, labels: &str) -> CalcResult<()> {
        labels.split_whitespace().try_for_each(|label| self.press(label))
    }

    /// Snapshot currently shown
    fn snapshot(&self) -> Snapshot;

    /// Current display value
    fn display(&self) -> String {
        self.snapshot().display
    }

    /// Current expression line
    fn expression(&self) -> String {
        self.snapshot().expression
    }

    /// Memory indicator, if shown
    fn memory(&self) -> Option<String> {
        self.snapshot().memory
    }

    /// True when the display shows the error marker
    fn is_error(&self) -> bool {
        self.snapshot().error
    }

    /// Presses the clear button
    fn clear(&mut self);

    /// Completed expressions, newest first
    fn get_history(&self) -> Vec<HistoryItem>;

    /// Status panel lines
    fn status(&self) -> Vec<String>;
}

/// A completed expression split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Left of `=`, e.g. `"3 + 4"`
    pub expression: String,
    /// Right of `=`, e.g. `"7"`
    pub result: String,
}

impl HistoryItem {
    /// Splits a history line such as `"3 + 4 = 7"`
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        match line.rsplit_once(" = ") {
            Some((expression, result)) => Self {
                expression: expression.to_string(),
                result: result.to_string(),
            },
            None => Self {
                expression: line.to_string(),
                result: String::new(),
            },
        }
    }
}

fn history_items(history: &History) -> Vec<HistoryItem> {
    history
        .iter_rev()
        .map(|entry| HistoryItem::from_line(entry.display()))
        .collect()
}

/// Driver over a [`Controller`] and a [`RecordingSink`]
#[derive(Debug)]
pub struct HeadlessDriver {
    controller: Controller<RecordingSink>,
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a driver with `config`
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            controller: Controller::with_config(config, RecordingSink::new()),
        }
    }

    /// The underlying controller
    #[must_use]
    pub fn controller(&self) -> &Controller<RecordingSink> {
        &self.controller
    }
}

impl CalculatorDriver for HeadlessDriver {
    fn press(&mut self, label: &str) -> CalcResult<()> {
        let token: Token = label.parse()?;
        self.controller.dispatch(token);
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        self.controller
            .sink()
            .current()
            .cloned()
            .unwrap_or_else(|| Snapshot::of(self.controller.calculator()))
    }

    fn clear(&mut self) {
        self.controller.dispatch(Token::Clear);
    }

    fn get_history(&self) -> Vec<HistoryItem> {
        history_items(self.controller.calculator().history())
    }

    fn status(&self) -> Vec<String> {
        status_lines(self.controller.calculator())
    }
}

/// Driver over the terminal app
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{history_items, CalcResult, CalculatorDriver, HistoryItem, Snapshot, Token};
    use crate::tui::CalculatorApp;

    /// Driver pressing tokens into a [`CalculatorApp`]
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self {
                app: CalculatorApp::new(),
            }
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// The underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, label: &str) -> CalcResult<()> {
            let token: Token = label.parse()?;
            self.app.press_token(token);
            Ok(())
        }

        fn snapshot(&self) -> Snapshot {
            self.app.snapshot()
        }

        fn clear(&mut self) {
            self.app.press_token(Token::Clear);
        }

        fn get_history(&self) -> Vec<HistoryItem> {
            history_items(self.app.controller().calculator().history())
        }

        fn status(&self) -> Vec<String> {
            self.app.status_lines()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared behaviour checks =====
// Each assumes a driver built with the default configuration.

fn run<D: CalculatorDriver>(driver: &mut D, labels: &str) {
    driver.clear();
    assert!(
        driver.press_sequence(labels).is_ok(),
        "labels should parse: {labels}"
    );
}

/// Digits concatenate, one point per operand, leading zero suppressed
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "1 2 . 5");
    assert_eq!(driver.display(), "12.5");

    run(driver, "0 0 7");
    assert_eq!(driver.display(), "7");

    run(driver, "1 . 2 . 3");
    assert_eq!(driver.display(), "1.23");
}

/// The four operators, completed with `=`
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "3 + 4 =");
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.expression(), "3 + 4 = 7");
    assert!(!driver.status().iter().any(|l| l.starts_with("Pending")));

    run(driver, "9 − 4 =");
    assert_eq!(driver.display(), "5");

    run(driver, "6 × 7 =");
    assert_eq!(driver.display(), "42");

    run(driver, "2 0 ÷ 4 =");
    assert_eq!(driver.display(), "5");
}

/// Chained operators evaluate strictly left to right
pub fn verify_left_to_right<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "3 + 4 ×");
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.expression(), "7 × ");

    driver.press_sequence("2 =").ok();
    assert_eq!(driver.display(), "14");
}

/// Unary functions apply in place; domain errors show the marker
pub fn verify_functions<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "1 6 √");
    assert_eq!(driver.display(), "4");

    run(driver, "2 x³");
    assert_eq!(driver.display(), "8");

    run(driver, "1 0 0 log");
    assert_eq!(driver.display(), "2");

    run(driver, "e ln");
    assert_eq!(driver.display(), "1");

    run(driver, "0 − 4 = √");
    assert!(driver.is_error());
}

/// Division by zero yields zero under the default policy
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "5 ÷ 0 =");
    assert_eq!(driver.display(), "0");
    assert!(!driver.is_error());
}

/// `0.1 + 0.2` is rounded to seven places
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "0 . 1 + 0 . 2 =");
    assert_eq!(driver.display(), "0.3");
}

/// Memory survives clear
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "MC 2 M+ C 3 M+ MR");
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.memory().as_deref(), Some("M: 5"));

    driver.clear();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.expression(), "");
    assert_eq!(driver.memory().as_deref(), Some("M: 5"));

    driver.press("MC").ok();
    assert_eq!(driver.memory(), None);
}

/// Completed expressions are listed newest first
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "1 + 1 = 2 + 2 = 3 + 3 =");
    let history = driver.get_history();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history[0],
        HistoryItem {
            expression: "3 + 3".into(),
            result: "6".into(),
        }
    );
    assert_eq!(history[2].expression, "1 + 1");

    driver.clear();
    assert!(driver.get_history().is_empty());
}

/// Errors are reported in the status lines until the next token
pub fn verify_error_status<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "0 ln");
    assert!(driver.is_error());
    assert!(driver.status()[0].starts_with('✗'));

    driver.clear();
    assert!(!driver.is_error());
    assert_eq!(driver.status()[0], "Ready");
}

/// Runs every shared check
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_basic_arithmetic(driver);
    verify_left_to_right(driver);
    verify_functions(driver);
    verify_division_by_zero(driver);
    verify_rounding(driver);
    verify_memory(driver);
    verify_history(driver);
    verify_error_status(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, DivisionByZero};

    // ===== Headless driver =====

    #[test]
    fn test_headless_initial_state() {
        let driver = HeadlessDriver::new();
        assert_eq!(driver.display(), "0");
        assert_eq!(driver.expression(), "");
        assert_eq!(driver.memory(), None);
        assert!(driver.get_history().is_empty());
    }

    #[test]
    fn test_headless_rejects_unknown_label() {
        let mut driver = HeadlessDriver::new();
        let result = driver.press("%");
        assert!(matches!(result, Err(CalcError::InvalidToken { .. })));
        assert_eq!(driver.controller().sink().frames().len(), 1);
    }

    #[test]
    fn test_press_sequence_stops_at_first_bad_label() {
        let mut driver = HeadlessDriver::new();
        assert!(driver.press_sequence("1 2 bogus 3").is_err());
        assert_eq!(driver.display(), "12");
    }

    #[test]
    fn test_headless_error_policy() {
        let config = CalculatorConfig::default().with_division_by_zero(DivisionByZero::Error);
        let mut driver = HeadlessDriver::with_config(config);
        driver.press_sequence("5 ÷ 0 =").unwrap();
        assert!(driver.is_error());
        assert_eq!(driver.expression(), "");
    }

    #[test]
    fn test_unified_headless() {
        let mut driver = HeadlessDriver::new();
        run_all_checks(&mut driver);
    }

    // ===== HistoryItem =====

    #[test]
    fn test_history_item_from_line() {
        let item = HistoryItem::from_line("1.5 × 2 = 3");
        assert_eq!(item.expression, "1.5 × 2");
        assert_eq!(item.result, "3");
    }

    #[test]
    fn test_history_item_without_equals() {
        let item = HistoryItem::from_line("7");
        assert_eq!(item.expression, "7");
        assert!(item.result.is_empty());
    }

    // ===== TUI driver =====

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;

        #[test]
        fn test_tui_driver_new() {
            let driver = TuiDriver::new();
            assert_eq!(driver.display(), "0");
            assert!(driver.app().snapshot().expression.is_empty());
        }

        #[test]
        fn test_tui_driver_with_app() {
            let mut app = crate::tui::CalculatorApp::new();
            app.press_token(Token::Digit(8));
            let driver = TuiDriver::with_app(app);
            assert_eq!(driver.display(), "8");
        }

        #[test]
        fn test_tui_driver_highlights_pressed_button() {
            let mut driver = TuiDriver::new();
            driver.press("√").unwrap();
            let idx = driver.app().highlighted().unwrap();
            assert_eq!(driver.app().keypad().get_button(idx).unwrap().label, "√");
        }

        #[test]
        fn test_unified_tui() {
            let mut driver = TuiDriver::new();
            run_all_checks(&mut driver);
        }
    }
}
