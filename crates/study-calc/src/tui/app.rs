//! TUI application state

use ratatui::layout::Rect;

use crate::config::CalculatorConfig;
use crate::core::Token;
use crate::display::{status_lines, Controller, DisplaySink, Snapshot};
use crate::keypad::Keypad;

use super::input::KeyAction;
use super::keypad::hit_test;

/// Sink holding the snapshot the terminal currently shows
#[derive(Debug, Clone, Default)]
pub struct DisplayPanel {
    current: Option<Snapshot>,
    frames: usize,
}

impl DisplayPanel {
    /// Creates an empty panel
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot on screen
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// Number of snapshots received
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl DisplaySink for DisplayPanel {
    fn show(&mut self, snapshot: &Snapshot) {
        self.current = Some(snapshot.clone());
        self.frames += 1;
    }
}

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    controller: Controller<DisplayPanel>,
    keypad: Keypad,
    /// Last button pressed, shown highlighted
    highlighted: Option<usize>,
    should_quit: bool,
    show_help: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates an app with `config`
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            controller: Controller::with_config(config, DisplayPanel::new()),
            keypad: Keypad::new(),
            highlighted: None,
            should_quit: false,
            show_help: true,
        }
    }

    /// Snapshot currently displayed
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.controller
            .sink()
            .current()
            .cloned()
            .unwrap_or_else(|| Snapshot::of(self.controller.calculator()))
    }

    /// The underlying controller
    #[must_use]
    pub fn controller(&self) -> &Controller<DisplayPanel> {
        &self.controller
    }

    /// The keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Highlighted button index
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the help sidebar is shown
    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Feeds a token and highlights its button, if it has one
    pub fn press_token(&mut self, token: Token) {
        self.highlighted = self.keypad.find_by_token(token);
        self.controller.dispatch(token);
    }

    /// Presses the keypad button at `index`
    pub fn press_button(&mut self, index: usize) {
        if let Some(token) = self.keypad.get_button(index).map(|b| b.token) {
            self.highlighted = Some(index);
            self.controller.dispatch(token);
        }
    }

    /// Handles a mouse click at `(x, y)` against the keypad drawn in `area`
    ///
    /// Returns true when the click landed on a button.
    pub fn click(&mut self, area: Rect, x: u16, y: u16) -> bool {
        match hit_test(&self.keypad, area, x, y) {
            Some(index) => {
                self.press_button(index);
                true
            }
            None => false,
        }
    }

    /// Applies a keyboard action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(token) => self.press_token(token),
            KeyAction::Reset => {
                self.highlighted = None;
                self.controller.reset();
            }
            KeyAction::ToggleHelp => self.show_help = !self.show_help,
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// History lines, newest first
    #[must_use]
    pub fn history_lines(&self, limit: usize) -> Vec<String> {
        self.controller
            .calculator()
            .history()
            .iter_rev()
            .take(limit)
            .map(|entry| entry.display().to_string())
            .collect()
    }

    /// Status panel lines
    #[must_use]
    pub fn status_lines(&self) -> Vec<String> {
        status_lines(self.controller.calculator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operation, ScientificFunction};

    fn press_all(app: &mut CalculatorApp, labels: &str) {
        for label in labels.split_whitespace() {
            app.press_token(label.parse().unwrap());
        }
    }

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.snapshot().display, "0");
        assert!(app.highlighted().is_none());
        assert!(!app.should_quit());
        assert!(app.show_help());
        assert_eq!(app.controller().sink().frames(), 1);
    }

    #[test]
    fn test_press_tokens_updates_panel() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "1 2 + 3 =");
        let snap = app.snapshot();
        assert_eq!(snap.display, "15");
        assert_eq!(snap.expression, "12 + 3 = 15");
        assert_eq!(app.controller().sink().frames(), 6);
    }

    #[test]
    fn test_press_token_highlights_button() {
        let mut app = CalculatorApp::new();
        app.press_token(Token::Operator(Operation::Divide));
        let idx = app.highlighted().unwrap();
        assert_eq!(app.keypad().get_button(idx).unwrap().label, "÷");

        // MR is keyboard-only and has no button
        app.press_token("MR".parse().unwrap());
        assert!(app.highlighted().is_none());
    }

    #[test]
    fn test_press_button_by_index() {
        let mut app = CalculatorApp::new();
        let nine = app.keypad().find_by_label("9").unwrap();
        let sqrt = app.keypad().find_by_label("√").unwrap();
        app.press_button(nine);
        app.press_button(sqrt);
        assert_eq!(app.snapshot().display, "3");
        assert_eq!(app.highlighted(), Some(sqrt));
    }

    #[test]
    fn test_press_button_out_of_range_ignored() {
        let mut app = CalculatorApp::new();
        app.press_button(99);
        assert!(app.highlighted().is_none());
        assert_eq!(app.controller().sink().frames(), 1);
    }

    #[test]
    fn test_click_on_keypad() {
        let mut app = CalculatorApp::new();
        let area = Rect::new(0, 0, 42, 20);
        // row 2, col 0 -> "7"
        assert!(app.click(area, 2, 1 + 3 * 2));
        assert_eq!(app.snapshot().display, "7");
        assert!(!app.click(area, 0, 0));
    }

    #[test]
    fn test_apply_actions() {
        let mut app = CalculatorApp::new();
        app.apply(KeyAction::Press(Token::Digit(4)));
        app.apply(KeyAction::Press(Token::Function(ScientificFunction::Square)));
        assert_eq!(app.snapshot().display, "16");

        app.apply(KeyAction::ToggleHelp);
        assert!(!app.show_help());

        app.apply(KeyAction::Press("M+".parse().unwrap()));
        app.apply(KeyAction::Reset);
        assert_eq!(app.snapshot().display, "0");
        assert!(app.snapshot().memory.is_none());

        app.apply(KeyAction::None);
        app.apply(KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_history_lines_newest_first() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "1 + 1 = 2 × 3 =");
        assert_eq!(app.history_lines(10), vec!["2 × 3 = 6", "1 + 1 = 2"]);
        assert_eq!(app.history_lines(1).len(), 1);
    }

    #[test]
    fn test_status_lines_show_pending() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "8 −");
        assert!(app.status_lines().contains(&"Pending: −".to_string()));
    }
}
