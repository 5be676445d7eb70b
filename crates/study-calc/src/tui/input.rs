//! Keyboard input handling
//!
//! Maps crossterm key events to calculator tokens and application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Constant, MemoryAction, Operation, ScientificFunction, Token};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed a token to the calculator
    Press(Token),
    /// Full reset, memory included
    Reset,
    /// Show or hide the help sidebar
    ToggleHelp,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::Reset,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('?') => KeyAction::ToggleHelp,
            KeyCode::Char(c) => Self::token_for_char(c).map_or(KeyAction::None, KeyAction::Press),
            KeyCode::Enter => KeyAction::Press(Token::Equals),
            KeyCode::Backspace => KeyAction::Press(Token::Delete),
            KeyCode::Esc | KeyCode::Delete => KeyAction::Press(Token::Clear),
            _ => KeyAction::None,
        }
    }

    /// Token bound to a plain character key
    #[must_use]
    pub fn token_for_char(c: char) -> Option<Token> {
        if let Some(d) = c.to_digit(10) {
            return Some(Token::Digit(d as u8));
        }
        let token = match c {
            '.' | ',' => Token::Point,
            '+' => Token::Operator(Operation::Add),
            '-' => Token::Operator(Operation::Subtract),
            '*' | 'x' => Token::Operator(Operation::Multiply),
            '/' => Token::Operator(Operation::Divide),
            '=' => Token::Equals,
            '(' => Token::OpenParen,
            's' => Token::Function(ScientificFunction::Sin),
            'c' => Token::Function(ScientificFunction::Cos),
            't' => Token::Function(ScientificFunction::Tan),
            'l' => Token::Function(ScientificFunction::Log),
            'n' => Token::Function(ScientificFunction::Ln),
            'r' => Token::Function(ScientificFunction::Sqrt),
            'q' => Token::Function(ScientificFunction::Square),
            'u' => Token::Function(ScientificFunction::Cube),
            'p' => Token::Constant(Constant::Pi),
            'e' => Token::Constant(Constant::E),
            'm' => Token::Memory(MemoryAction::Add),
            'M' => Token::Memory(MemoryAction::Recall),
            'z' => Token::Memory(MemoryAction::Clear),
            _ => return None,
        };
        Some(token)
    }
}
