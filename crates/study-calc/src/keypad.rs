//! Scientific keypad layout
//!
//! Thirty buttons in six rows of five:
//!
//! ```text
//! [ sin ] [ cos ] [ tan ] [ log ] [ ln  ]
//! [  π  ] [  e  ] [  √  ] [ x²  ] [ x³  ]
//! [  7  ] [  8  ] [  9  ] [  ÷  ] [ DEL ]
//! [  4  ] [  5  ] [  6  ] [  ×  ] [  C  ]
//! [  1  ] [  2  ] [  3  ] [  −  ] [ M+  ]
//! [  0  ] [  .  ] [  +  ] [  (  ] [  =  ]
//! ```
//!
//! Front ends render this layout; the buttons carry their [`Token`] so a
//! click never has to be re-parsed.

use serde::{Deserialize, Serialize};

use crate::core::token::KeyPress;
use crate::core::{Constant, MemoryAction, Operation, ScientificFunction, Token};

/// Visual class of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Functions, constants, memory
    Func,
    /// Digits, point, parenthesis
    Num,
    /// Binary operators
    Operator,
    /// Clear and delete
    Clear,
    /// Equals
    Equal,
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Token produced when pressed
    pub token: Token,
    /// Text on the button
    pub label: String,
    /// Stable element identifier (`btn-7`, `btn-sqrt`, …)
    pub id: String,
    /// Visual class
    pub style: ButtonStyle,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button for `token` at `(row, col)`
    #[must_use]
    pub fn new(token: Token, row: usize, col: usize) -> Self {
        Self {
            label: token.label(),
            id: button_id(token),
            style: button_style(token),
            token,
            row,
            col,
        }
    }

    /// Input-contract triple for this button
    #[must_use]
    pub fn key_press(&self) -> KeyPress {
        KeyPress::from(self.token)
    }
}

fn button_style(token: Token) -> ButtonStyle {
    match token {
        Token::Function(_) | Token::Constant(_) | Token::Memory(_) => ButtonStyle::Func,
        Token::Digit(_) | Token::Point | Token::OpenParen => ButtonStyle::Num,
        Token::Operator(_) => ButtonStyle::Operator,
        Token::Clear | Token::Delete => ButtonStyle::Clear,
        Token::Equals => ButtonStyle::Equal,
    }
}

fn button_id(token: Token) -> String {
    let name = match token {
        Token::Digit(d) => return format!("btn-{d}"),
        Token::Point => "decimal",
        Token::Operator(Operation::Add) => "plus",
        Token::Operator(Operation::Subtract) => "minus",
        Token::Operator(Operation::Multiply) => "times",
        Token::Operator(Operation::Divide) => "divide",
        Token::Function(ScientificFunction::Sin) => "sin",
        Token::Function(ScientificFunction::Cos) => "cos",
        Token::Function(ScientificFunction::Tan) => "tan",
        Token::Function(ScientificFunction::Log) => "log",
        Token::Function(ScientificFunction::Ln) => "ln",
        Token::Function(ScientificFunction::Sqrt) => "sqrt",
        Token::Function(ScientificFunction::Square) => "square",
        Token::Function(ScientificFunction::Cube) => "cube",
        Token::Constant(Constant::Pi) => "pi",
        Token::Constant(Constant::E) => "e",
        Token::OpenParen => "open-paren",
        Token::Memory(MemoryAction::Add) => "mem-add",
        Token::Memory(MemoryAction::Recall) => "mem-recall",
        Token::Memory(MemoryAction::Clear) => "mem-clear",
        Token::Clear => "clear",
        Token::Delete => "delete",
        Token::Equals => "equals",
    };
    format!("btn-{name}")
}

/// The keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Grid columns
    pub const COLS: usize = 5;
    /// Grid rows
    pub const ROWS: usize = 6;

    /// Creates the standard scientific layout
    #[must_use]
    pub fn new() -> Self {
        use ScientificFunction::{Cos, Cube, Ln, Log, Sin, Sqrt, Square, Tan};

        let layout: [[Token; Self::COLS]; Self::ROWS] = [
            [
                Token::Function(Sin),
                Token::Function(Cos),
                Token::Function(Tan),
                Token::Function(Log),
                Token::Function(Ln),
            ],
            [
                Token::Constant(Constant::Pi),
                Token::Constant(Constant::E),
                Token::Function(Sqrt),
                Token::Function(Square),
                Token::Function(Cube),
            ],
            [
                Token::Digit(7),
                Token::Digit(8),
                Token::Digit(9),
                Token::Operator(Operation::Divide),
                Token::Delete,
            ],
            [
                Token::Digit(4),
                Token::Digit(5),
                Token::Digit(6),
                Token::Operator(Operation::Multiply),
                Token::Clear,
            ],
            [
                Token::Digit(1),
                Token::Digit(2),
                Token::Digit(3),
                Token::Operator(Operation::Subtract),
                Token::Memory(MemoryAction::Add),
            ],
            [
                Token::Digit(0),
                Token::Point,
                Token::Operator(Operation::Add),
                Token::OpenParen,
                Token::Equals,
            ],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, tokens)| {
                tokens
                    .iter()
                    .enumerate()
                    .map(move |(col, token)| KeypadButton::new(*token, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: Self::COLS,
            rows: Self::ROWS,
        }
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Button by row-major index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Button at `(row, col)`
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Index of the button with this label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Index of the button producing this token
    #[must_use]
    pub fn find_by_token(&self, token: Token) -> Option<usize> {
        self.buttons.iter().position(|b| b.token == token)
    }

    /// Button with this element id
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// All buttons, row-major
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Buttons of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter().filter(move |b| b.row == row)
    }
}
