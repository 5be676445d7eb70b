//! Button tokens and the input contract
//!
//! Front ends describe a button press as a `(label, category, operator?)`
//! triple. [`Token`] is the checked form the engine matches on exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::functions::{Constant, ScientificFunction};
use crate::core::operations::Operation;
use crate::core::{CalcError, CalcResult};

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Button category as named by the input contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Digits and the decimal point
    Num,
    /// Binary operators
    Op,
    /// Unary functions
    Func,
    /// Constants
    Const,
    /// Parenthesis
    Paren,
    /// Memory register
    Mem,
    /// Full clear
    Clear,
    /// Backspace
    Del,
    /// Equals
    Equal,
}

impl TokenCategory {
    /// Contract name of the category
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Num => "num",
            Self::Op => "op",
            Self::Func => "func",
            Self::Const => "const",
            Self::Paren => "paren",
            Self::Mem => "mem",
            Self::Clear => "clear",
            Self::Del => "del",
            Self::Equal => "equal",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "num" => Ok(Self::Num),
            "op" => Ok(Self::Op),
            "func" => Ok(Self::Func),
            "const" => Ok(Self::Const),
            "paren" => Ok(Self::Paren),
            "mem" => Ok(Self::Mem),
            "clear" => Ok(Self::Clear),
            "del" => Ok(Self::Del),
            "equal" => Ok(Self::Equal),
            other => Err(CalcError::InvalidToken {
                label: String::new(),
                category: other.to_string(),
            }),
        }
    }
}

/// Memory register actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryAction {
    /// `M+`: add the display value to memory
    Add,
    /// `MR`: show the memory value
    Recall,
    /// `MC`: zero the register
    Clear,
}

impl MemoryAction {
    /// Keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Add => "M+",
            Self::Recall => "MR",
            Self::Clear => "MC",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "M+" | "m+" => Some(Self::Add),
            "MR" | "mr" => Some(Self::Recall),
            "MC" | "mc" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// A single calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Decimal digit 0-9
    Digit(u8),
    /// Decimal point
    Point,
    /// Binary operator
    Operator(Operation),
    /// Unary function
    Function(ScientificFunction),
    /// Constant
    Constant(Constant),
    /// Cosmetic `(`
    OpenParen,
    /// Memory register action
    Memory(MemoryAction),
    /// Full clear
    Clear,
    /// Remove the last display character
    Delete,
    /// Evaluate the pending operator
    Equals,
}

impl Token {
    /// Category this token belongs to
    #[must_use]
    pub const fn category(&self) -> TokenCategory {
        match self {
            Self::Digit(_) | Self::Point => TokenCategory::Num,
            Self::Operator(_) => TokenCategory::Op,
            Self::Function(_) => TokenCategory::Func,
            Self::Constant(_) => TokenCategory::Const,
            Self::OpenParen => TokenCategory::Paren,
            Self::Memory(_) => TokenCategory::Mem,
            Self::Clear => TokenCategory::Clear,
            Self::Delete => TokenCategory::Del,
            Self::Equals => TokenCategory::Equal,
        }
    }

    /// Keypad label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => DIGIT_LABELS
                .get(usize::from(*d))
                .copied()
                .unwrap_or("?")
                .to_string(),
            Self::Point => ".".to_string(),
            Self::Operator(op) => op.display_symbol().to_string(),
            Self::Function(f) => f.label().to_string(),
            Self::Constant(c) => c.label().to_string(),
            Self::OpenParen => "(".to_string(),
            Self::Memory(m) => m.label().to_string(),
            Self::Clear => "C".to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Equals => "=".to_string(),
        }
    }

    /// Builds a token from the input contract triple
    ///
    /// `operator` must be one of `+ - * /` when `category` is `op` and must
    /// be absent for every other category.
    pub fn from_parts(
        label: &str,
        category: TokenCategory,
        operator: Option<char>,
    ) -> CalcResult<Self> {
        let invalid = || CalcError::InvalidToken {
            label: label.to_string(),
            category: category.to_string(),
        };

        if category != TokenCategory::Op && operator.is_some() {
            return Err(invalid());
        }

        match category {
            TokenCategory::Num => match label {
                "." => Ok(Self::Point),
                _ => DIGIT_LABELS
                    .iter()
                    .position(|d| *d == label)
                    .map(|d| Self::Digit(d as u8))
                    .ok_or_else(invalid),
            },
            TokenCategory::Op => {
                let symbol = operator.ok_or_else(|| CalcError::MissingOperator(label.to_string()))?;
                if !matches!(symbol, '+' | '-' | '*' | '/') {
                    return Err(invalid());
                }
                Operation::from_symbol(symbol)
                    .map(Self::Operator)
                    .ok_or_else(invalid)
            }
            TokenCategory::Func => ScientificFunction::from_label(label)
                .map(Self::Function)
                .ok_or_else(invalid),
            TokenCategory::Const => Constant::from_label(label)
                .map(Self::Constant)
                .ok_or_else(invalid),
            TokenCategory::Paren => match label {
                "(" => Ok(Self::OpenParen),
                _ => Err(invalid()),
            },
            TokenCategory::Mem => MemoryAction::from_label(label)
                .map(Self::Memory)
                .ok_or_else(invalid),
            TokenCategory::Clear => Ok(Self::Clear),
            TokenCategory::Del => Ok(Self::Delete),
            TokenCategory::Equal => Ok(Self::Equals),
        }
    }
}

/// Parses a bare button label (`7`, `×`, `*`, `sin`, `M+`, `DEL`, …)
impl FromStr for Token {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if let Some(d) = DIGIT_LABELS.iter().position(|d| *d == label) {
            return Ok(Self::Digit(d as u8));
        }

        let mut chars = label.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(op) = Operation::from_symbol(c).filter(|_| c != 'x') {
                return Ok(Self::Operator(op));
            }
        }

        match label {
            "." => return Ok(Self::Point),
            "(" => return Ok(Self::OpenParen),
            "=" => return Ok(Self::Equals),
            "C" | "c" | "AC" => return Ok(Self::Clear),
            "DEL" | "del" | "⌫" => return Ok(Self::Delete),
            _ => {}
        }

        if let Some(f) = ScientificFunction::from_label(label) {
            return Ok(Self::Function(f));
        }
        if let Some(c) = Constant::from_label(label) {
            return Ok(Self::Constant(c));
        }
        if let Some(m) = MemoryAction::from_label(label) {
            return Ok(Self::Memory(m));
        }

        Err(CalcError::InvalidToken {
            label: label.to_string(),
            category: "any".to_string(),
        })
    }
}

/// The input contract triple, as produced by a button press
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Button label
    pub label: String,
    /// Button category
    pub category: TokenCategory,
    /// Operator symbol, present only for `op`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<char>,
}

impl KeyPress {
    /// Creates a key press
    #[must_use]
    pub fn new(label: &str, category: TokenCategory, operator: Option<char>) -> Self {
        Self {
            label: label.to_string(),
            category,
            operator,
        }
    }

    /// Validates the triple into a token
    pub fn to_token(&self) -> CalcResult<Token> {
        Token::from_parts(&self.label, self.category, self.operator)
    }
}

impl From<Token> for KeyPress {
    fn from(token: Token) -> Self {
        let operator = match token {
            Token::Operator(op) => Some(op.symbol()),
            _ => None,
        };
        Self {
            label: token.label(),
            category: token.category(),
            operator,
        }
    }
}
