//! Terminal front end
//!
//! A ratatui view over a [`Controller`](crate::display::Controller): the
//! display panel is just another sink.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::{CalculatorApp, DisplayPanel};
pub use input::{InputHandler, KeyAction};
pub use keypad::{hit_test, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI, APP_TITLE, HELP_SHORTCUTS, KEYPAD_WIDTH};
