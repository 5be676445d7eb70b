//! Keypad widget for the terminal front end
//!
//! Renders the shared [`Keypad`] layout as a grid of `[label]` cells and maps
//! mouse clicks back to button indices.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::keypad::{ButtonStyle, Keypad};

/// Inner area of a bordered block
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Converts a click position inside `area` to a button index
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<usize> {
    let inner = inner(area);
    if x < inner.x || y < inner.y || x >= inner.x + inner.width || y >= inner.y + inner.height {
        return None;
    }

    let (rows, cols) = keypad.dimensions();
    let btn_width = inner.width / cols as u16;
    let btn_height = inner.height / rows as u16;
    if btn_width == 0 || btn_height == 0 {
        return None;
    }

    let col = ((x - inner.x) / btn_width) as usize;
    let row = ((y - inner.y) / btn_height) as usize;
    if row < rows && col < cols {
        Some(row * cols + col)
    } else {
        None
    }
}

fn button_style(style: ButtonStyle) -> Style {
    match style {
        ButtonStyle::Num => Style::default().fg(Color::White),
        ButtonStyle::Func => Style::default().fg(Color::Cyan),
        ButtonStyle::Operator => Style::default().fg(Color::Yellow),
        ButtonStyle::Clear => Style::default().fg(Color::Red),
        ButtonStyle::Equal => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    }
}

/// Keypad widget
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    highlighted: Option<usize>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            highlighted: None,
        }
    }

    /// Highlights the button at `index`
    #[must_use]
    pub fn highlight(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = inner(area);
        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for (index, btn) in self.keypad.buttons().enumerate() {
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height + btn_height / 2;

            let style = if self.highlighted == Some(index) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                button_style(btn.style)
            };

            let label = format!("[{}]", btn.label);
            let label_width = label.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(label_width) / 2;
            if y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(label_x, y, &Span::styled(label, style), btn_width);
            }
        }
    }
}
