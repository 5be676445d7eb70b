//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Area the keypad occupies for a given terminal size
///
/// The event loop uses this to route mouse clicks.
#[must_use]
pub fn keypad_area(area: Rect, show_help: bool) -> Rect {
    horizontal_layout(area, show_help)[1]
}

fn horizontal_layout(area: Rect, show_help: bool) -> Vec<Rect> {
    let help_width = if show_help { 24 } else { 0 };
    Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(30),
            Constraint::Length(KEYPAD_WIDTH),
            Constraint::Length(help_width),
        ])
        .split(area)
        .to_vec()
}

/// Keypad column width: five cells of eight
pub const KEYPAD_WIDTH: u16 = 42;

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn create_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Expression
                Constraint::Length(3), // Display
                Constraint::Min(4),    // History
                Constraint::Length(6), // Status
            ])
            .split(area)
            .to_vec()
    }

    fn render_expression(&self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.app.snapshot();
        Paragraph::new(Span::styled(
            snapshot.expression,
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" Expression ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.app.snapshot();
        let style = if snapshot.error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        let title = match &snapshot.memory {
            Some(label) => format!(" Display  {label} "),
            None => " Display ".to_string(),
        };

        Paragraph::new(Span::styled(snapshot.display, style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let limit = area.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .app
            .history_lines(limit)
            .into_iter()
            .map(|line| ListItem::new(Span::styled(line, Style::default().fg(Color::Gray))))
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" History (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .status_lines()
            .into_iter()
            .map(|line| {
                let style = if line.starts_with('✗') {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Span::styled(line, style))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .render(area, buf);
    }

    fn render_help_sidebar(area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let show_help = self.app.show_help();
        let h_chunks = horizontal_layout(area, show_help);

        let chunks = Self::create_layout(h_chunks[0]);
        self.render_expression(chunks[0], buf);
        self.render_display(chunks[1], buf);
        self.render_history(chunks[2], buf);
        self.render_status(chunks[3], buf);

        KeypadWidget::new(self.app.keypad())
            .highlight(self.app.highlighted())
            .render(h_chunks[1], buf);

        if show_help {
            Self::render_help_sidebar(h_chunks[2], buf);
        }
    }
}

/// Title of the outer frame
pub const APP_TITLE: &str = " Scientific Calculator ";

/// Keyboard shortcuts listed in the help sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-*/", "Operators"),
    ("Enter", "Equals"),
    ("Bksp", "Delete"),
    ("Esc", "Clear"),
    ("s c t", "sin cos tan"),
    ("l n", "log ln"),
    ("r q u", "√ x² x³"),
    ("p e", "π e"),
    ("m M z", "M+ MR MC"),
    ("(", "Paren"),
    ("Ctrl+L", "Reset all"),
    ("?", "Toggle help"),
    ("Ctrl+C", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(app: &CalculatorApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press_all(app: &mut CalculatorApp, labels: &str) {
        for label in labels.split_whitespace() {
            app.press_token(label.parse().unwrap());
        }
    }

    #[test]
    fn test_render_initial_screen() {
        let app = CalculatorApp::new();
        let content = draw(&app, 120, 30);
        assert!(content.contains("Scientific Calculator"));
        assert!(content.contains("Expression"));
        assert!(content.contains("Display"));
        assert!(content.contains("Keypad"));
        assert!(content.contains("Help"));
        assert!(content.contains("Ready"));
    }

    #[test]
    fn test_render_expression_and_result() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "2 + 3 =");
        let content = draw(&app, 120, 30);
        assert!(content.contains("2 + 3 = 5"));
    }

    #[test]
    fn test_render_error_marker() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "0 ln");
        let snapshot = app.snapshot();
        assert!(snapshot.error);
        let content = draw(&app, 120, 30);
        assert!(content.contains('✗'));
    }

    #[test]
    fn test_render_memory_in_display_title() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "7 M+");
        let content = draw(&app, 120, 30);
        assert!(content.contains("M: 7"));
    }

    #[test]
    fn test_render_history_newest_first() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, "1 + 1 = 4 × 4 = 5");
        let content = draw(&app, 120, 30);
        let older = content.find("1 + 1 = 2").unwrap();
        let newer = content.find("4 × 4 = 16").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_help_hidden() {
        let mut app = CalculatorApp::new();
        app.apply(crate::tui::KeyAction::ToggleHelp);
        let content = draw(&app, 120, 30);
        assert!(!content.contains("Toggle help"));
        assert!(content.contains("Keypad"));
    }

    #[test]
    fn test_render_small_terminal() {
        let app = CalculatorApp::new();
        let _ = draw(&app, 20, 10);
    }

    #[test]
    fn test_keypad_area_width() {
        let area = Rect::new(0, 0, 120, 30);
        assert_eq!(keypad_area(area, true).width, KEYPAD_WIDTH);
        assert_eq!(keypad_area(area, false).width, KEYPAD_WIDTH);
    }

    #[test]
    fn test_render_highlighted_button() {
        let mut app = CalculatorApp::new();
        let idx = app.keypad().find_by_label("=").unwrap();
        app.press_button(idx);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let highlighted = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .any(|c| c.symbol() == "=" && c.bg == Color::Yellow);
        assert!(highlighted);
    }

    #[test]
    fn test_help_shortcuts_have_descriptions() {
        assert!(HELP_SHORTCUTS.len() >= 10);
        for (key, desc) in HELP_SHORTCUTS {
            assert!(!key.is_empty());
            assert!(!desc.is_empty());
        }
    }
}
