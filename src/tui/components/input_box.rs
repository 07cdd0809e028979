//! # Input Box Component
//!
//! A single-line text field with cursor movement. Location queries are
//! short, so there is no wrapping or scrolling; the rendered line is
//! truncated by the surrounding block if it overflows.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::event::TuiEvent;

/// Emitted when handling an event changed the content.
#[derive(Debug, PartialEq, Eq)]
pub enum InputEvent {
    Changed,
}

#[derive(Debug, Default)]
pub struct InputBox {
    value: String,
    /// Cursor position in chars (not bytes).
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                let at = self.byte_index();
                self.value.insert(at, *c);
                self.cursor += 1;
                Some(InputEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                let at = self.byte_index();
                self.value.remove(at);
                Some(InputEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                None
            }
            _ => None,
        }
    }

    /// Renders the field and, when focused, places the terminal cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let paragraph = Paragraph::new(self.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );
        frame.render_widget(paragraph, area);

        if focused {
            let prefix: String = self.value.chars().take(self.cursor).collect();
            let x = area.x + 1 + prefix.width() as u16;
            frame.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "main");
        assert_eq!(input.value(), "main");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(input.value(), "maxin");
    }

    #[test]
    fn test_backspace_removes_before_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "abc");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.value(), "ab");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        // Cursor at 0: backspace is a no-op
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_multibyte_input() {
        let mut input = InputBox::new();
        type_str(&mut input, "köln");
        assert_eq!(input.value(), "köln");
        input.handle_event(&TuiEvent::Backspace);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.value(), "kö");
    }

    #[test]
    fn test_set_value_moves_cursor_to_end() {
        let mut input = InputBox::new();
        input.set_value("Airport");
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.value(), "Airport!");
    }

    #[test]
    fn test_cursor_right_clamped() {
        let mut input = InputBox::new();
        type_str(&mut input, "ab");
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::InputChar('c'));
        assert_eq!(input.value(), "abc");
    }
}
