//! # Title Bar Component
//!
//! One line at the top: app name, active screen, and the keys that work
//! everywhere. The per-screen keys live in each screen's bottom border.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Screen;

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::Booking => "Book a ride",
        Screen::Rides => "My rides",
        Screen::Details => "Ride details",
        Screen::Confirmation => "Confirmed",
    }
}

pub fn render(frame: &mut Frame, area: Rect, screen: Screen) {
    let line = Line::from(vec![
        Span::styled(" hail ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("· {} ", screen_name(screen)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            "  ^H Book  ^R Rides  ^B Submit  ^T Trip  ^C Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
