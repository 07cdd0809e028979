//! # Ride Details Component
//!
//! A single booking fetched by id: route, schedule, fare breakdown,
//! driver (once assigned) and status. Cancellation uses the same
//! double-`d` confirmation as the ride list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::api::Booking;
use crate::core::state::RequestStatus;

fn label(text: &str) -> Span<'static> {
    Span::styled(
        format!("{text:<12}"),
        Style::default().fg(Color::DarkGray),
    )
}

fn booking_lines(booking: &Booking) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![label("Booking"), Span::raw(booking.id.clone())]),
        Line::from(vec![
            label("Status"),
            Span::styled(
                booking.status.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("From"),
            Span::raw(format!(
                "{} ({})",
                booking.pickup_location.name, booking.pickup_location.address
            )),
        ]),
        Line::from(vec![
            label("To"),
            Span::raw(format!(
                "{} ({})",
                booking.drop_location.name, booking.drop_location.address
            )),
        ]),
        Line::from(vec![
            label("When"),
            Span::raw(format!("{} {}", booking.date, booking.time)),
        ]),
        Line::from(vec![
            label("Car"),
            Span::raw(format!(
                "{} ({} seats)",
                booking.car_type.name, booking.car_type.capacity
            )),
        ]),
        Line::default(),
    ];

    for item in &booking.fare.breakdown {
        lines.push(Line::from(vec![
            label(""),
            Span::raw(format!(
                "{}: {} {:.2}",
                item.description, booking.fare.currency, item.amount
            )),
        ]));
    }
    lines.push(Line::from(vec![
        label("Total"),
        Span::styled(
            format!("{} {:.2}", booking.fare.currency, booking.fare.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));

    if let Some(ref driver) = booking.driver {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            label("Driver"),
            Span::raw(format!(
                "{} ({:.1}★)  {}",
                driver.name, driver.rating, driver.phone
            )),
        ]));
        lines.push(Line::from(vec![
            label(""),
            Span::raw(format!(
                "{} {}, plate {}",
                driver.car_details.color, driver.car_details.model, driver.car_details.plate_number
            )),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Booked {}", booking.created_at.format("%Y-%m-%d %H:%M UTC")),
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    booking: Option<&Booking>,
    status: &RequestStatus,
    cancel_status: &RequestStatus,
    confirm_cancel: bool,
) {
    let help_text = match (booking.map(|b| b.status.is_cancellable()), confirm_cancel) {
        (Some(true), true) => " Press d again to confirm cancel | Esc Back ",
        (Some(true), false) => " d Cancel  r Refresh  Esc Back ",
        _ => " r Refresh  Esc Back ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Ride details ")
        .title_bottom(Line::from(help_text).centered())
        .padding(Padding::horizontal(1));

    let paragraph = match (booking, status) {
        (_, RequestStatus::Failed(message)) => Paragraph::new(message.clone())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(block),
        (None, _) => Paragraph::new("Loading booking...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block),
        (Some(booking), _) => {
            let mut lines = booking_lines(booking);
            if let Some(error) = cancel_status.error() {
                lines.push(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Red),
                )));
            } else if cancel_status.is_loading() {
                lines.push(Line::from(Span::styled(
                    "Cancelling...",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block)
        }
    };

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BookingStatus;
    use crate::test_support::{sample_booking, sample_driver};

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_booking_lines_cover_route_and_fare() {
        let booking = sample_booking("b42");
        let text = text_of(&booking_lines(&booking));

        assert!(text.contains("b42"));
        assert!(text.contains("Central"));
        assert!(text.contains("Airport"));
        assert!(text.contains("Base Fare: USD 100.00"));
        assert!(text.contains("USD 165.00"));
        assert!(!text.contains("Driver"));
    }

    #[test]
    fn test_booking_lines_include_driver_when_assigned() {
        let mut booking = sample_booking("b1");
        booking.status = BookingStatus::DriverAssigned;
        booking.driver = Some(sample_driver());

        let text = text_of(&booking_lines(&booking));
        assert!(text.contains("Sam Porter"));
        assert!(text.contains("plate AB 1234"));
    }
}
