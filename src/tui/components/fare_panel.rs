//! # Fare Panel Component
//!
//! Renders the server-computed fare breakdown: one row per line item,
//! then the total. The total comes from the server verbatim; the panel
//! never recomputes it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::api::FareDetails;
use crate::core::state::RequestStatus;

/// One rendered row: description on the left, amount on the right.
fn breakdown_rows(fare: &FareDetails) -> Vec<(String, String)> {
    fare.breakdown
        .iter()
        .map(|item| {
            (
                item.description.clone(),
                format!("{} {:.2}", fare.currency, item.amount),
            )
        })
        .collect()
}

fn row_line(width: u16, left: &str, right: &str, style: Style) -> Line<'static> {
    let pad = (width as usize)
        .saturating_sub(left.len() + right.len())
        .max(1);
    Line::from(vec![
        Span::styled(left.to_string(), style),
        Span::raw(" ".repeat(pad)),
        Span::styled(right.to_string(), style),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, fare: Option<&FareDetails>, status: &RequestStatus) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Fare ")
        .padding(Padding::horizontal(1));

    let inner_width = area.width.saturating_sub(4);

    let lines: Vec<Line> = match (fare, status) {
        (_, RequestStatus::Loading) => vec![Line::from(Span::styled(
            "Calculating fare...",
            Style::default().fg(Color::DarkGray),
        ))],
        (_, RequestStatus::Failed(message)) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        (Some(fare), _) => {
            let mut lines: Vec<Line> = breakdown_rows(fare)
                .into_iter()
                .map(|(left, right)| row_line(inner_width, &left, &right, Style::default()))
                .collect();
            lines.push(Line::from("─".repeat(inner_width as usize)));
            lines.push(row_line(
                inner_width,
                "Total",
                &format!("{} {:.2}", fare.currency, fare.total),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines
        }
        (None, _) => vec![Line::from(Span::styled(
            "Pick a route and a car to see the fare",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_fare;

    /// The rendered breakdown rows must sum to the displayed total.
    #[test]
    fn test_rendered_rows_sum_to_total() {
        let fare = sample_fare();
        let rows = breakdown_rows(&fare);
        assert_eq!(rows.len(), 3);

        let sum: f64 = fare.breakdown.iter().map(|item| item.amount).sum();
        assert_eq!(sum, fare.total);
        assert_eq!(rows[0].1, "USD 100.00");
        assert_eq!(rows[2].1, "USD 15.00");
    }

    #[test]
    fn test_row_line_right_aligns_amount() {
        let line = row_line(20, "Tax", "USD 15.00", Style::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.len(), 20);
        assert!(text.starts_with("Tax"));
        assert!(text.ends_with("USD 15.00"));
    }
}
