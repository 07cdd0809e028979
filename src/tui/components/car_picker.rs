//! # Car Picker Component
//!
//! The vehicle class list: one row per car type with seats and pricing.
//! The highlight is presentation state; the confirmed choice lives in
//! `App::selected_car_id`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::api::CarType;
use crate::core::state::RequestStatus;

fn car_line(car: &CarType, chosen: bool) -> Line<'_> {
    let marker = if chosen { "● " } else { "  " };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(
            format!("{:<10}", car.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} seats  {:.0} base  {:.0}/km",
            car.capacity, car.base_price, car.price_per_km
        )),
    ])
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    car_types: &[CarType],
    selected_id: Option<&str>,
    status: &RequestStatus,
    list_state: &mut ListState,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Car type ")
        .padding(Padding::horizontal(1));

    if let Some(error) = status.error() {
        let paragraph = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if status.is_loading() && car_types.is_empty() {
        let paragraph = Paragraph::new("Loading car types...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = car_types
        .iter()
        .map(|car| ListItem::new(car_line(car, selected_id == Some(car.id.as_str()))))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, list_state);
}
