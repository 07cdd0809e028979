//! # Location Picker Component
//!
//! A search input plus a suggestion dropdown. The input itself is an
//! [`InputBox`](super::input_box::InputBox); this module renders the field
//! with its selection marker and the popup list of suggestions.
//!
//! The dropdown is drawn last in the frame (over whatever sits below the
//! field), the same overlay approach as the confirmation view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::core::state::{LocationField, LocationSearch, RequestStatus};
use crate::tui::components::input_box::InputBox;

/// Maximum dropdown height, in suggestion rows.
const MAX_SUGGESTIONS: u16 = 6;

fn field_title(field: LocationField, search: &LocationSearch) -> String {
    match (&search.selected, &search.status) {
        (Some(_), _) => format!(" {} ✓ ", field.label()),
        (None, RequestStatus::Loading) => format!(" {} (searching...) ", field.label()),
        _ => format!(" {} ", field.label()),
    }
}

/// Renders the input field for one location.
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    field: LocationField,
    search: &LocationSearch,
    input: &InputBox,
    focused: bool,
) {
    input.render(frame, area, &field_title(field, search), focused);

    if let Some(error) = search.status.error() {
        // Error text goes into the bottom border so the field keeps its size.
        let line = Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        ));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(field_title(field, search))
            .title_bottom(line);
        frame.render_widget(block, area);
    }
}

/// Renders the dropdown under `field_area` when there are suggestions.
/// Returns without drawing when the list is empty.
pub fn render_suggestions(
    frame: &mut Frame,
    field_area: Rect,
    search: &LocationSearch,
    highlight: usize,
) {
    if search.suggestions.is_empty() {
        return;
    }

    let frame_area = frame.area();
    let height = (search.suggestions.len() as u16).min(MAX_SUGGESTIONS) + 2;
    let y = field_area.y + field_area.height;
    if y >= frame_area.height {
        return;
    }
    let popup = Rect {
        x: field_area.x,
        y,
        width: field_area.width,
        height: height.min(frame_area.height - y),
    };

    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = search
        .suggestions
        .iter()
        .map(|location| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    location.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", location.address),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(highlight.min(search.suggestions.len() - 1)));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, popup, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_location;

    #[test]
    fn test_field_title_reflects_state() {
        let mut search = LocationSearch::new();
        assert_eq!(field_title(LocationField::Pickup, &search), " Pickup ");

        search.status = RequestStatus::Loading;
        assert_eq!(
            field_title(LocationField::Pickup, &search),
            " Pickup (searching...) "
        );

        search.selected = Some(sample_location("l1", "Central"));
        assert_eq!(field_title(LocationField::Pickup, &search), " Pickup ✓ ");
    }
}
