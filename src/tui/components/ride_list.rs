//! # Ride List Component
//!
//! The rides screen: a paginated booking history with a status filter.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RideListState` lives in `TuiState`
//! - rendering borrows the current page from `App` each frame
//!
//! Cancelling is destructive, so it takes a second `d` to confirm.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::api::{Booking, BookingStatus};
use crate::core::state::RidesPage;
use crate::tui::event::TuiEvent;

/// Persistent presentation state for the ride list.
#[derive(Debug, Default)]
pub struct RideListState {
    pub selected: usize,
    pub confirm_cancel: bool,
    pub list_state: ListState,
}

impl RideListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the selection after the page contents changed.
    pub fn sync(&mut self, ride_count: usize) {
        if ride_count == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(ride_count - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Handle a key event, returning a RideEvent if the screen should act.
    pub fn handle_event(&mut self, event: &TuiEvent, rides: &[Booking]) -> Option<RideEvent> {
        // Reset cancel confirmation on any non-cancel key
        let is_cancel_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_cancel_key {
            self.confirm_cancel = false;
        }

        match event {
            TuiEvent::Escape => Some(RideEvent::Back),
            TuiEvent::CursorUp => {
                if !rides.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !rides.is_empty() {
                    self.selected = (self.selected + 1).min(rides.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => rides
                .get(self.selected)
                .map(|ride| RideEvent::Open(ride.id.clone())),
            TuiEvent::InputChar('f') => Some(RideEvent::CycleFilter),
            TuiEvent::InputChar('n') | TuiEvent::CursorRight => Some(RideEvent::NextPage),
            TuiEvent::InputChar('p') | TuiEvent::CursorLeft => Some(RideEvent::PrevPage),
            TuiEvent::InputChar('r') => Some(RideEvent::Refresh),
            TuiEvent::InputChar('d') => {
                let ride = rides.get(self.selected)?;
                if !ride.status.is_cancellable() {
                    return None;
                }
                if self.confirm_cancel {
                    self.confirm_cancel = false;
                    Some(RideEvent::Cancel(ride.id.clone()))
                } else {
                    self.confirm_cancel = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Events emitted by the ride list.
#[derive(Debug, PartialEq, Eq)]
pub enum RideEvent {
    Open(String),
    Cancel(String),
    CycleFilter,
    NextPage,
    PrevPage,
    Refresh,
    Back,
}

fn filter_label(filter: Option<BookingStatus>) -> &'static str {
    match filter {
        None => "All",
        Some(status) => status.label(),
    }
}

fn status_style(status: BookingStatus) -> Style {
    match status {
        BookingStatus::Completed => Style::default().fg(Color::Green),
        BookingStatus::Cancelled => Style::default().fg(Color::Red),
        BookingStatus::PickedUp | BookingStatus::DriverAssigned => {
            Style::default().fg(Color::Cyan)
        }
        _ => Style::default().fg(Color::Yellow),
    }
}

fn ride_line(ride: &Booking) -> Line<'_> {
    Line::from(vec![
        format!("{} {} ", ride.date, ride.time).into(),
        format!("{} → {} ", ride.pickup_location.name, ride.drop_location.name).into(),
        format!("{} {:.2} ", ride.fare.currency, ride.fare.total).into(),
        ratatui::text::Span::styled(ride.status.label(), status_style(ride.status)),
    ])
}

/// Renders the ride list plus its filter/pagination footer.
pub fn render(frame: &mut Frame, area: Rect, rides: &RidesPage, state: &mut RideListState) {
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let help_text = if state.confirm_cancel {
        " Press d again to confirm cancel | Esc Back "
    } else {
        " Enter Open  d Cancel  f Filter  n/p Page  r Refresh  Esc Back "
    };

    let title = format!(
        " My Rides: {} (page {}, {} total) ",
        filter_label(rides.filter),
        rides.page.max(1),
        rides.total
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_alignment(Alignment::Left)
        .title_bottom(Line::from(help_text).centered())
        .padding(Padding::horizontal(1));

    if let Some(error) = rides.status.error() {
        let paragraph = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, list_area);
    } else if rides.status.is_loading() && rides.items.is_empty() {
        let paragraph = Paragraph::new("Loading rides...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, list_area);
    } else if rides.items.is_empty() {
        let paragraph = Paragraph::new("No rides found")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, list_area);
    } else {
        let items: Vec<ListItem> = rides.items.iter().map(|r| ListItem::new(ride_line(r))).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, list_area, &mut state.list_state);
    }

    let footer = if rides.has_more {
        "More pages available (n)"
    } else {
        ""
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_booking;

    fn rides() -> Vec<Booking> {
        vec![sample_booking("b1"), sample_booking("b2")]
    }

    #[test]
    fn test_navigation_clamps() {
        let rides = rides();
        let mut state = RideListState::new();
        state.sync(rides.len());

        state.handle_event(&TuiEvent::CursorUp, &rides);
        assert_eq!(state.selected, 0);

        state.handle_event(&TuiEvent::CursorDown, &rides);
        state.handle_event(&TuiEvent::CursorDown, &rides);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_enter_opens_selected() {
        let rides = rides();
        let mut state = RideListState::new();
        state.sync(rides.len());
        state.handle_event(&TuiEvent::CursorDown, &rides);

        let event = state.handle_event(&TuiEvent::Submit, &rides);
        assert_eq!(event, Some(RideEvent::Open("b2".to_string())));
    }

    #[test]
    fn test_cancel_requires_confirmation() {
        let rides = rides();
        let mut state = RideListState::new();
        state.sync(rides.len());

        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &rides), None);
        assert!(state.confirm_cancel);

        let event = state.handle_event(&TuiEvent::InputChar('d'), &rides);
        assert_eq!(event, Some(RideEvent::Cancel("b1".to_string())));
        assert!(!state.confirm_cancel);
    }

    #[test]
    fn test_other_key_resets_confirmation() {
        let rides = rides();
        let mut state = RideListState::new();
        state.sync(rides.len());

        state.handle_event(&TuiEvent::InputChar('d'), &rides);
        state.handle_event(&TuiEvent::CursorDown, &rides);
        assert!(!state.confirm_cancel);
    }

    #[test]
    fn test_cancel_ignored_for_finished_ride() {
        let mut completed = sample_booking("b1");
        completed.status = BookingStatus::Completed;
        let rides = vec![completed];
        let mut state = RideListState::new();
        state.sync(rides.len());

        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &rides), None);
        assert!(!state.confirm_cancel);
    }

    #[test]
    fn test_sync_after_page_shrinks() {
        let mut state = RideListState::new();
        state.selected = 5;
        state.sync(2);
        assert_eq!(state.selected, 1);

        state.sync(0);
        assert_eq!(state.selected, 0);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_filter_and_paging_keys() {
        let rides = rides();
        let mut state = RideListState::new();
        state.sync(rides.len());

        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('f'), &rides),
            Some(RideEvent::CycleFilter)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('n'), &rides),
            Some(RideEvent::NextPage)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('p'), &rides),
            Some(RideEvent::PrevPage)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Escape, &rides),
            Some(RideEvent::Back)
        );
    }
}
