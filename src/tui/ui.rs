//! Screen composition. Pure rendering of `App` + `TuiState` into a frame;
//! all state changes happen in the event loop and the reducer.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::state::{App, LocationField, Screen};
use crate::tui::components::{car_picker, fare_panel, location_picker, ride_details, ride_list, title_bar};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    title_bar::render(frame, title_area, app.screen);

    match app.screen {
        Screen::Booking => draw_booking(frame, main_area, app, tui),
        Screen::Rides => {
            tui.rides.sync(app.rides.items.len());
            ride_list::render(frame, main_area, &app.rides, &mut tui.rides);
        }
        Screen::Details => ride_details::render(
            frame,
            main_area,
            app.details.as_ref(),
            &app.details_status,
            &app.cancel_status,
            tui.details_confirm_cancel,
        ),
        Screen::Confirmation => draw_confirmation(frame, main_area, app),
    }

    draw_status_bar(frame, status_area, app);
}

fn draw_booking(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};

    let [form_area, fare_area] =
        Layout::horizontal([Percentage(62), Percentage(38)]).areas(area);

    let [trip_row, pickup_area, drop_area, cars_area] =
        Layout::vertical([Length(3), Length(3), Length(3), Min(5)]).areas(form_area);

    let [trip_area, schedule_area, passengers_area] =
        Layout::horizontal([Percentage(34), Percentage(40), Percentage(26)]).areas(trip_row);

    draw_value_box(
        frame,
        trip_area,
        " Trip ",
        app.draft.trip_type.label(),
        false,
    );
    draw_value_box(
        frame,
        schedule_area,
        " Pickup time (←→ ↑↓) ",
        &format!("{} {}", app.draft.date.format("%Y-%m-%d"), app.draft.time.format("%H:%M")),
        matches!(tui.focus, Focus::Schedule),
    );
    draw_value_box(
        frame,
        passengers_area,
        " Passengers ",
        &app.draft.passengers.to_string(),
        matches!(tui.focus, Focus::Passengers),
    );

    location_picker::render_field(
        frame,
        pickup_area,
        LocationField::Pickup,
        &app.pickup,
        &tui.pickup_input,
        matches!(tui.focus, Focus::Pickup),
    );
    location_picker::render_field(
        frame,
        drop_area,
        LocationField::DropOff,
        &app.drop_off,
        &tui.drop_input,
        matches!(tui.focus, Focus::DropOff),
    );

    car_picker::render(
        frame,
        cars_area,
        &app.car_types,
        app.selected_car_id.as_deref(),
        &app.car_types_status,
        &mut tui.car_list,
        matches!(tui.focus, Focus::Cars),
    );

    fare_panel::render(frame, fare_area, app.fare.as_ref(), &app.fare_status);

    // Dropdowns draw last so they sit above the widgets below them.
    match tui.focus {
        Focus::Pickup => {
            location_picker::render_suggestions(frame, pickup_area, &app.pickup, tui.pickup_highlight)
        }
        Focus::DropOff => {
            location_picker::render_suggestions(frame, drop_area, &app.drop_off, tui.drop_highlight)
        }
        _ => {}
    }
}

fn draw_value_box(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn draw_confirmation(frame: &mut Frame, area: Rect, app: &App) {
    let overlay = centered_rect(70, 60, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Booking confirmed ")
        .title_bottom(Line::from(" Enter to book another ride ").centered())
        .padding(Padding::horizontal(1));

    let Some(booking) = app.last_booking.as_ref() else {
        frame.render_widget(
            Paragraph::new("No booking to show")
                .alignment(Alignment::Center)
                .block(block),
            overlay,
        );
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Booking {}", booking.id),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!(
            "{} → {}",
            booking.pickup_location.name, booking.drop_location.name
        )),
        Line::from(format!("{} {}", booking.date, booking.time)),
        Line::from(format!(
            "{} · {} seats",
            booking.car_type.name, booking.car_type.capacity
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("Total {} {:.2}", booking.fare.currency, booking.fare.total),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Status: {}", booking.status.label()),
            Style::default().fg(Color::Yellow),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let busy = app.car_types_status.is_loading()
        || app.fare_status.is_loading()
        || app.booking_status.is_loading()
        || app.rides.status.is_loading()
        || app.details_status.is_loading()
        || app.cancel_status.is_loading();

    let style = if app.booking_status.error().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if busy {
        format!("{} …", app.status_message)
    } else {
        app.status_message.clone()
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Center a rect of `percent_x` by `percent_y` inside `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::core::state::Screen;
    use crate::test_support::{sample_booking, sample_car_types, sample_fare, test_app};

    fn draw(app: &App, tui: &mut TuiState) {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
    }

    #[test]
    fn test_draw_booking_screen() {
        let mut app = test_app();
        app.car_types = sample_car_types();
        app.fare = Some(sample_fare());
        let mut tui = TuiState::new();
        draw(&app, &mut tui);
    }

    #[test]
    fn test_draw_rides_screen() {
        let mut app = test_app();
        app.screen = Screen::Rides;
        app.rides.items = vec![sample_booking("b1")];
        let mut tui = TuiState::new();
        draw(&app, &mut tui);
        assert_eq!(tui.rides.list_state.selected(), Some(0));
    }

    #[test]
    fn test_draw_details_screen() {
        let mut app = test_app();
        app.screen = Screen::Details;
        app.details = Some(sample_booking("b1"));
        let mut tui = TuiState::new();
        draw(&app, &mut tui);
    }

    #[test]
    fn test_draw_confirmation_screen() {
        let mut app = test_app();
        app.screen = Screen::Confirmation;
        app.last_booking = Some(sample_booking("b1"));
        let mut tui = TuiState::new();
        draw(&app, &mut tui);
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let overlay = centered_rect(70, 60, area);
        assert!(overlay.width <= 70);
        assert!(overlay.height <= 24);
        assert!(overlay.x >= 15);
    }
}
