//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (web,
//! mobile shell, etc.) in the future if needed.
//!
//! ## Event loop
//!
//! One iteration: draw, poll the keyboard (100ms timeout; the search
//! debouncers need regular ticks), tick the reducer, drain completed
//! background work from the mpsc channel. Effects returned by `update()`
//! become tokio tasks here; their results come back as new actions.

pub mod components;
pub mod event;
pub mod ui;

use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use chrono::Timelike;
use log::{debug, info, warn};
use ratatui::widgets::ListState;

use crate::api::{BookingApi, RestBookingClient};
use crate::core::action::{Action, Effect, update};
use crate::core::booking::BookingDraft;
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, LocationField, Screen};
use crate::tui::components::{InputBox, InputEvent, RideEvent, RideListState};
use crate::tui::event::{TuiEvent, poll_event};

/// Which booking-form widget has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Pickup,
    DropOff,
    Schedule,
    Passengers,
    Cars,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Pickup => Focus::DropOff,
            Focus::DropOff => Focus::Schedule,
            Focus::Schedule => Focus::Passengers,
            Focus::Passengers => Focus::Cars,
            Focus::Cars => Focus::Pickup,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Pickup => Focus::Cars,
            Focus::DropOff => Focus::Pickup,
            Focus::Schedule => Focus::DropOff,
            Focus::Passengers => Focus::Schedule,
            Focus::Cars => Focus::Passengers,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub pickup_input: InputBox,
    pub drop_input: InputBox,
    pub pickup_highlight: usize,
    pub drop_highlight: usize,
    pub car_list: ListState,
    pub rides: RideListState,
    pub details_confirm_cancel: bool,
}

impl TuiState {
    pub fn new() -> Self {
        let mut car_list = ListState::default();
        car_list.select(Some(0));
        Self {
            focus: Focus::Pickup,
            pickup_input: InputBox::new(),
            drop_input: InputBox::new(),
            pickup_highlight: 0,
            drop_highlight: 0,
            car_list,
            rides: RideListState::new(),
            details_confirm_cancel: false,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// A draft for "leave about now": today, current time truncated to the
/// minute.
fn initial_draft() -> BookingDraft {
    let now = chrono::Local::now();
    let time = now
        .time()
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or_else(|| now.time());
    BookingDraft::new(now.date_naive(), time)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn BookingApi> = Arc::new(RestBookingClient::new(Some(config.base_url.clone())));
    let mut app = App::new(api, config.page_size, initial_draft());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Screen mount fetches car types.
    let mut should_quit = dispatch(&mut app, Action::OpenBooking, &tx);

    while !should_quit {
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;

        if let Some(event) = poll_event(Duration::from_millis(100)) {
            should_quit = handle_event(&mut app, &mut tui, event, &tx);
        }

        // Debounce tick fires any due location search.
        if dispatch(&mut app, Action::Tick(Instant::now()), &tx) {
            should_quit = true;
        }

        // Handle background task completions
        while let Ok(action) = rx.try_recv() {
            if dispatch(&mut app, action, &tx) {
                should_quit = true;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs an action through the reducer and spawns whatever effect comes
/// back. Returns true when the app should quit.
pub(crate) fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    if !matches!(action, Action::Tick(_)) {
        debug!("Dispatching: {:?}", action);
    }
    let effect = update(app, action);
    run_effect(app, effect, tx)
}

/// Spawns the async work for an effect. Every task reports back through
/// the action channel; a dropped receiver just means the app is gone.
fn run_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,

        Effect::FetchCarTypes => {
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.car_types().await;
                if tx.send(Action::CarTypesLoaded(result)).is_err() {
                    warn!("Failed to send car types: receiver dropped");
                }
            });
            false
        }

        Effect::Search {
            field,
            generation,
            query,
        } => {
            info!("Searching locations: {query:?} ({field:?})");
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.search_locations(&query).await;
                let action = Action::SearchCompleted {
                    field,
                    generation,
                    result,
                };
                if tx.send(action).is_err() {
                    warn!("Failed to send search results: receiver dropped");
                }
            });
            false
        }

        Effect::CalculateFare {
            pickup,
            drop_off,
            car_type,
        } => {
            info!(
                "Calculating fare: {} → {} ({car_type})",
                pickup.name, drop_off.name
            );
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.calculate_fare(&pickup, &drop_off, &car_type).await;
                if tx.send(Action::FareLoaded(result)).is_err() {
                    warn!("Failed to send fare: receiver dropped");
                }
            });
            false
        }

        Effect::CreateBooking(request) => {
            info!(
                "Creating booking: {} → {}",
                request.pickup_location.name, request.drop_location.name
            );
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.create_booking(&request).await;
                if tx.send(Action::BookingCreated(result)).is_err() {
                    warn!("Failed to send booking: receiver dropped");
                }
            });
            false
        }

        Effect::FetchRides {
            page,
            limit,
            filters,
        } => {
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.bookings(page, limit, &filters).await;
                if tx.send(Action::RidesLoaded(result)).is_err() {
                    warn!("Failed to send rides: receiver dropped");
                }
            });
            false
        }

        Effect::FetchBooking(id) => {
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.booking(&id).await;
                if tx.send(Action::DetailsLoaded(result)).is_err() {
                    warn!("Failed to send booking details: receiver dropped");
                }
            });
            false
        }

        Effect::Cancel(id) => {
            info!("Cancelling booking {id}");
            let api = app.api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.cancel_booking(&id).await;
                if tx.send(Action::CancelCompleted { id, result }).is_err() {
                    warn!("Failed to send cancel result: receiver dropped");
                }
            });
            false
        }
    }
}

/// Translates a key event into actions for the active screen.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    // Global keys work on every screen.
    match event {
        TuiEvent::ForceQuit => return dispatch(app, Action::Quit, tx),
        TuiEvent::Resize => return false,
        TuiEvent::OpenRides => return dispatch(app, Action::OpenRides, tx),
        TuiEvent::OpenBooking => return dispatch(app, Action::OpenBooking, tx),
        _ => {}
    }

    match app.screen {
        Screen::Booking => handle_booking_event(app, tui, event, tx),
        Screen::Rides => handle_rides_event(app, tui, event, tx),
        Screen::Details => handle_details_event(app, tui, event, tx),
        Screen::Confirmation => match event {
            TuiEvent::Submit | TuiEvent::Escape => {
                tui.pickup_input.clear();
                tui.drop_input.clear();
                tui.focus = Focus::Pickup;
                dispatch(app, Action::DismissConfirmation, tx)
            }
            _ => false,
        },
    }
}

fn handle_booking_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::SubmitBooking => return dispatch(app, Action::SubmitBooking, tx),
        TuiEvent::ToggleTrip => return dispatch(app, Action::ToggleTripType, tx),
        TuiEvent::Tab => {
            tui.focus = tui.focus.next();
            return false;
        }
        TuiEvent::BackTab => {
            tui.focus = tui.focus.prev();
            return false;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Pickup => handle_location_event(app, tui, LocationField::Pickup, event, tx),
        Focus::DropOff => handle_location_event(app, tui, LocationField::DropOff, event, tx),
        Focus::Schedule => {
            let action = match event {
                TuiEvent::CursorLeft => Some(Action::AdjustDate(-1)),
                TuiEvent::CursorRight => Some(Action::AdjustDate(1)),
                TuiEvent::CursorUp => Some(Action::AdjustTime(30)),
                TuiEvent::CursorDown => Some(Action::AdjustTime(-30)),
                TuiEvent::Escape => Some(Action::Quit),
                _ => None,
            };
            match action {
                Some(action) => dispatch(app, action, tx),
                None => false,
            }
        }
        Focus::Passengers => {
            let action = match event {
                TuiEvent::CursorUp => Some(Action::PassengersUp),
                TuiEvent::CursorDown => Some(Action::PassengersDown),
                TuiEvent::Escape => Some(Action::Quit),
                _ => None,
            };
            match action {
                Some(action) => dispatch(app, action, tx),
                None => false,
            }
        }
        Focus::Cars => match event {
            TuiEvent::CursorUp => {
                let selected = tui.car_list.selected().unwrap_or(0);
                tui.car_list.select(Some(selected.saturating_sub(1)));
                false
            }
            TuiEvent::CursorDown => {
                if !app.car_types.is_empty() {
                    let selected = tui.car_list.selected().unwrap_or(0);
                    tui.car_list
                        .select(Some((selected + 1).min(app.car_types.len() - 1)));
                }
                false
            }
            TuiEvent::Submit => {
                let index = tui.car_list.selected().unwrap_or(0);
                dispatch(app, Action::ChooseCar(index), tx)
            }
            TuiEvent::Escape => dispatch(app, Action::Quit, tx),
            _ => false,
        },
    }
}

fn handle_location_event(
    app: &mut App,
    tui: &mut TuiState,
    field: LocationField,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let (input, highlight) = match field {
        LocationField::Pickup => (&mut tui.pickup_input, &mut tui.pickup_highlight),
        LocationField::DropOff => (&mut tui.drop_input, &mut tui.drop_highlight),
    };

    match event {
        TuiEvent::InputChar(_) | TuiEvent::Backspace => {
            if input.handle_event(&event) == Some(InputEvent::Changed) {
                *highlight = 0;
                let action = Action::QueryChanged {
                    field,
                    query: input.value().to_string(),
                    now: Instant::now(),
                };
                return dispatch(app, action, tx);
            }
            false
        }
        TuiEvent::CursorLeft | TuiEvent::CursorRight => {
            input.handle_event(&event);
            false
        }
        TuiEvent::CursorUp => {
            *highlight = highlight.saturating_sub(1);
            false
        }
        TuiEvent::CursorDown => {
            let count = app.search(field).suggestions.len();
            if count > 0 {
                *highlight = (*highlight + 1).min(count - 1);
            }
            false
        }
        TuiEvent::Submit => {
            if app.search(field).suggestions.is_empty() {
                return false;
            }
            let index = *highlight;
            *highlight = 0;
            let quit = dispatch(app, Action::ChooseSuggestion { field, index }, tx);
            // Show the confirmed place in the input.
            let (input, _) = match field {
                LocationField::Pickup => (&mut tui.pickup_input, ()),
                LocationField::DropOff => (&mut tui.drop_input, ()),
            };
            if let Some(ref location) = app.search(field).selected {
                input.set_value(&location.name);
            }
            quit
        }
        TuiEvent::Escape => {
            let search = app.search(field);
            let has_content = !search.suggestions.is_empty()
                || search.selected.is_some()
                || !input.value().is_empty();
            if has_content {
                input.clear();
                *highlight = 0;
                dispatch(app, Action::ClearLocation(field), tx)
            } else {
                dispatch(app, Action::Quit, tx)
            }
        }
        _ => false,
    }
}

fn handle_rides_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let Some(ride_event) = tui.rides.handle_event(&event, &app.rides.items) else {
        return false;
    };

    match ride_event {
        RideEvent::Open(id) => {
            tui.details_confirm_cancel = false;
            dispatch(app, Action::OpenDetails(id), tx)
        }
        RideEvent::Cancel(id) => dispatch(app, Action::CancelBooking(id), tx),
        RideEvent::CycleFilter => dispatch(app, Action::CycleRidesFilter, tx),
        RideEvent::NextPage => {
            let page = app.rides.page + 1;
            dispatch(app, Action::RidesPageRequested(page), tx)
        }
        RideEvent::PrevPage => {
            if app.rides.page > 1 {
                let page = app.rides.page - 1;
                dispatch(app, Action::RidesPageRequested(page), tx)
            } else {
                false
            }
        }
        RideEvent::Refresh => {
            let page = app.rides.page.max(1);
            dispatch(app, Action::RidesPageRequested(page), tx)
        }
        RideEvent::Back => dispatch(app, Action::OpenBooking, tx),
    }
}

fn handle_details_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    // Reset cancel confirmation on any non-cancel key
    let is_cancel_key = matches!(event, TuiEvent::InputChar('d'));
    if !is_cancel_key {
        tui.details_confirm_cancel = false;
    }

    match event {
        TuiEvent::Escape => dispatch(app, Action::OpenRides, tx),
        TuiEvent::InputChar('r') => {
            if let Some(id) = app.details.as_ref().map(|b| b.id.clone()) {
                dispatch(app, Action::OpenDetails(id), tx)
            } else {
                false
            }
        }
        TuiEvent::InputChar('d') => {
            let Some(booking) = app.details.as_ref() else {
                return false;
            };
            if !booking.status.is_cancellable() {
                return false;
            }
            if tui.details_confirm_cancel {
                tui.details_confirm_cancel = false;
                let id = booking.id.clone();
                dispatch(app, Action::CancelBooking(id), tx)
            } else {
                tui.details_confirm_cancel = true;
                false
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockBookingApi, sample_location, test_app_with};

    /// An incomplete form must never reach the network: the reducer
    /// returns no effect, so nothing is spawned.
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_incomplete_submission_never_calls_api() {
        let api = Arc::new(MockBookingApi::new());
        let mut app = test_app_with(api.clone());
        let (tx, rx) = mpsc::channel();

        // No pickup, no drop-off, no car.
        let quit = dispatch(&mut app, Action::SubmitBooking, &tx);
        assert!(!quit);

        // Nothing completes because nothing was spawned.
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_complete_submission_calls_api_once() {
        let api = Arc::new(MockBookingApi::new());
        let mut app = test_app_with(api.clone());
        app.pickup.selected = Some(sample_location("l1", "Central"));
        app.drop_off.selected = Some(sample_location("l2", "Airport"));
        app.selected_car_id = Some("1".to_string());

        let (tx, rx) = mpsc::channel();
        dispatch(&mut app, Action::SubmitBooking, &tx);

        let action = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("booking task never completed");
        assert!(matches!(action, Action::BookingCreated(Ok(_))));
        assert_eq!(api.count("create_booking"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_search_effect_round_trip() {
        let api = Arc::new(MockBookingApi::new());
        let mut app = test_app_with(api.clone());
        let (tx, rx) = mpsc::channel();

        let start = Instant::now();
        dispatch(
            &mut app,
            Action::QueryChanged {
                field: LocationField::Pickup,
                query: "cent".to_string(),
                now: start,
            },
            &tx,
        );
        dispatch(
            &mut app,
            Action::Tick(start + Duration::from_millis(600)),
            &tx,
        );

        let action = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("search task never completed");
        let quit = dispatch(&mut app, action, &tx);
        assert!(!quit);
        assert_eq!(api.count("search_locations"), 1);
        assert_eq!(app.pickup.suggestions.len(), 1);
    }

    #[test]
    fn test_focus_cycle_covers_all_widgets() {
        let mut focus = Focus::Pickup;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(focus);
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Pickup);
        assert_eq!(seen.len(), 5);
        assert_eq!(Focus::Pickup.prev(), Focus::Cars);
    }
}
