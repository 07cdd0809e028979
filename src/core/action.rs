//! # Actions
//!
//! Everything that can happen in hail becomes an `Action`.
//! User picks a suggestion? That's `Action::ChooseSuggestion`.
//! A fare arrives? That's `Action::FareLoaded(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` naming the async work to spawn. No
//! I/O here: the TUI loop owns the tokio spawns and feeds completions
//! back in as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes every screen handler testable without a network: dispatch
//! the action, assert on the state and the returned effect.

use std::time::Instant;

use log::debug;

use crate::api::{
    ApiResult, Booking, BookingFilters, BookingRequest, BookingStatus, CarType, FareDetails,
    Location, Paginated,
};
use crate::core::state::{App, LocationField, RequestStatus, Screen};

#[derive(Debug)]
pub enum Action {
    Quit,
    /// Periodic tick from the event loop; drives the search debouncers.
    Tick(Instant),

    // Booking screen
    OpenBooking,
    CarTypesLoaded(ApiResult<Vec<CarType>>),
    QueryChanged {
        field: LocationField,
        query: String,
        now: Instant,
    },
    SearchCompleted {
        field: LocationField,
        generation: u64,
        result: ApiResult<Vec<Location>>,
    },
    /// Index into the field's current suggestion list.
    ChooseSuggestion {
        field: LocationField,
        index: usize,
    },
    ClearLocation(LocationField),
    /// Index into `car_types`.
    ChooseCar(usize),
    ToggleTripType,
    AdjustDate(i64),
    AdjustTime(i64),
    PassengersUp,
    PassengersDown,
    FareLoaded(ApiResult<FareDetails>),
    SubmitBooking,
    BookingCreated(ApiResult<Booking>),
    DismissConfirmation,

    // Rides screen
    OpenRides,
    RidesPageRequested(u32),
    CycleRidesFilter,
    RidesLoaded(ApiResult<Paginated<Booking>>),
    OpenDetails(String),
    DetailsLoaded(ApiResult<Booking>),
    CancelBooking(String),
    CancelCompleted {
        id: String,
        result: ApiResult<()>,
    },
}

/// Async work for the TUI loop to spawn. Every network call in the
/// application flows through exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchCarTypes,
    Search {
        field: LocationField,
        generation: u64,
        query: String,
    },
    CalculateFare {
        pickup: Location,
        drop_off: Location,
        car_type: String,
    },
    CreateBooking(BookingRequest),
    FetchRides {
        page: u32,
        limit: u32,
        filters: BookingFilters,
    },
    FetchBooking(String),
    Cancel(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::Tick(now) => poll_searches(app, now),

        Action::OpenBooking => {
            app.screen = Screen::Booking;
            app.car_types_status = RequestStatus::Loading;
            Effect::FetchCarTypes
        }

        Action::CarTypesLoaded(result) => {
            match result {
                Ok(car_types) => {
                    app.car_types = car_types;
                    app.car_types_status = RequestStatus::Idle;
                }
                Err(error) => {
                    app.car_types_status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }

        Action::QueryChanged { field, query, now } => {
            let search = app.search_mut(field);
            // Typing invalidates the confirmed selection for this field.
            search.selected = None;
            search.debouncer.note_input(&query, now);
            if query.trim().is_empty() {
                search.suggestions.clear();
                search.status = RequestStatus::Idle;
            }
            app.fare = None;
            Effect::None
        }

        Action::SearchCompleted {
            field,
            generation,
            result,
        } => {
            let search = app.search_mut(field);
            if !search.debouncer.is_current(generation) {
                debug!("Dropping superseded search result for {field:?}");
                return Effect::None;
            }
            match result {
                Ok(locations) => {
                    search.suggestions = locations;
                    search.status = RequestStatus::Idle;
                }
                Err(error) => {
                    search.status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }

        Action::ChooseSuggestion { field, index } => {
            let search = app.search_mut(field);
            let Some(location) = search.suggestions.get(index).cloned() else {
                return Effect::None;
            };
            search.selected = Some(location);
            search.suggestions.clear();
            search.debouncer.cancel();
            search.status = RequestStatus::Idle;
            maybe_calculate_fare(app)
        }

        Action::ClearLocation(field) => {
            let search = app.search_mut(field);
            search.selected = None;
            search.suggestions.clear();
            search.debouncer.cancel();
            search.status = RequestStatus::Idle;
            app.fare = None;
            Effect::None
        }

        Action::ChooseCar(index) => {
            let Some(car) = app.car_types.get(index) else {
                return Effect::None;
            };
            app.selected_car_id = Some(car.id.clone());
            maybe_calculate_fare(app)
        }

        Action::ToggleTripType => {
            app.draft.trip_type = app.draft.trip_type.toggle();
            Effect::None
        }

        Action::AdjustDate(days) => {
            app.draft.date = app.draft.date + chrono::Duration::days(days);
            Effect::None
        }

        Action::AdjustTime(minutes) => {
            app.draft.time = app.draft.time + chrono::Duration::minutes(minutes);
            Effect::None
        }

        Action::PassengersUp => {
            app.draft.passengers_up();
            Effect::None
        }

        Action::PassengersDown => {
            app.draft.passengers_down();
            Effect::None
        }

        Action::FareLoaded(result) => {
            match result {
                Ok(fare) => {
                    app.fare = Some(fare);
                    app.fare_status = RequestStatus::Idle;
                }
                Err(error) => {
                    app.fare = None;
                    app.fare_status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }

        Action::SubmitBooking => {
            if app.booking_status.is_loading() {
                return Effect::None;
            }
            let request = app.draft.build(
                app.pickup.selected.as_ref(),
                app.drop_off.selected.as_ref(),
                app.selected_car_id.as_deref(),
            );
            match request {
                Ok(request) => {
                    app.booking_status = RequestStatus::Loading;
                    app.status_message = String::from("Booking...");
                    Effect::CreateBooking(request)
                }
                Err(error) => {
                    app.status_message = error.to_string();
                    Effect::None
                }
            }
        }

        Action::BookingCreated(result) => {
            match result {
                Ok(booking) => {
                    app.booking_status = RequestStatus::Idle;
                    app.status_message = format!("Booking {} confirmed", booking.id);
                    app.last_booking = Some(booking);
                    app.screen = Screen::Confirmation;
                }
                Err(error) => {
                    app.status_message = error.message.clone();
                    app.booking_status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }

        Action::DismissConfirmation => {
            app.screen = Screen::Booking;
            app.pickup = Default::default();
            app.drop_off = Default::default();
            app.fare = None;
            app.fare_status = RequestStatus::Idle;
            app.status_message = String::from("Welcome to hail!");
            Effect::None
        }

        Action::OpenRides => {
            app.screen = Screen::Rides;
            app.rides.page = 1;
            app.rides.status = RequestStatus::Loading;
            fetch_rides_effect(app, 1)
        }

        Action::RidesPageRequested(page) => {
            if page == 0 || (page > app.rides.page && !app.rides.has_more) {
                return Effect::None;
            }
            app.rides.status = RequestStatus::Loading;
            fetch_rides_effect(app, page)
        }

        Action::CycleRidesFilter => {
            app.rides.filter = next_filter(app.rides.filter);
            app.rides.page = 1;
            app.rides.status = RequestStatus::Loading;
            fetch_rides_effect(app, 1)
        }

        Action::RidesLoaded(result) => {
            match result {
                Ok(page) => {
                    app.rides.items = page.items;
                    app.rides.page = page.page;
                    app.rides.total = page.total;
                    app.rides.has_more = page.has_more;
                    app.rides.status = RequestStatus::Idle;
                }
                Err(error) => {
                    app.rides.status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }

        Action::OpenDetails(id) => {
            app.screen = Screen::Details;
            app.details = None;
            app.details_status = RequestStatus::Loading;
            app.cancel_status = RequestStatus::Idle;
            Effect::FetchBooking(id)
        }

        Action::DetailsLoaded(result) => {
            match result {
                Ok(booking) => {
                    app.details = Some(booking);
                    app.details_status = RequestStatus::Idle;
                }
                Err(error) => {
                    app.details_status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }

        Action::CancelBooking(id) => {
            if app.cancel_status.is_loading() {
                return Effect::None;
            }
            app.cancel_status = RequestStatus::Loading;
            Effect::Cancel(id)
        }

        Action::CancelCompleted { id, result } => {
            match result {
                Ok(()) => {
                    app.cancel_status = RequestStatus::Idle;
                    app.status_message = String::from("Booking cancelled");
                    // The server owns booking state; patch the local copies
                    // so the change shows without a refetch.
                    if let Some(ref mut details) = app.details
                        && details.id == id
                    {
                        details.status = BookingStatus::Cancelled;
                    }
                    for ride in app.rides.items.iter_mut().filter(|r| r.id == id) {
                        ride.status = BookingStatus::Cancelled;
                    }
                }
                Err(error) => {
                    app.cancel_status = RequestStatus::Failed(error.message);
                }
            }
            Effect::None
        }
    }
}

/// Fires a due debounced search, if any. At most one per tick; the next
/// tick picks up the other field.
fn poll_searches(app: &mut App, now: Instant) -> Effect {
    for field in [LocationField::Pickup, LocationField::DropOff] {
        let search = app.search_mut(field);
        if let Some((generation, query)) = search.debouncer.poll(now) {
            search.status = RequestStatus::Loading;
            return Effect::Search {
                field,
                generation,
                query,
            };
        }
    }
    Effect::None
}

/// A fare needs pickup, drop-off and a car. Anything less keeps the panel
/// empty and spawns nothing.
fn maybe_calculate_fare(app: &mut App) -> Effect {
    let inputs = match (
        app.pickup.selected.as_ref(),
        app.drop_off.selected.as_ref(),
        app.selected_car_id.as_deref(),
    ) {
        (Some(pickup), Some(drop_off), Some(car_type)) => {
            Some((pickup.clone(), drop_off.clone(), car_type.to_string()))
        }
        _ => None,
    };
    let Some((pickup, drop_off, car_type)) = inputs else {
        return Effect::None;
    };
    app.fare_status = RequestStatus::Loading;
    Effect::CalculateFare {
        pickup,
        drop_off,
        car_type,
    }
}

fn fetch_rides_effect(app: &App, page: u32) -> Effect {
    Effect::FetchRides {
        page,
        limit: app.page_size,
        filters: BookingFilters {
            status: app.rides.filter,
            ..Default::default()
        },
    }
}

/// Filter cycle: all → pending → confirmed → completed → cancelled → all.
fn next_filter(current: Option<BookingStatus>) -> Option<BookingStatus> {
    match current {
        None => Some(BookingStatus::Pending),
        Some(BookingStatus::Pending) => Some(BookingStatus::Confirmed),
        Some(BookingStatus::Confirmed) => Some(BookingStatus::Completed),
        Some(BookingStatus::Completed) => Some(BookingStatus::Cancelled),
        Some(_) => None,
    }
}
