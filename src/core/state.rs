//! # Application State
//!
//! Core business state for hail. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn BookingApi>       // the network seam
//! ├── screen: Screen                 // which view is active
//! ├── draft: BookingDraft            // trip type, date, time, passengers
//! ├── pickup / drop_off              // per-field search state
//! ├── car_types (+ status)           // fetched per screen mount
//! ├── selected_car_id
//! ├── fare (+ status)                // last server-computed fare
//! ├── last_booking (+ status)        // confirmation view data
//! ├── rides: RidesPage               // paginated history
//! ├── details (+ status)             // single booking view
//! ├── cancel_status
//! └── status_message                 // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::api::{Booking, BookingApi, BookingStatus, CarType, FareDetails, Location};
use crate::core::booking::BookingDraft;
use crate::core::search::SearchDebouncer;

/// Three-way status of a screen's last network call. One per concern;
/// there is no global loading flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Booking,
    Rides,
    Details,
    Confirmation,
}

/// Which location input a search action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Pickup,
    DropOff,
}

impl LocationField {
    pub fn label(self) -> &'static str {
        match self {
            LocationField::Pickup => "Pickup",
            LocationField::DropOff => "Drop-off",
        }
    }
}

/// Per-field search state: the debouncer, the latest suggestions, and the
/// confirmed selection.
#[derive(Debug, Default)]
pub struct LocationSearch {
    pub debouncer: SearchDebouncer,
    pub suggestions: Vec<Location>,
    pub selected: Option<Location>,
    pub status: RequestStatus,
}

impl LocationSearch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The rides screen's page of history.
#[derive(Debug, Default)]
pub struct RidesPage {
    pub items: Vec<Booking>,
    pub page: u32,
    pub total: u64,
    pub has_more: bool,
    pub filter: Option<BookingStatus>,
    pub status: RequestStatus,
}

pub struct App {
    pub api: Arc<dyn BookingApi>,
    pub screen: Screen,
    pub draft: BookingDraft,
    pub pickup: LocationSearch,
    pub drop_off: LocationSearch,
    pub car_types: Vec<CarType>,
    pub car_types_status: RequestStatus,
    pub selected_car_id: Option<String>,
    pub fare: Option<FareDetails>,
    pub fare_status: RequestStatus,
    pub booking_status: RequestStatus,
    /// The booking returned by creation, shown on the confirmation view.
    pub last_booking: Option<Booking>,
    pub rides: RidesPage,
    pub page_size: u32,
    pub details: Option<Booking>,
    pub details_status: RequestStatus,
    pub cancel_status: RequestStatus,
    pub status_message: String,
}

impl App {
    pub fn new(api: Arc<dyn BookingApi>, page_size: u32, draft: BookingDraft) -> Self {
        Self {
            api,
            screen: Screen::default(),
            draft,
            pickup: LocationSearch::new(),
            drop_off: LocationSearch::new(),
            car_types: Vec::new(),
            car_types_status: RequestStatus::Idle,
            selected_car_id: None,
            fare: None,
            fare_status: RequestStatus::Idle,
            booking_status: RequestStatus::Idle,
            last_booking: None,
            rides: RidesPage::default(),
            page_size,
            details: None,
            details_status: RequestStatus::Idle,
            cancel_status: RequestStatus::Idle,
            status_message: String::from("Welcome to hail!"),
        }
    }

    pub fn search(&self, field: LocationField) -> &LocationSearch {
        match field {
            LocationField::Pickup => &self.pickup,
            LocationField::DropOff => &self.drop_off,
        }
    }

    pub fn search_mut(&mut self, field: LocationField) -> &mut LocationSearch {
        match field {
            LocationField::Pickup => &mut self.pickup,
            LocationField::DropOff => &mut self.drop_off,
        }
    }

    pub fn selected_car(&self) -> Option<&CarType> {
        let id = self.selected_car_id.as_deref()?;
        self.car_types.iter().find(|car| car.id == id)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.screen, Screen::Booking);
        assert_eq!(app.status_message, "Welcome to hail!");
        assert!(!app.car_types_status.is_loading());
        assert!(app.pickup.selected.is_none());
        assert!(app.fare.is_none());
    }

    #[test]
    fn test_selected_car_resolves_by_id() {
        let mut app = test_app();
        app.car_types = crate::test_support::sample_car_types();
        assert!(app.selected_car().is_none());

        app.selected_car_id = Some("2".to_string());
        assert_eq!(app.selected_car().map(|c| c.name.as_str()), Some("Premium"));

        app.selected_car_id = Some("missing".to_string());
        assert!(app.selected_car().is_none());
    }

    #[test]
    fn test_request_status_accessors() {
        assert!(RequestStatus::Loading.is_loading());
        assert!(RequestStatus::Idle.error().is_none());
        assert_eq!(
            RequestStatus::Failed("boom".to_string()).error(),
            Some("boom")
        );
    }
}
