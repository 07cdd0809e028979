//! # Booking form draft
//!
//! The draft collects what the user has picked so far. `build` assembles a
//! [`BookingRequest`] only when the form is complete. An incomplete draft
//! never reaches the network; the reducer surfaces the validation message
//! instead.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::api::{BookingRequest, Location, TripType};

pub const MIN_PASSENGERS: u32 = 1;
pub const MAX_PASSENGERS: u32 = 9;

/// Form fields owned by the booking screen. Locations and the car choice
/// live in their own selection state; they are passed into `build`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub trip_type: TripType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub passengers: u32,
}

impl BookingDraft {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            trip_type: TripType::default(),
            date,
            time,
            passengers: MIN_PASSENGERS,
        }
    }

    pub fn passengers_up(&mut self) {
        self.passengers = (self.passengers + 1).min(MAX_PASSENGERS);
    }

    pub fn passengers_down(&mut self) {
        self.passengers = self.passengers.saturating_sub(1).max(MIN_PASSENGERS);
    }

    /// Assembles the request, or names the first missing field.
    pub fn build(
        &self,
        pickup: Option<&Location>,
        drop_off: Option<&Location>,
        car_type: Option<&str>,
    ) -> Result<BookingRequest, DraftError> {
        let pickup = pickup.ok_or(DraftError::MissingPickup)?;
        let drop_off = drop_off.ok_or(DraftError::MissingDropOff)?;
        let car_type = car_type.ok_or(DraftError::MissingCarType)?;

        Ok(BookingRequest {
            pickup_location: pickup.clone(),
            drop_location: drop_off.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            time: self.time.format("%H:%M").to_string(),
            car_type: car_type.to_string(),
            trip_type: self.trip_type,
            passengers: self.passengers,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    MissingPickup,
    MissingDropOff,
    MissingCarType,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingPickup => write!(f, "Select a pickup location first"),
            DraftError::MissingDropOff => write!(f, "Select a drop-off location first"),
            DraftError::MissingCarType => write!(f, "Select a car type first"),
        }
    }
}

impl std::error::Error for DraftError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draft() -> BookingDraft {
        BookingDraft::new(
            NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        )
    }

    fn test_location(id: &str) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Place {id}"),
            address: format!("{id} Street"),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn test_build_requires_pickup() {
        let draft = test_draft();
        let drop_off = test_location("l2");
        let result = draft.build(None, Some(&drop_off), Some("1"));
        assert_eq!(result, Err(DraftError::MissingPickup));
    }

    #[test]
    fn test_build_requires_drop_off() {
        let draft = test_draft();
        let pickup = test_location("l1");
        let result = draft.build(Some(&pickup), None, Some("1"));
        assert_eq!(result, Err(DraftError::MissingDropOff));
    }

    #[test]
    fn test_build_requires_car_type() {
        let draft = test_draft();
        let pickup = test_location("l1");
        let drop_off = test_location("l2");
        let result = draft.build(Some(&pickup), Some(&drop_off), None);
        assert_eq!(result, Err(DraftError::MissingCarType));
    }

    #[test]
    fn test_build_formats_date_and_time() {
        let draft = test_draft();
        let pickup = test_location("l1");
        let drop_off = test_location("l2");

        let request = draft.build(Some(&pickup), Some(&drop_off), Some("2")).unwrap();
        assert_eq!(request.date, "2026-08-08");
        assert_eq!(request.time, "14:30");
        assert_eq!(request.car_type, "2");
        assert_eq!(request.passengers, MIN_PASSENGERS);
        assert_eq!(request.trip_type, TripType::OneWay);
    }

    #[test]
    fn test_passenger_bounds() {
        let mut draft = test_draft();
        draft.passengers_down();
        assert_eq!(draft.passengers, MIN_PASSENGERS);

        for _ in 0..20 {
            draft.passengers_up();
        }
        assert_eq!(draft.passengers, MAX_PASSENGERS);
    }
}
