//! Wire types for the booking API.
//!
//! Everything here serializes camelCase, the backend's JSON convention.
//! These are plain data shapes; the server is the sole source of truth for
//! fares and booking state, so nothing is validated client-side beyond
//! what serde enforces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geocoded place returned by location search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A bookable vehicle class. Fetched once per screen mount, read-only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub base_price: f64,
    pub price_per_km: f64,
    pub image: String,
}

/// One-way vs round-trip booking mode.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripType {
    #[default]
    #[serde(rename = "ONE_WAY")]
    OneWay,
    #[serde(rename = "ROUND_TRIP")]
    RoundTrip,
}

impl TripType {
    pub fn toggle(self) -> TripType {
        match self {
            TripType::OneWay => TripType::RoundTrip,
            TripType::RoundTrip => TripType::OneWay,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripType::OneWay => "One way",
            TripType::RoundTrip => "Round trip",
        }
    }
}

/// One itemized row of a fare breakdown.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareLineItem {
    pub description: String,
    pub amount: f64,
}

/// Server-computed fare. Displayed, then discarded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareDetails {
    pub base_fare: f64,
    pub distance_fare: f64,
    pub tax: f64,
    pub total: f64,
    pub currency: String,
    pub breakdown: Vec<FareLineItem>,
}

impl FareDetails {
    /// Sum of the breakdown rows. The server promises this equals `total`;
    /// the fare panel renders both so a mismatch is visible.
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|item| item.amount).sum()
    }
}

/// Fully populated request assembled client-side at submission time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub pickup_location: Location,
    pub drop_location: Location,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Car type id.
    pub car_type: String,
    pub trip_type: TripType,
    pub passengers: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    DriverAssigned,
    PickedUp,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::DriverAssigned => "Driver assigned",
            BookingStatus::PickedUp => "Picked up",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// The wire spelling, used when the status becomes a query parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::DriverAssigned => "DRIVER_ASSIGNED",
            BookingStatus::PickedUp => "PICKED_UP",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether the server still accepts a cancel for this state.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::DriverAssigned
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarDetails {
    pub model: String,
    pub color: String,
    pub plate_number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Assigned driver. `location` is the live position, present only while
/// the driver shares it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub rating: f64,
    pub car_details: CarDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// A booking as the server knows it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub pickup_location: Location,
    pub drop_location: Location,
    pub date: String,
    pub time: String,
    pub car_type: CarType,
    pub status: BookingStatus,
    pub fare: FareDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A page of a list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// Optional filters for the bookings list. Absent fields are omitted from
/// the query string entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub car_type: Option<String>,
}

impl BookingFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.wire_name().to_string()));
        }
        if let Some(ref start) = self.start_date {
            pairs.push(("startDate", start.clone()));
        }
        if let Some(ref end) = self.end_date {
            pairs.push(("endDate", end.clone()));
        }
        if let Some(ref car) = self.car_type {
            pairs.push(("carType", car.clone()));
        }
        pairs
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// The client-invented error taxonomy. Every failure mode of an operation
/// (network failure, non-2xx status, malformed body) collapses into that
/// operation's fixed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    FetchError,
    CalculationError,
    BookingError,
    CancellationError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::FetchError => "FETCH_ERROR",
            ErrorCode::CalculationError => "CALCULATION_ERROR",
            ErrorCode::BookingError => "BOOKING_ERROR",
            ErrorCode::CancellationError => "CANCELLATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The failure half of the uniform envelope: a fixed code plus a static
/// human-readable message. HTTP detail never surfaces here, only in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Uniform result envelope returned by every API client operation.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn test_location(id: &str, name: &str) -> Location {
        Location {
            id: id.to_string(),
            name: name.to_string(),
            address: format!("{name} Street 1"),
            latitude: 52.52,
            longitude: 13.405,
        }
    }

    /// Contract test: the request body must match the backend's camelCase
    /// field names and SCREAMING_SNAKE trip type spelling.
    #[test]
    fn test_booking_request_serialization() {
        let request = BookingRequest {
            pickup_location: test_location("l1", "Central"),
            drop_location: test_location("l2", "Airport"),
            date: "2026-08-08".to_string(),
            time: "14:30".to_string(),
            car_type: "2".to_string(),
            trip_type: TripType::RoundTrip,
            passengers: 3,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""pickupLocation""#));
        assert!(json.contains(r#""dropLocation""#));
        assert!(json.contains(r#""carType":"2""#));
        assert!(json.contains(r#""tripType":"ROUND_TRIP""#));
        assert!(json.contains(r#""passengers":3"#));
    }

    #[test]
    fn test_booking_status_wire_spelling() {
        let json = serde_json::to_string(&BookingStatus::DriverAssigned).unwrap();
        assert_eq!(json, r#""DRIVER_ASSIGNED""#);

        let parsed: BookingStatus = serde_json::from_str(r#""PICKED_UP""#).unwrap();
        assert_eq!(parsed, BookingStatus::PickedUp);
    }

    #[test]
    fn test_booking_status_cancellable() {
        assert!(BookingStatus::Pending.is_cancellable());
        assert!(BookingStatus::Confirmed.is_cancellable());
        assert!(BookingStatus::DriverAssigned.is_cancellable());
        assert!(!BookingStatus::PickedUp.is_cancellable());
        assert!(!BookingStatus::Completed.is_cancellable());
        assert!(!BookingStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_fare_breakdown_total_sums_rows() {
        let fare = FareDetails {
            base_fare: 100.0,
            distance_fare: 50.0,
            tax: 15.0,
            total: 165.0,
            currency: "USD".to_string(),
            breakdown: vec![
                FareLineItem {
                    description: "Base Fare".to_string(),
                    amount: 100.0,
                },
                FareLineItem {
                    description: "Distance (5 km)".to_string(),
                    amount: 50.0,
                },
                FareLineItem {
                    description: "Tax".to_string(),
                    amount: 15.0,
                },
            ],
        };
        assert_eq!(fare.breakdown_total(), fare.total);
    }

    #[test]
    fn test_paginated_deserialization() {
        let json = r#"{
            "items": [],
            "total": 42,
            "page": 2,
            "limit": 10,
            "hasMore": true
        }"#;
        let page: Paginated<Booking> = serde_json::from_str(json).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 42);
        assert_eq!(page.page, 2);
        assert!(page.has_more);
    }

    #[test]
    fn test_driver_optional_location() {
        let json = r#"{
            "id": "d1",
            "name": "Sam",
            "phone": "+1 555 0100",
            "rating": 4.8,
            "carDetails": {"model": "Camry", "color": "Silver", "plateNumber": "AB 123"}
        }"#;
        let driver: Driver = serde_json::from_str(json).unwrap();
        assert!(driver.location.is_none());
        assert_eq!(driver.car_details.plate_number, "AB 123");
    }

    #[test]
    fn test_filters_skip_absent_fields() {
        let filters = BookingFilters {
            status: Some(BookingStatus::Completed),
            start_date: None,
            end_date: None,
            car_type: Some("1".to_string()),
        };
        let pairs = filters.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("status", "COMPLETED".to_string()),
                ("carType", "1".to_string()),
            ]
        );
        assert!(BookingFilters::default().query_pairs().is_empty());
    }

    #[test]
    fn test_trip_type_toggle() {
        assert_eq!(TripType::OneWay.toggle(), TripType::RoundTrip);
        assert_eq!(TripType::RoundTrip.toggle(), TripType::OneWay);
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(ErrorCode::FetchError, "Failed to fetch car types");
        assert_eq!(error.to_string(), "FETCH_ERROR: Failed to fetch car types");
    }
}
