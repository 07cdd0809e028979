//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use crate::api::{
    ApiError, ApiResult, Booking, BookingApi, BookingFilters, BookingRequest, BookingStatus,
    CarDetails, CarType, Driver, ErrorCode, FareDetails, FareLineItem, Location, Paginated,
};
use crate::core::booking::BookingDraft;
use crate::core::state::App;

// ============================================================================
// Fixtures
// ============================================================================

pub fn sample_location(id: &str, name: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        address: format!("{name} Street 1"),
        latitude: 52.52,
        longitude: 13.405,
    }
}

pub fn sample_car_types() -> Vec<CarType> {
    vec![
        CarType {
            id: "1".to_string(),
            name: "Economy".to_string(),
            description: "Affordable and comfortable rides".to_string(),
            capacity: 4,
            base_price: 100.0,
            price_per_km: 10.0,
            image: "economy-car.png".to_string(),
        },
        CarType {
            id: "2".to_string(),
            name: "Premium".to_string(),
            description: "Luxury vehicles for a premium experience".to_string(),
            capacity: 4,
            base_price: 150.0,
            price_per_km: 15.0,
            image: "premium-car.png".to_string(),
        },
        CarType {
            id: "3".to_string(),
            name: "SUV".to_string(),
            description: "Spacious vehicles for group travel".to_string(),
            capacity: 6,
            base_price: 200.0,
            price_per_km: 20.0,
            image: "suv-car.png".to_string(),
        },
    ]
}

pub fn sample_fare() -> FareDetails {
    FareDetails {
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
    }
}

pub fn sample_driver() -> Driver {
    Driver {
        id: "d1".to_string(),
        name: "Sam Porter".to_string(),
        phone: "+1 555 0100".to_string(),
        rating: 4.8,
        car_details: CarDetails {
            model: "Toyota Camry".to_string(),
            color: "Silver".to_string(),
            plate_number: "AB 1234".to_string(),
        },
        location: None,
    }
}

pub fn sample_booking(id: &str) -> Booking {
    let created = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
    Booking {
        id: id.to_string(),
        user_id: "u1".to_string(),
        pickup_location: sample_location("l1", "Central"),
        drop_location: sample_location("l2", "Airport"),
        date: "2026-08-09".to_string(),
        time: "14:30".to_string(),
        car_type: sample_car_types().remove(0),
        status: BookingStatus::Confirmed,
        fare: sample_fare(),
        driver: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn sample_page(items: Vec<Booking>, page: u32, total: u64) -> Paginated<Booking> {
    let count = items.len() as u64;
    Paginated {
        items,
        total,
        page,
        limit: 10,
        has_more: u64::from(page) * count < total,
    }
}

pub fn sample_draft() -> BookingDraft {
    BookingDraft::new(
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
    )
}

// ============================================================================
// Mock API
// ============================================================================

/// A scriptable [`BookingApi`] that records every call. Results default to
/// the sample fixtures; override the fields to script failures.
pub struct MockBookingApi {
    pub car_types_result: Mutex<ApiResult<Vec<CarType>>>,
    pub search_result: Mutex<ApiResult<Vec<Location>>>,
    pub fare_result: Mutex<ApiResult<FareDetails>>,
    pub create_result: Mutex<ApiResult<Booking>>,
    pub booking_result: Mutex<ApiResult<Booking>>,
    pub bookings_result: Mutex<ApiResult<Paginated<Booking>>>,
    pub cancel_result: Mutex<ApiResult<()>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockBookingApi {
    pub fn new() -> Self {
        Self {
            car_types_result: Mutex::new(Ok(sample_car_types())),
            search_result: Mutex::new(Ok(vec![sample_location("l1", "Central")])),
            fare_result: Mutex::new(Ok(sample_fare())),
            create_result: Mutex::new(Ok(sample_booking("b1"))),
            booking_result: Mutex::new(Ok(sample_booking("b1"))),
            bookings_result: Mutex::new(Ok(sample_page(vec![sample_booking("b1")], 1, 1))),
            cancel_result: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: ErrorCode, message: &str) -> Self {
        let mock = Self::new();
        let error = ApiError::new(code, message);
        *mock.car_types_result.lock().unwrap() = Err(error.clone());
        *mock.search_result.lock().unwrap() = Err(error.clone());
        *mock.fare_result.lock().unwrap() = Err(error.clone());
        *mock.create_result.lock().unwrap() = Err(error.clone());
        *mock.booking_result.lock().unwrap() = Err(error.clone());
        *mock.bookings_result.lock().unwrap() = Err(error.clone());
        *mock.cancel_result.lock().unwrap() = Err(error);
        mock
    }

    fn record(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
    }

    /// How many times `op` was invoked.
    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockBookingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn car_types(&self) -> ApiResult<Vec<CarType>> {
        self.record("car_types");
        self.car_types_result.lock().unwrap().clone()
    }

    async fn search_locations(&self, _query: &str) -> ApiResult<Vec<Location>> {
        self.record("search_locations");
        self.search_result.lock().unwrap().clone()
    }

    async fn calculate_fare(
        &self,
        _pickup: &Location,
        _drop_off: &Location,
        _car_type: &str,
    ) -> ApiResult<FareDetails> {
        self.record("calculate_fare");
        self.fare_result.lock().unwrap().clone()
    }

    async fn create_booking(&self, _request: &BookingRequest) -> ApiResult<Booking> {
        self.record("create_booking");
        self.create_result.lock().unwrap().clone()
    }

    async fn booking(&self, _id: &str) -> ApiResult<Booking> {
        self.record("booking");
        self.booking_result.lock().unwrap().clone()
    }

    async fn bookings(
        &self,
        _page: u32,
        _limit: u32,
        _filters: &BookingFilters,
    ) -> ApiResult<Paginated<Booking>> {
        self.record("bookings");
        self.bookings_result.lock().unwrap().clone()
    }

    async fn cancel_booking(&self, _id: &str) -> ApiResult<()> {
        self.record("cancel_booking");
        self.cancel_result.lock().unwrap().clone()
    }
}

/// Creates a test App with a default MockBookingApi.
pub fn test_app() -> App {
    App::new(Arc::new(MockBookingApi::new()), 10, sample_draft())
}

/// Creates a test App sharing the given mock, so tests can assert on
/// recorded calls.
pub fn test_app_with(api: Arc<MockBookingApi>) -> App {
    App::new(api, 10, sample_draft())
}
