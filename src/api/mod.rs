pub mod client;
pub mod types;

pub use client::{BookingApi, DEFAULT_BASE_URL, RestBookingClient};
pub use types::{
    ApiError, ApiResult, Booking, BookingFilters, BookingRequest, BookingStatus, CarDetails,
    CarType, Driver, ErrorCode, FareDetails, FareLineItem, GeoPoint, Location, Paginated, TripType,
};
