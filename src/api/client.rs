//! Booking API client.
//!
//! A thin, stateless façade over the backend REST API. Every operation
//! returns the uniform [`ApiResult`] envelope: network failures, non-2xx
//! statuses and malformed bodies all collapse into the operation's fixed
//! error code with its fixed message. The underlying cause goes to the
//! log, never into the envelope.
//!
//! No retries, no per-request timeout, no caching, no idempotency key on
//! creation, so a duplicate submission produces a duplicate booking
//! server-side.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    ApiError, ApiResult, Booking, BookingFilters, BookingRequest, CarType, ErrorCode, FareDetails,
    Location, Paginated,
};

pub const DEFAULT_BASE_URL: &str = "https://api.solidcab.com/v1";

/// The seam between screens and the network. Screens hold an
/// `Arc<dyn BookingApi>`; tests substitute a scripted mock.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// GET `/car-types`
    async fn car_types(&self) -> ApiResult<Vec<CarType>>;

    /// GET `/locations/search?query=`
    async fn search_locations(&self, query: &str) -> ApiResult<Vec<Location>>;

    /// POST `/calculate-fare`
    async fn calculate_fare(
        &self,
        pickup: &Location,
        drop_off: &Location,
        car_type: &str,
    ) -> ApiResult<FareDetails>;

    /// POST `/bookings`
    async fn create_booking(&self, request: &BookingRequest) -> ApiResult<Booking>;

    /// GET `/bookings/:id`
    async fn booking(&self, id: &str) -> ApiResult<Booking>;

    /// GET `/bookings?page=&limit=&...`
    async fn bookings(
        &self,
        page: u32,
        limit: u32,
        filters: &BookingFilters,
    ) -> ApiResult<Paginated<Booking>>;

    /// POST `/bookings/:id/cancel`
    async fn cancel_booking(&self, id: &str) -> ApiResult<()>;
}

/// Request body for `/calculate-fare`. The backend expects the full
/// location objects, not just ids.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FareRequest<'a> {
    pickup_location: &'a Location,
    drop_location: &'a Location,
    car_type: &'a str,
}

/// Production implementation backed by `reqwest`.
pub struct RestBookingClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestBookingClient {
    /// Creates a client against the given base URL (defaults to the
    /// production API).
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Sends a request and maps every failure mode onto the operation's
    /// fixed error. Returns the response only on a 2xx status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        code: ErrorCode,
        message: &str,
    ) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed: {e}");
            ApiError::new(code, message)
        })?;

        debug!("{} {}", response.status(), response.url());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("API error (HTTP {status}): {body}");
            return Err(ApiError::new(code, message));
        }

        Ok(response)
    }

    /// `send` plus JSON body decoding, with parse failures collapsed into
    /// the same fixed error.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        code: ErrorCode,
        message: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, code, message).await?;
        response.json::<T>().await.map_err(|e| {
            warn!("Response body did not match the expected shape: {e}");
            ApiError::new(code, message)
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BookingApi for RestBookingClient {
    async fn car_types(&self) -> ApiResult<Vec<CarType>> {
        let request = self.client.get(self.url("/car-types"));
        self.fetch_json(request, ErrorCode::FetchError, "Failed to fetch car types")
            .await
    }

    async fn search_locations(&self, query: &str) -> ApiResult<Vec<Location>> {
        let request = self
            .client
            .get(self.url("/locations/search"))
            .query(&[("query", query)]);
        self.fetch_json(request, ErrorCode::FetchError, "Failed to search locations")
            .await
    }

    async fn calculate_fare(
        &self,
        pickup: &Location,
        drop_off: &Location,
        car_type: &str,
    ) -> ApiResult<FareDetails> {
        let body = FareRequest {
            pickup_location: pickup,
            drop_location: drop_off,
            car_type,
        };
        let request = self.client.post(self.url("/calculate-fare")).json(&body);
        self.fetch_json(
            request,
            ErrorCode::CalculationError,
            "Failed to calculate fare",
        )
        .await
    }

    async fn create_booking(&self, booking_request: &BookingRequest) -> ApiResult<Booking> {
        let request = self.client.post(self.url("/bookings")).json(booking_request);
        self.fetch_json(request, ErrorCode::BookingError, "Failed to create booking")
            .await
    }

    async fn booking(&self, id: &str) -> ApiResult<Booking> {
        let request = self.client.get(self.url(&format!("/bookings/{id}")));
        self.fetch_json(
            request,
            ErrorCode::FetchError,
            "Failed to fetch booking details",
        )
        .await
    }

    async fn bookings(
        &self,
        page: u32,
        limit: u32,
        filters: &BookingFilters,
    ) -> ApiResult<Paginated<Booking>> {
        let mut request = self.client.get(self.url("/bookings")).query(&[
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ]);
        for pair in filters.query_pairs() {
            request = request.query(&[pair]);
        }
        self.fetch_json(
            request,
            ErrorCode::FetchError,
            "Failed to fetch user bookings",
        )
        .await
    }

    async fn cancel_booking(&self, id: &str) -> ApiResult<()> {
        let request = self.client.post(self.url(&format!("/bookings/{id}/cancel")));
        self.send(
            request,
            ErrorCode::CancellationError,
            "Failed to cancel booking",
        )
        .await?;
        Ok(())
    }
}
