use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

const DEFAULT_HOST: &str = "booking-com15.p.rapidapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Failure taxonomy for destination resolution and offer search. Callers map
/// each variant to a specific user-facing message; nothing here is a panic.
#[derive(Debug)]
pub enum TravelSearchError {
    /// The destination text matched no usable candidate, even after the
    /// single narrowing retry.
    NoMatch(String),
    /// One or both flight endpoints failed to resolve.
    RouteNotFound(String),
    /// The provider answered successfully but had no inventory, including
    /// after the date-window fallback.
    NoOffers,
    RateLimit,
    Auth(String),
    Timeout(String),
    Provider(String),
    Http(reqwest::Error),
    Environment(String),
}

impl fmt::Display for TravelSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelSearchError::NoMatch(text) => write!(f, "No destination matched '{}'", text),
            TravelSearchError::RouteNotFound(text) => {
                write!(f, "Could not resolve route endpoint '{}'", text)
            }
            TravelSearchError::NoOffers => write!(f, "Provider returned no offers"),
            TravelSearchError::RateLimit => write!(f, "Provider rate limit hit"),
            TravelSearchError::Auth(msg) => write!(f, "Provider authentication error: {}", msg),
            TravelSearchError::Timeout(msg) => write!(f, "Provider timed out: {}", msg),
            TravelSearchError::Provider(msg) => write!(f, "Provider error: {}", msg),
            TravelSearchError::Http(err) => write!(f, "HTTP error: {}", err),
            TravelSearchError::Environment(msg) => write!(f, "Environment error: {}", msg),
        }
    }
}

impl Error for TravelSearchError {}

impl From<reqwest::Error> for TravelSearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TravelSearchError::Timeout(err.to_string())
        } else {
            TravelSearchError::Http(err)
        }
    }
}

/// The provider exposes separate destination lookups for flights and hotels
/// with near-identical candidate shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Flights,
    Hotels,
}

impl SearchScope {
    fn destination_path(&self) -> &'static str {
        match self {
            SearchScope::Flights => "/api/v1/flights/searchDestination",
            SearchScope::Hotels => "/api/v1/hotels/searchDestination",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlightQuery {
    pub from_id: String,
    pub to_id: String,
    pub depart_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
}

#[derive(Debug, Clone)]
pub struct HotelQuery {
    pub dest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

/// Seam between the search pipeline and the upstream travel provider.
/// Production uses `BookingApiClient`; tests substitute stubs.
pub trait TravelProvider {
    async fn search_destinations(
        &self,
        scope: SearchScope,
        query: &str,
    ) -> Result<Vec<Value>, TravelSearchError>;

    async fn search_flights(&self, query: &FlightQuery) -> Result<Value, TravelSearchError>;

    async fn search_hotels(&self, query: &HotelQuery) -> Result<Value, TravelSearchError>;
}

#[derive(Clone)]
pub struct BookingApiClient {
    client: Client,
    api_key: String,
    api_host: String,
    base_url: String,
}

impl BookingApiClient {
    pub fn from_env() -> Result<Self, TravelSearchError> {
        let api_key = env::var("BOOKING_API_KEY")
            .map_err(|_| TravelSearchError::Environment("BOOKING_API_KEY not set".to_string()))?;
        let api_host = env::var("BOOKING_API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let base_url = env::var("BOOKING_API_BASE_URL")
            .unwrap_or_else(|_| format!("https://{}", api_host));

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_host,
            base_url,
        })
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, TravelSearchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| TravelSearchError::Provider(format!("Failed to parse response: {}", e)))
    }
}

fn classify_status(status: StatusCode, body: &str) -> TravelSearchError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TravelSearchError::RateLimit,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TravelSearchError::Auth(format!("status {}: {}", status, body))
        }
        _ => TravelSearchError::Provider(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

impl TravelProvider for BookingApiClient {
    async fn search_destinations(
        &self,
        scope: SearchScope,
        query: &str,
    ) -> Result<Vec<Value>, TravelSearchError> {
        let payload = self
            .get(scope.destination_path(), &[("query", query.to_string())])
            .await?;
        Ok(payload
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    async fn search_flights(&self, query: &FlightQuery) -> Result<Value, TravelSearchError> {
        let mut params = vec![
            ("fromId", query.from_id.clone()),
            ("toId", query.to_id.clone()),
            ("departDate", query.depart_date.format("%Y-%m-%d").to_string()),
            ("adults", query.adults.to_string()),
        ];
        if let Some(return_date) = query.return_date {
            params.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
        }
        self.get("/api/v1/flights/searchFlights", &params).await
    }

    async fn search_hotels(&self, query: &HotelQuery) -> Result<Value, TravelSearchError> {
        let mut params = vec![
            ("dest_id", query.dest_id.clone()),
            ("search_type", "CITY".to_string()),
            ("arrival_date", query.check_in.format("%Y-%m-%d").to_string()),
            ("departure_date", query.check_out.format("%Y-%m-%d").to_string()),
            ("adults", query.adults.to_string()),
            ("room_qty", query.rooms.to_string()),
        ];
        if query.children > 0 {
            // Ages are not collected at search time; the provider expects a
            // comma-separated list with one entry per child.
            let ages = vec!["5"; query.children as usize].join(",");
            params.push(("children_age", ages));
        }
        self.get("/api/v1/hotels/searchHotels", &params).await
    }
}
