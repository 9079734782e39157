use serde::{Deserialize, Serialize};

/// Sentinel for display fields the provider did not populate. Numeric fields
/// use `Option` instead; a raw unparsed string never reaches the caller.
pub const UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportStop {
    pub airport_code: String,
    pub city_name: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSegment {
    pub airline_name: String,
    pub airline_logo: String,
    pub flight_number: String,
    pub departure: AirportStop,
    pub arrival: AirportStop,
    pub duration_seconds: u64,
    /// Display form of `duration_seconds`, e.g. "2h 30m".
    pub duration: String,
}

/// Canonical flight offer, independent of the provider's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub airline_name: String,
    pub airline_logo: String,
    pub flight_number: String,
    pub departure: AirportStop,
    pub arrival: AirportStop,
    pub duration_seconds: u64,
    pub duration: String,
    /// Always `segments.len() - 1`.
    pub stop_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    pub currency: String,
    pub booking_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub segments: Vec<FlightSegment>,
}

/// Canonical hotel listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffer {
    pub hotel_name: String,
    pub address: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_score: Option<f64>,
    pub review_score_word: String,
    pub review_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_stay: Option<f64>,
    pub currency: String,
    pub amenities: Vec<String>,
    pub photo_url: String,
    pub booking_url: String,
}
