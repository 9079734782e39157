use chrono::NaiveDate;
use serde::Deserialize;

fn default_adults() -> u32 {
    1
}

fn default_rooms() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct FlightSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: u32,
}

#[derive(Debug, Deserialize)]
pub struct HotelSearchParams {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub categories: Vec<String>,
    pub budget: f64,
}
