//! Canonicalizes provider-shaped flight and hotel records.
//!
//! The upstream schema differs between endpoints and between successful and
//! degraded responses, so every logical field is backed by an ordered list of
//! accessor paths, evaluated left-to-right, first present non-empty value
//! wins. Normalization never fails hard: a record missing its minimum fields
//! yields `None`, every other gap resolves to a documented sentinel.

use serde_json::Value;

use crate::models::offer::{AirportStop, FlightOffer, FlightSegment, HotelOffer, UNKNOWN};

const HOTEL_NAME: &[&str] = &["property.name", "hotel_name", "name"];
const HOTEL_ADDRESS: &[&str] = &["address", "property.address", "accessibilityLabel"];
const HOTEL_DESCRIPTION: &[&str] = &["description", "unit_configuration_label"];
const HOTEL_STAR_RATING: &[&str] = &[
    "property.propertyClass",
    "property.accuratePropertyClass",
    "class",
    "star_rating",
];
const HOTEL_REVIEW_SCORE: &[&str] = &["property.reviewScore", "review_score"];
const HOTEL_REVIEW_WORD: &[&str] = &["property.reviewScoreWord", "review_score_word"];
const HOTEL_REVIEW_COUNT: &[&str] = &["property.reviewCount", "review_nr", "review_count"];
const HOTEL_PRICE: &[&str] = &[
    "property.priceBreakdown.grossPrice.value",
    "priceBreakdown.grossPrice.value",
    "min_total_price",
    "price",
];
const HOTEL_CURRENCY: &[&str] = &[
    "property.priceBreakdown.grossPrice.currency",
    "priceBreakdown.grossPrice.currency",
    "currencycode",
    "currency_code",
];
const HOTEL_PHOTO: &[&str] = &[
    "property.photoUrls.0",
    "max_photo_url",
    "main_photo_url",
    "photo_url",
];
const HOTEL_URL: &[&str] = &["url", "booking_url"];
const HOTEL_AMENITIES: &[&str] = &["property.facilities", "hotel_facilities", "amenities"];

const FLIGHT_PRICE: &[&str] = &[
    "priceBreakdown.total.units",
    "travellerPrices.0.price.units",
    "price",
];
const FLIGHT_CURRENCY: &[&str] = &[
    "priceBreakdown.total.currencyCode",
    "travellerPrices.0.price.currencyCode",
];
const SEGMENT_AIRLINE: &[&str] = &["legs.0.carriersData.0.name"];
const SEGMENT_AIRLINE_LOGO: &[&str] = &["legs.0.carriersData.0.logo"];
const SEGMENT_FLIGHT_NUMBER: &[&str] = &["legs.0.flightInfo.flightNumber"];

/// Walks a dot-delimited accessor path; numeric components index into arrays.
fn value_at<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for component in path.split('.') {
        current = match component.parse::<usize>() {
            Ok(index) => current.get(index)?,
            Err(_) => current.get(component)?,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

pub(crate) fn first_string(record: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| {
        value_at(record, path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    })
}

/// Like `first_string` but also accepts numbers, for identifiers the
/// provider sometimes sends unquoted (flight numbers, destination ids).
pub(crate) fn first_display(record: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| {
        let value = value_at(record, path)?;
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

fn first_f64(record: &Value, paths: &[&str]) -> Option<f64> {
    paths.iter().find_map(|path| {
        let value = value_at(record, path)?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

fn first_u64(record: &Value, paths: &[&str]) -> Option<u64> {
    paths.iter().find_map(|path| {
        let value = value_at(record, path)?;
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

/// "2h 30m" at the boundary; the numeric seconds stay on the model.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return UNKNOWN.to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

fn string_or_unknown(record: &Value, paths: &[&str]) -> String {
    first_string(record, paths).unwrap_or_else(|| UNKNOWN.to_string())
}

fn airport_stop(segment: &Value, side: &str) -> AirportStop {
    let code_path = format!("{}Airport.code", side);
    let city_paths = [
        format!("{}Airport.cityName", side),
        format!("{}Airport.city", side),
    ];
    let time_path = format!("{}Time", side);
    AirportStop {
        airport_code: first_string(segment, &[code_path.as_str()])
            .unwrap_or_else(|| UNKNOWN.to_string()),
        city_name: first_string(segment, &[city_paths[0].as_str(), city_paths[1].as_str()])
            .unwrap_or_else(|| UNKNOWN.to_string()),
        time: first_string(segment, &[time_path.as_str()]).unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn normalize_segment(segment: &Value) -> FlightSegment {
    let duration_seconds = first_u64(segment, &["totalTime"]).unwrap_or(0);
    FlightSegment {
        airline_name: first_string(segment, SEGMENT_AIRLINE)
            .unwrap_or_else(|| "Unknown Airline".to_string()),
        airline_logo: first_string(segment, SEGMENT_AIRLINE_LOGO).unwrap_or_default(),
        flight_number: first_display(segment, SEGMENT_FLIGHT_NUMBER)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        departure: airport_stop(segment, "departure"),
        arrival: airport_stop(segment, "arrival"),
        duration_seconds,
        duration: format_duration(duration_seconds),
    }
}

/// Canonicalizes one provider flight offer. Offers without segments carry
/// nothing displayable and are dropped.
pub fn normalize_flight_offer(offer: &Value) -> Option<FlightOffer> {
    let raw_segments = offer.get("segments").and_then(Value::as_array)?;
    if raw_segments.is_empty() {
        return None;
    }

    let segments: Vec<FlightSegment> = raw_segments.iter().map(normalize_segment).collect();
    let duration_seconds: u64 = segments.iter().map(|s| s.duration_seconds).sum();

    let first = &segments[0];
    let last = &segments[segments.len() - 1];

    Some(FlightOffer {
        airline_name: first.airline_name.clone(),
        airline_logo: first.airline_logo.clone(),
        flight_number: first.flight_number.clone(),
        departure: first.departure.clone(),
        arrival: last.arrival.clone(),
        duration_seconds,
        duration: format_duration(duration_seconds),
        stop_count: segments.len() - 1,
        total_price: first_f64(offer, FLIGHT_PRICE),
        currency: string_or_unknown(offer, FLIGHT_CURRENCY),
        booking_url: first_string(offer, &["bookingUrl"]).unwrap_or_else(|| "#".to_string()),
        token: first_string(offer, &["token"]),
        segments,
    })
}

fn amenities(record: &Value) -> Vec<String> {
    for path in HOTEL_AMENITIES {
        match value_at(record, path) {
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect();
            }
            // Some endpoints send facilities as one comma-joined string.
            Some(Value::String(joined)) => {
                return joined
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            _ => continue,
        }
    }
    Vec::new()
}

/// Canonicalizes one provider hotel record. A listing without any name
/// cannot be shown and is dropped; a missing price alone is not fatal.
pub fn normalize_hotel(record: &Value) -> Option<HotelOffer> {
    let hotel_name = first_string(record, HOTEL_NAME)?;

    Some(HotelOffer {
        hotel_name,
        address: string_or_unknown(record, HOTEL_ADDRESS),
        description: string_or_unknown(record, HOTEL_DESCRIPTION),
        star_rating: first_f64(record, HOTEL_STAR_RATING),
        review_score: first_f64(record, HOTEL_REVIEW_SCORE),
        review_score_word: string_or_unknown(record, HOTEL_REVIEW_WORD),
        review_count: first_u64(record, HOTEL_REVIEW_COUNT).unwrap_or(0),
        price_per_stay: first_f64(record, HOTEL_PRICE),
        currency: string_or_unknown(record, HOTEL_CURRENCY),
        amenities: amenities(record),
        photo_url: string_or_unknown(record, HOTEL_PHOTO),
        booking_url: first_string(record, HOTEL_URL).unwrap_or_else(|| "#".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_flight_offer() -> Value {
        json!({
            "token": "d6a1f_H4",
            "bookingUrl": "https://example.com/book/1",
            "priceBreakdown": { "total": { "units": 412.5, "currencyCode": "USD" } },
            "segments": [
                {
                    "departureAirport": { "code": "JFK", "cityName": "New York" },
                    "arrivalAirport": { "code": "CDG", "cityName": "Paris" },
                    "departureTime": "2025-10-01T18:30:00",
                    "arrivalTime": "2025-10-02T07:45:00",
                    "totalTime": 26100,
                    "legs": [{
                        "carriersData": [{ "name": "Air France", "logo": "https://img/af.png" }],
                        "flightInfo": { "flightNumber": 11 }
                    }]
                },
                {
                    "departureAirport": { "code": "CDG", "city": "Paris" },
                    "arrivalAirport": { "code": "FCO", "city": "Rome" },
                    "departureTime": "2025-10-02T09:30:00",
                    "arrivalTime": "2025-10-02T11:35:00",
                    "totalTime": 7500,
                    "legs": [{
                        "carriersData": [{ "name": "ITA Airways" }],
                        "flightInfo": { "flightNumber": 333 }
                    }]
                }
            ]
        })
    }

    #[test]
    fn test_flight_offer_normalization() {
        let offer = normalize_flight_offer(&sample_flight_offer()).unwrap();

        assert_eq!(offer.airline_name, "Air France");
        assert_eq!(offer.flight_number, "11");
        assert_eq!(offer.departure.airport_code, "JFK");
        assert_eq!(offer.arrival.airport_code, "FCO");
        assert_eq!(offer.arrival.city_name, "Rome");
        assert_eq!(offer.total_price, Some(412.5));
        assert_eq!(offer.currency, "USD");
        assert_eq!(offer.duration_seconds, 33600);
        assert_eq!(offer.duration, "9h 20m");
        assert_eq!(offer.token.as_deref(), Some("d6a1f_H4"));
    }

    #[test]
    fn test_stop_count_matches_segments() {
        let offer = normalize_flight_offer(&sample_flight_offer()).unwrap();
        assert_eq!(offer.stop_count, offer.segments.len() - 1);
        assert_eq!(offer.stop_count, 1);
    }

    #[test]
    fn test_flight_price_fallback_paths() {
        let offer = json!({
            "travellerPrices": [{ "price": { "units": 199, "currencyCode": "EUR" } }],
            "segments": [{ "totalTime": 3600 }]
        });
        let normalized = normalize_flight_offer(&offer).unwrap();
        assert_eq!(normalized.total_price, Some(199.0));
        assert_eq!(normalized.currency, "EUR");
    }

    #[test]
    fn test_flight_without_segments_is_dropped() {
        assert!(normalize_flight_offer(&json!({ "segments": [] })).is_none());
        assert!(normalize_flight_offer(&json!({ "price": 100 })).is_none());
    }

    #[test]
    fn test_segment_sentinels_never_panic() {
        // A degraded segment with every optional field missing.
        let offer = json!({ "segments": [{}] });
        let normalized = normalize_flight_offer(&offer).unwrap();
        let segment = &normalized.segments[0];

        assert_eq!(segment.airline_name, "Unknown Airline");
        assert_eq!(segment.departure.airport_code, UNKNOWN);
        assert_eq!(segment.arrival.time, UNKNOWN);
        assert_eq!(segment.duration, UNKNOWN);
        assert_eq!(normalized.total_price, None);
        assert_eq!(normalized.booking_url, "#");
        assert_eq!(normalized.stop_count, 0);
    }

    #[test]
    fn test_hotel_normalization_new_shape() {
        let record = json!({
            "property": {
                "name": "Hotel Le Marais",
                "reviewScore": 8.7,
                "reviewScoreWord": "Excellent",
                "reviewCount": 1204,
                "propertyClass": 4,
                "photoUrls": ["https://img/1.jpg", "https://img/2.jpg"],
                "priceBreakdown": { "grossPrice": { "value": 980.0, "currency": "EUR" } }
            }
        });
        let hotel = normalize_hotel(&record).unwrap();

        assert_eq!(hotel.hotel_name, "Hotel Le Marais");
        assert_eq!(hotel.review_score, Some(8.7));
        assert_eq!(hotel.review_score_word, "Excellent");
        assert_eq!(hotel.review_count, 1204);
        assert_eq!(hotel.star_rating, Some(4.0));
        assert_eq!(hotel.price_per_stay, Some(980.0));
        assert_eq!(hotel.currency, "EUR");
        assert_eq!(hotel.photo_url, "https://img/1.jpg");
    }

    #[test]
    fn test_hotel_normalization_legacy_shape() {
        let record = json!({
            "hotel_name": "Grand Plaza",
            "address": "1 Main St",
            "review_score": "7.9",
            "review_nr": 88,
            "min_total_price": "412.30",
            "currencycode": "USD",
            "max_photo_url": "https://img/plaza.jpg",
            "url": "https://example.com/plaza",
            "hotel_facilities": "wifi, pool , parking"
        });
        let hotel = normalize_hotel(&record).unwrap();

        assert_eq!(hotel.hotel_name, "Grand Plaza");
        assert_eq!(hotel.review_score, Some(7.9));
        assert_eq!(hotel.price_per_stay, Some(412.30));
        assert_eq!(hotel.amenities, vec!["wifi", "pool", "parking"]);
        assert_eq!(hotel.booking_url, "https://example.com/plaza");
    }

    #[test]
    fn test_hotel_without_name_is_dropped() {
        assert!(normalize_hotel(&json!({ "min_total_price": 100 })).is_none());
        assert!(normalize_hotel(&json!({ "hotel_name": "   " })).is_none());
    }

    #[test]
    fn test_hotel_missing_price_is_not_fatal() {
        let hotel = normalize_hotel(&json!({ "name": "Budget Inn" })).unwrap();
        assert_eq!(hotel.price_per_stay, None);
        assert_eq!(hotel.address, UNKNOWN);
        assert_eq!(hotel.review_count, 0);
        assert!(hotel.amenities.is_empty());
    }

    #[test]
    fn test_normalization_tolerates_wrong_types() {
        // Strings where numbers are expected and vice versa must not panic.
        let record = json!({
            "hotel_name": "Odd One",
            "review_score": { "nested": true },
            "review_nr": "not-a-number",
            "min_total_price": [1, 2, 3]
        });
        let hotel = normalize_hotel(&record).unwrap();
        assert_eq!(hotel.review_score, None);
        assert_eq!(hotel.review_count, 0);
        assert_eq!(hotel.price_per_stay, None);
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(0), UNKNOWN);
        assert_eq!(format_duration(59), "0h 0m");
        assert_eq!(format_duration(5400), "1h 30m");
        assert_eq!(format_duration(26100), "7h 15m");
    }
}
