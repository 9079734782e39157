use chrono::{Duration, NaiveDate, Utc};
use futures::try_join;
use serde_json::Value;

use crate::models::offer::{FlightOffer, HotelOffer};

use super::booking_client::{
    FlightQuery, HotelQuery, SearchScope, TravelProvider, TravelSearchError,
};
use super::destination_resolver;
use super::offer_normalizer;

/// Orchestrates resolve -> search -> normalize for flights and hotels.
/// On success the returned offer list is non-empty and every element has
/// passed normalization; callers never see a raw provider record.
pub struct TravelSearchService<P: TravelProvider> {
    provider: P,
}

/// Next calendar day through one week out. Used when the requested window
/// returns no inventory even though the destination itself resolved.
pub fn fallback_date_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today + Duration::days(1), today + Duration::days(8))
}

impl<P: TravelProvider> TravelSearchService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn search_flights(
        &self,
        origin_text: &str,
        destination_text: &str,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        adults: u32,
    ) -> Result<Vec<FlightOffer>, TravelSearchError> {
        // The two lookups are independent; run them together so latency is
        // the max of the two, not the sum.
        let (origin, destination) = try_join!(
            destination_resolver::resolve_first(&self.provider, SearchScope::Flights, origin_text),
            destination_resolver::resolve_first(
                &self.provider,
                SearchScope::Flights,
                destination_text
            ),
        )
        .map_err(|err| match err {
            TravelSearchError::NoMatch(text) => TravelSearchError::RouteNotFound(text),
            other => other,
        })?;

        println!(
            "Flight route resolved: {} ({}) -> {} ({})",
            origin.display_name, origin.provider_id, destination.display_name, destination.provider_id
        );

        let query = FlightQuery {
            from_id: origin.provider_id,
            to_id: destination.provider_id,
            depart_date: departure_date,
            return_date,
            adults,
        };
        let payload = self.provider.search_flights(&query).await?;

        let offers: Vec<FlightOffer> = payload
            .pointer("/data/flightOffers")
            .and_then(Value::as_array)
            .map(|raw| {
                raw.iter()
                    .filter_map(offer_normalizer::normalize_flight_offer)
                    .collect()
            })
            .unwrap_or_default();

        if offers.is_empty() {
            return Err(TravelSearchError::NoOffers);
        }
        Ok(offers)
    }

    pub async fn search_hotels(
        &self,
        destination_text: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
        rooms: u32,
    ) -> Result<Vec<HotelOffer>, TravelSearchError> {
        let destination =
            destination_resolver::resolve_first(&self.provider, SearchScope::Hotels, destination_text)
                .await?;

        let query = HotelQuery {
            dest_id: destination.provider_id,
            check_in,
            check_out,
            adults,
            children,
            rooms,
        };
        let hotels = self.request_hotels(&query).await?;
        if !hotels.is_empty() {
            return Ok(hotels);
        }

        // Far-future or stale date ranges often come back empty for a valid
        // destination; shift the window once before giving up.
        let (fallback_in, fallback_out) = fallback_date_window(Utc::now().date_naive());
        println!(
            "No hotels in {} between {} and {}, retrying {} to {}",
            destination.display_name, check_in, check_out, fallback_in, fallback_out
        );

        let retry = HotelQuery {
            check_in: fallback_in,
            check_out: fallback_out,
            ..query
        };
        let hotels = self.request_hotels(&retry).await?;
        if hotels.is_empty() {
            return Err(TravelSearchError::NoOffers);
        }
        Ok(hotels)
    }

    async fn request_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelOffer>, TravelSearchError> {
        let payload = self.provider.search_hotels(query).await?;
        // Records that fail normalization are dropped, not fatal; partial
        // success beats total failure here.
        Ok(payload
            .pointer("/data/hotels")
            .and_then(Value::as_array)
            .map(|raw| {
                raw.iter()
                    .filter_map(offer_normalizer::normalize_hotel)
                    .collect()
            })
            .unwrap_or_default())
    }
}
