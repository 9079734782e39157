use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::search::{FlightSearchParams, HotelSearchParams};
use crate::services::booking_client::{BookingApiClient, TravelSearchError};
use crate::services::travel_search_service::TravelSearchService;

/*
    /api/travel/flights
*/
pub async fn search_flights(params: web::Query<FlightSearchParams>) -> impl Responder {
    let params = params.into_inner();

    if let Some(return_date) = params.return_date {
        if return_date < params.departure_date {
            return HttpResponse::BadRequest()
                .json(json!({"message": "Return date must not be before the departure date"}));
        }
    }
    if params.adults == 0 {
        return HttpResponse::BadRequest()
            .json(json!({"message": "At least one adult is required"}));
    }

    let provider = match BookingApiClient::from_env() {
        Ok(provider) => provider,
        Err(err) => return error_response(err),
    };
    let service = TravelSearchService::new(provider);

    match service
        .search_flights(
            &params.origin,
            &params.destination,
            params.departure_date,
            params.return_date,
            params.adults,
        )
        .await
    {
        Ok(offers) => HttpResponse::Ok().json(offers),
        Err(err) => error_response(err),
    }
}

/*
    /api/travel/hotels
*/
pub async fn search_hotels(params: web::Query<HotelSearchParams>) -> impl Responder {
    let params = params.into_inner();

    if params.check_in >= params.check_out {
        return HttpResponse::BadRequest()
            .json(json!({"message": "Check-out must be after check-in"}));
    }
    if params.adults == 0 || params.rooms == 0 {
        return HttpResponse::BadRequest()
            .json(json!({"message": "At least one adult and one room are required"}));
    }

    let provider = match BookingApiClient::from_env() {
        Ok(provider) => provider,
        Err(err) => return error_response(err),
    };
    let service = TravelSearchService::new(provider);

    match service
        .search_hotels(
            &params.destination,
            params.check_in,
            params.check_out,
            params.adults,
            params.children,
            params.rooms,
        )
        .await
    {
        Ok(hotels) => HttpResponse::Ok().json(hotels),
        Err(err) => error_response(err),
    }
}

/// Maps the typed search failures to status codes and actionable messages;
/// the generic "provider returned an error" string is reserved for faults we
/// cannot classify further.
fn error_response(err: TravelSearchError) -> HttpResponse {
    eprintln!("Travel search failed: {}", err);
    match err {
        TravelSearchError::NoMatch(text) => HttpResponse::NotFound().json(json!({
            "message": format!("No destination matched '{}'. Check the city spelling.", text)
        })),
        TravelSearchError::RouteNotFound(text) => HttpResponse::NotFound().json(json!({
            "message": format!("Could not resolve '{}' as a flight endpoint. Check the city spelling.", text)
        })),
        TravelSearchError::NoOffers => HttpResponse::NotFound().json(json!({
            "message": "No offers found. Try a different date range."
        })),
        TravelSearchError::RateLimit => HttpResponse::TooManyRequests().json(json!({
            "message": "The travel provider is rate limiting requests. Try again in a minute."
        })),
        TravelSearchError::Auth(_) => HttpResponse::BadGateway().json(json!({
            "message": "The travel provider rejected our credentials."
        })),
        TravelSearchError::Timeout(_) => HttpResponse::GatewayTimeout().json(json!({
            "message": "The travel provider took too long to respond."
        })),
        TravelSearchError::Provider(_) | TravelSearchError::Http(_) => {
            HttpResponse::BadGateway().json(json!({
                "message": "The travel provider returned an error."
            }))
        }
        TravelSearchError::Environment(_) => HttpResponse::InternalServerError().json(json!({
            "message": "Travel search is not configured."
        })),
    }
}
