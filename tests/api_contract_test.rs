use actix_web::{test, web, App, HttpResponse};
use serde_json::json;

// Contract-level tests for the HTTP surface: status codes and response
// shapes the client depends on, served by stub handlers. The search and
// synthesis logic itself is covered by the unit suites in src/services.

async fn health_check() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().body("OK"))
}

async fn search_flights() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!([
        {
            "airline_name": "Air France",
            "flight_number": "11",
            "departure": { "airport_code": "JFK", "city_name": "New York", "time": "2025-10-01T18:30:00" },
            "arrival": { "airport_code": "CDG", "city_name": "Paris", "time": "2025-10-02T07:45:00" },
            "duration_seconds": 26100,
            "duration": "7h 15m",
            "stop_count": 0,
            "total_price": 412.5,
            "currency": "USD",
            "booking_url": "https://example.com/book/1",
            "segments": [{}]
        }
    ])))
}

async fn search_hotels_no_offers() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(json!({
        "message": "No offers found. Try a different date range."
    })))
}

async fn search_flights_rate_limited() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::TooManyRequests().json(json!({
        "message": "The travel provider is rate limiting requests. Try again in a minute."
    })))
}

async fn personalized_recommendations() -> actix_web::Result<HttpResponse> {
    let item = json!({
        "city": "Lisbon",
        "country": "Portugal",
        "reason": "Walkable neighborhoods, coastal day trips and strong value for money",
        "cost": "$1200 per week",
        "best_time": "March to June",
        "photo_url": "https://source.unsplash.com/800x600/?Lisbon%2CPortugal",
        "details": { "rating_guess": 4, "price_level_guess": 2 }
    });
    Ok(HttpResponse::Ok().json(json!({
        "recommendations": [item.clone(), item.clone(), item.clone(), item.clone(), item.clone(), item]
    })))
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(App::new().route("/health", web::get().to(health_check))).await;

    let req = test::TestRequest::get().uri("/health").to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_flight_search_response_shape() {
    let app = test::init_service(
        App::new().route("/api/travel/flights", web::get().to(search_flights)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/travel/flights?origin=New%20York&destination=Paris&departure_date=2025-10-01&adults=1")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.is_array());

    let offer = &body[0];
    assert_eq!(offer["stop_count"], 0);
    assert_eq!(offer["departure"]["airport_code"], "JFK");
    // Numeric fields stay numeric on the wire.
    assert!(offer["total_price"].is_f64());
    assert!(offer["duration_seconds"].is_u64());
}

#[actix_web::test]
async fn test_hotel_search_no_offers_message() {
    let app = test::init_service(
        App::new().route("/api/travel/hotels", web::get().to(search_hotels_no_offers)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/travel/hotels?destination=Paris&check_in=2030-01-01&check_out=2030-01-08")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No offers found. Try a different date range.");
}

#[actix_web::test]
async fn test_rate_limited_search() {
    let app = test::init_service(
        App::new().route("/api/travel/flights", web::get().to(search_flights_rate_limited)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/travel/flights?origin=A&destination=B&departure_date=2025-10-01")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);
}

#[actix_web::test]
async fn test_personalized_recommendations_returns_six() {
    let app = test::init_service(App::new().route(
        "/api/recommendations/personalized",
        web::post().to(personalized_recommendations),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/recommendations/personalized")
        .set_json(&json!({ "categories": ["beaches", "food"], "budget": 2000 }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 6);
    for rec in recommendations {
        assert!(rec["details"]["rating_guess"].is_u64());
        assert!(!rec["photo_url"].as_str().unwrap().is_empty());
    }
}
