use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::search::RecommendationRequest;
use crate::services::openai_client::{OpenAiClient, RecommendationError};
use crate::services::recommendation_service::RecommendationService;
use crate::services::unsplash_client::UnsplashClient;

/*
    /api/recommendations/personalized
*/
pub async fn personalized(input: web::Json<RecommendationRequest>) -> impl Responder {
    let input = input.into_inner();
    println!(
        "Recommendation request: categories={:?}, budget={}",
        input.categories, input.budget
    );

    let completion = match OpenAiClient::from_env() {
        Ok(client) => client,
        Err(err) => return error_response(err),
    };
    let images = UnsplashClient::from_env();
    let service = RecommendationService::new(completion, images);

    match service.synthesize(&input.categories, input.budget).await {
        Ok(recommendations) => HttpResponse::Ok().json(json!({
            "recommendations": recommendations
        })),
        Err(err) => error_response(err),
    }
}

fn error_response(err: RecommendationError) -> HttpResponse {
    eprintln!("Recommendation synthesis failed: {}", err);
    match err {
        RecommendationError::Unavailable(_) => HttpResponse::BadGateway().json(json!({
            "message": "Failed to generate recommendations. Try again shortly."
        })),
        RecommendationError::Environment(_) => HttpResponse::InternalServerError().json(json!({
            "message": "Recommendations are not configured."
        })),
    }
}
