pub mod booking_client;
pub mod destination_resolver;
pub mod offer_normalizer;
pub mod openai_client;
pub mod recommendation_service;
pub mod travel_search_service;
pub mod unsplash_client;
