use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

mod models;
mod routes;
mod services;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    if std::env::var("BOOKING_API_KEY").is_err() {
        eprintln!("BOOKING_API_KEY not set; travel searches will fail until it is configured");
    }
    if std::env::var("OPENAI_API_KEY").is_err() {
        eprintln!("OPENAI_API_KEY not set; recommendations will fail until it is configured");
    }

    println!("Starting HTTP server...");

    HttpServer::new(|| {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/travel")
                            .route("/flights", web::get().to(routes::travel::search_flights))
                            .route("/hotels", web::get().to(routes::travel::search_hotels)),
                    )
                    .service(
                        web::scope("/recommendations").route(
                            "/personalized",
                            web::post().to(routes::recommendation::personalized),
                        ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
