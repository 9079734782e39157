use reqwest::Client;
use serde_json::Value;
use std::env;
use std::time::Duration;

const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Seam to the image-search collaborator. Lookup is best-effort: every
/// failure mode (no key, network error, zero results) is `None`, never an
/// error for the caller to handle.
pub trait ImageSearchClient {
    async fn photo_url(&self, query: &str) -> Option<String>;
}

/// Deterministic stand-in built from the same query string, used whenever
/// the image search comes up empty.
pub fn placeholder_photo_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("https://source.unsplash.com/800x600/?{}", encoded)
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn from_env() -> Self {
        let access_key = env::var("UNSPLASH_ACCESS_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        if access_key.is_none() {
            eprintln!("UNSPLASH_ACCESS_KEY not set; falling back to placeholder photos");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self { client, access_key }
    }
}

impl ImageSearchClient for UnsplashClient {
    async fn photo_url(&self, query: &str) -> Option<String> {
        let access_key = self.access_key.as_deref()?;

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("query", query),
                ("client_id", access_key),
                ("orientation", "landscape"),
                ("per_page", "1"),
            ])
            .send()
            .await
            .map_err(|e| eprintln!("Unsplash request failed: {}", e))
            .ok()?;

        if !response.status().is_success() {
            eprintln!("Unsplash returned status {}", response.status());
            return None;
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| eprintln!("Failed to parse Unsplash response: {}", e))
            .ok()?;

        payload
            .pointer("/results/0/urls/regular")
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_url_encodes_query() {
        assert_eq!(
            placeholder_photo_url("Paris,France"),
            "https://source.unsplash.com/800x600/?Paris%2CFrance"
        );
        assert_eq!(
            placeholder_photo_url("Mexico City,Mexico"),
            "https://source.unsplash.com/800x600/?Mexico+City%2CMexico"
        );
    }
}
