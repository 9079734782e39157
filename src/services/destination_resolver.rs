use serde_json::Value;

use crate::models::destination::{DestinationKind, ProviderDestination};

use super::booking_client::{SearchScope, TravelProvider, TravelSearchError};
use super::offer_normalizer::{first_display, first_string};

// Candidate field names vary between the flight and hotel lookup endpoints.
const CANDIDATE_NAME: &[&str] = &["cityName", "city_name", "name"];
const CANDIDATE_COUNTRY: &[&str] = &["countryName", "country_name", "country"];
const CANDIDATE_ID: &[&str] = &["id", "dest_id"];

/// Resolves free text to provider destinations, in the provider's own
/// relevance order. On zero usable candidates the query is retried exactly
/// once, narrowed to its first whitespace-delimited token; an unbounded
/// retry loop would mask a data problem as a timing problem.
pub async fn resolve<P: TravelProvider>(
    provider: &P,
    scope: SearchScope,
    free_text: &str,
) -> Result<Vec<ProviderDestination>, TravelSearchError> {
    let trimmed = free_text.trim();
    if trimmed.is_empty() {
        return Err(TravelSearchError::NoMatch(free_text.to_string()));
    }

    let candidates = lookup(provider, scope, trimmed).await?;
    if !candidates.is_empty() {
        return Ok(candidates);
    }

    let narrowed = trimmed.split_whitespace().next().unwrap_or(trimmed);
    println!(
        "No destinations for '{}', retrying narrowed query '{}'",
        trimmed, narrowed
    );

    let candidates = lookup(provider, scope, narrowed).await?;
    if candidates.is_empty() {
        return Err(TravelSearchError::NoMatch(free_text.to_string()));
    }
    Ok(candidates)
}

/// Single-best selection: the first candidate in provider response order.
/// The provider's ranking is trusted; no re-ranking happens here.
pub async fn resolve_first<P: TravelProvider>(
    provider: &P,
    scope: SearchScope,
    free_text: &str,
) -> Result<ProviderDestination, TravelSearchError> {
    let mut candidates = resolve(provider, scope, free_text).await?;
    Ok(candidates.remove(0))
}

async fn lookup<P: TravelProvider>(
    provider: &P,
    scope: SearchScope,
    query: &str,
) -> Result<Vec<ProviderDestination>, TravelSearchError> {
    let raw = provider.search_destinations(scope, query).await?;
    Ok(raw.iter().filter_map(candidate_from_value).collect())
}

/// A candidate must carry both a display name and an identifier to be usable.
fn candidate_from_value(raw: &Value) -> Option<ProviderDestination> {
    let display_name = first_string(raw, CANDIDATE_NAME)?;
    let provider_id = first_display(raw, CANDIDATE_ID)?;

    Some(ProviderDestination {
        display_name,
        country_name: first_string(raw, CANDIDATE_COUNTRY).unwrap_or_default(),
        provider_id,
        kind: first_string(raw, &["type"])
            .map(|t| DestinationKind::from_provider(&t))
            .unwrap_or(DestinationKind::City),
    })
}
