use serde::{Deserialize, Serialize};

/// A place candidate from the provider's destination lookup, reduced to the
/// fields the search gateway needs. Held only for the duration of one search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderDestination {
    pub display_name: String,
    pub country_name: String,
    pub provider_id: String,
    pub kind: DestinationKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    City,
    Airport,
    Region,
}

impl DestinationKind {
    /// The provider's `type` field varies in casing between endpoints;
    /// anything unrecognized is treated as a city.
    pub fn from_provider(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "airport" => DestinationKind::Airport,
            "region" | "district" => DestinationKind::Region,
            _ => DestinationKind::City,
        }
    }
}
