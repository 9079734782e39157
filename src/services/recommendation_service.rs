//! Turns a free-text model completion into exactly six structured
//! recommendations. The completion text is treated as an untrusted external
//! protocol: lines that don't satisfy the pipe-delimited grammar are dropped
//! silently, and the fixed catalog below pads the result back up to six.

use futures::future::join_all;
use rand::Rng;

use crate::models::recommendation::{DisplayHints, RecommendationItem};

use super::openai_client::{CompletionClient, RecommendationError};
use super::unsplash_client::{placeholder_photo_url, ImageSearchClient};

pub const RECOMMENDATION_COUNT: usize = 6;

/// Hand-authored backstops for when the completion yields fewer than six
/// usable lines. Cycled in order, so padding is deterministic.
const FALLBACK_CATALOG: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Lisbon",
        "Portugal",
        "Walkable neighborhoods, coastal day trips and strong value for money",
        "$1200 per week",
        "March to June",
    ),
    (
        "Bangkok",
        "Thailand",
        "Street food, temples and nightlife on a modest budget",
        "$900 per week",
        "November to February",
    ),
    (
        "Prague",
        "Czech Republic",
        "Compact historic center with affordable stays",
        "$1000 per week",
        "April to June and September",
    ),
    (
        "Mexico City",
        "Mexico",
        "Museums, markets and a deep food scene",
        "$1100 per week",
        "October to April",
    ),
    (
        "Marrakech",
        "Morocco",
        "Souks, riads and easy desert excursions",
        "$950 per week",
        "March to May and September to November",
    ),
    (
        "Budapest",
        "Hungary",
        "Thermal baths and riverside architecture at gentle prices",
        "$1000 per week",
        "May to September",
    ),
];

/// One structurally valid completion line, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecommendation {
    pub city: String,
    pub country: String,
    pub reason: String,
    pub cost: String,
    pub best_time: String,
}

pub struct RecommendationService<C, I> {
    completion: C,
    images: I,
}

impl<C: CompletionClient, I: ImageSearchClient> RecommendationService<C, I> {
    pub fn new(completion: C, images: I) -> Self {
        Self { completion, images }
    }

    /// Always exactly [`RECOMMENDATION_COUNT`] items on success. The only
    /// fatal failure is the completion collaborator itself erroring.
    pub async fn synthesize(
        &self,
        categories: &[String],
        max_budget: f64,
    ) -> Result<Vec<RecommendationItem>, RecommendationError> {
        let prompt = build_prompt(categories, max_budget);
        let completion = self.completion.complete(&prompt).await?;

        let mut parsed = parse_completion(&completion);
        println!(
            "Parsed {} of {} requested recommendations from completion",
            parsed.len(),
            RECOMMENDATION_COUNT
        );
        pad_recommendations(&mut parsed);

        // Image lookups are independent per record; enrich them together.
        let items = join_all(parsed.into_iter().map(|rec| self.enrich(rec))).await;
        Ok(items)
    }

    async fn enrich(&self, rec: ParsedRecommendation) -> RecommendationItem {
        let query = format!("{},{}", rec.city, rec.country);
        let photo_url = match self.images.photo_url(&query).await {
            Some(url) => url,
            None => placeholder_photo_url(&query),
        };

        let mut rng = rand::thread_rng();
        RecommendationItem {
            city: rec.city,
            country: rec.country,
            reason: rec.reason,
            cost: rec.cost,
            best_time: rec.best_time,
            photo_url,
            details: DisplayHints {
                rating_guess: rng.gen_range(3..=5),
                price_level_guess: rng.gen_range(1..=3),
            },
        }
    }
}

pub fn build_prompt(categories: &[String], max_budget: f64) -> String {
    format!(
        "Recommend 6 travel destinations based on these preferences:\n\
         Categories: {}\n\
         Budget: ${}\n\
         \n\
         For each destination, provide:\n\
         1. City and Country\n\
         2. Why it's recommended for these categories\n\
         3. Estimated cost for a week (include the currency symbol and amount)\n\
         4. Best time to visit (specific months or seasons)\n\
         \n\
         IMPORTANT: Format each recommendation EXACTLY as shown below, using the pipe character (|) as a separator:\n\
         City, Country | Reason | Cost | Best Time\n\
         \n\
         Example format:\n\
         Paris, France | Perfect for art and culture lovers | $2000 per week | April to June and September to October\n\
         \n\
         Make sure to:\n\
         1. Always include the currency symbol ($) in the cost\n\
         2. Always specify months or seasons for best time\n\
         3. Use the exact format shown above\n\
         4. Include exactly 6 recommendations, one per line, with no extra prose",
        categories.join(", "),
        max_budget
    )
}

/// Keeps only structurally valid pipe-delimited lines, at most
/// [`RECOMMENDATION_COUNT`] of them.
pub fn parse_completion(text: &str) -> Vec<ParsedRecommendation> {
    text.lines()
        .filter(|line| !line.trim().is_empty() && line.contains('|'))
        .filter_map(parse_line)
        .take(RECOMMENDATION_COUNT)
        .collect()
}

fn parse_line(line: &str) -> Option<ParsedRecommendation> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < 4 {
        println!("Rejecting malformed recommendation line: {}", line);
        return None;
    }

    let (location, reason, cost, best_time) = (parts[0], parts[1], parts[2], parts[3]);
    let (city, country) = location.split_once(',')?;
    let city = city.trim();
    let country = country.trim();

    if city.is_empty() || country.is_empty() || reason.is_empty() || cost.is_empty() || best_time.is_empty() {
        println!("Rejecting recommendation line with empty fields: {}", line);
        return None;
    }

    Some(ParsedRecommendation {
        city: city.to_string(),
        country: country.to_string(),
        reason: reason.to_string(),
        cost: cost.to_string(),
        best_time: best_time.to_string(),
    })
}

/// Appends catalog entries until exactly [`RECOMMENDATION_COUNT`] records
/// are present. A completion that already produced six contributes nothing.
pub fn pad_recommendations(parsed: &mut Vec<ParsedRecommendation>) {
    let mut next = 0usize;
    while parsed.len() < RECOMMENDATION_COUNT {
        let (city, country, reason, cost, best_time) = FALLBACK_CATALOG[next % FALLBACK_CATALOG.len()];
        parsed.push(ParsedRecommendation {
            city: city.to_string(),
            country: country.to_string(),
            reason: reason.to_string(),
            cost: cost.to_string(),
            best_time: best_time.to_string(),
        });
        next += 1;
    }
}
