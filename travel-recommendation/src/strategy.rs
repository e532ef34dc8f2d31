use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::recommendation::TravelRecommendation;

/// Number of recommendations every strategy yields on success.
pub const RECOMMENDATION_COUNT: usize = 3;

/// Pluggable algorithm for producing travel recommendations.
#[async_trait]
pub trait RecommendationStrategy: Send + Sync {
    async fn recommend(&self, country: &str, season: &str) -> Result<Vec<TravelRecommendation>>;
}

const STATIC_TEMPLATES: [&str; RECOMMENDATION_COUNT] = [
    "Watch the sunrise from the highest point you can find in {country}",
    "Ask a local in {country} where they eat on their day off, and go there",
    "Take the slowest train across {country} and get off at a stop you cannot pronounce",
];

/// Deterministic strategy with no external dependencies.
///
/// Returns the same three templates for every input, with the country
/// spliced in. Serves as the fallback when no API key is configured and as
/// a test double.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticStrategy;

#[async_trait]
impl RecommendationStrategy for StaticStrategy {
    async fn recommend(&self, country: &str, season: &str) -> Result<Vec<TravelRecommendation>> {
        Ok(STATIC_TEMPLATES
            .iter()
            .map(|template| {
                TravelRecommendation::new(country, season, template.replace("{country}", country))
            })
            .collect())
    }
}

/// Delegates to whichever strategy it was constructed with.
///
/// Callers depend on this type rather than a concrete strategy, so the
/// model-backed and static variants can be swapped without touching call
/// sites.
pub struct TravelRecommender {
    strategy: Arc<dyn RecommendationStrategy>,
}

impl TravelRecommender {
    pub fn new(strategy: Arc<dyn RecommendationStrategy>) -> Self {
        Self { strategy }
    }

    pub async fn recommend(
        &self,
        country: &str,
        season: &str,
    ) -> Result<Vec<TravelRecommendation>> {
        self.strategy.recommend(country, season).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_strategy_returns_three_records_echoing_the_inputs() {
        let records = StaticStrategy.recommend("Peru", "fall").await.unwrap();

        assert_eq!(records.len(), RECOMMENDATION_COUNT);
        for record in &records {
            assert_eq!(record.country, "Peru");
            assert_eq!(record.season, "fall");
            assert!(record.recommendation.contains("Peru"));
        }
    }

    #[tokio::test]
    async fn interpolation_leaves_no_placeholder_behind() {
        let records = StaticStrategy
            .recommend("New Zealand", "spring")
            .await
            .unwrap();

        assert!(records
            .iter()
            .all(|r| !r.recommendation.contains("{country}")));
    }
}
