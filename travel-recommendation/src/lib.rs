pub mod chat;
pub mod country;
pub mod error;
pub mod model;
pub mod recommendation;
pub mod strategy;

// Re-export commonly used types
pub use chat::{ChatClient, ChatMessage, ChatRequest, ChatRole, OpenAiChatClient};
pub use country::CountryResolver;
pub use error::{ChatError, Result, StrategyError, UnknownCountryError};
pub use model::{ChatModelStrategy, ModelStrategyConfig};
pub use recommendation::TravelRecommendation;
pub use strategy::{
    RecommendationStrategy, StaticStrategy, TravelRecommender, RECOMMENDATION_COUNT,
};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct CannedStrategy;

    #[async_trait]
    impl RecommendationStrategy for CannedStrategy {
        async fn recommend(
            &self,
            country: &str,
            season: &str,
        ) -> Result<Vec<TravelRecommendation>> {
            Ok(vec![
                TravelRecommendation::new(country, season, "one"),
                TravelRecommendation::new(country, season, "two"),
                TravelRecommendation::new(country, season, "three"),
            ])
        }
    }

    #[tokio::test]
    async fn recommender_delegates_to_its_strategy() {
        let recommender = TravelRecommender::new(Arc::new(CannedStrategy));

        let records = recommender.recommend("Chile", "summer").await.unwrap();

        assert_eq!(records.len(), RECOMMENDATION_COUNT);
        assert!(records
            .iter()
            .all(|r| r.country == "Chile" && r.season == "summer"));
    }

    #[tokio::test]
    async fn static_strategy_satisfies_the_count_invariant() {
        let recommender = TravelRecommender::new(Arc::new(StaticStrategy));

        let records = recommender.recommend("Kenya", "winter").await.unwrap();

        assert_eq!(records.len(), RECOMMENDATION_COUNT);
        assert!(records.iter().all(|r| r.recommendation.contains("Kenya")));
    }
}
