use serde::{Deserialize, Serialize};

/// A single travel activity suggestion for a country and season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRecommendation {
    pub country: String,
    pub season: String,
    pub recommendation: String,
}

impl TravelRecommendation {
    pub fn new(
        country: impl Into<String>,
        season: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            season: season.into(),
            recommendation: recommendation.into(),
        }
    }
}
