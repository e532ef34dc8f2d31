use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::chat::{ChatClient, ChatMessage, ChatRequest};
use crate::error::{ChatError, Result, StrategyError};
use crate::recommendation::TravelRecommendation;
use crate::strategy::{RecommendationStrategy, RECOMMENDATION_COUNT};

/// Persona and response contract for the chat model.
const SYSTEM_PROMPT: &str = "You are an expert travel advisor. \
    Given a country and a season, respond with exactly 3 recommended travel activities \
    as a JSON array of 3 strings. Respond with the JSON array only, no prose.";

/// Example exchanges prepended to every request to pin the output format.
/// Fixed for the process lifetime.
const FEW_SHOT_EXCHANGES: [(&str, &str); 2] = [
    (
        "France: summer",
        r#"["Cycle through the lavender fields of Provence", "Swim in the calanques near Marseille", "Watch the Bastille Day fireworks from the Champ de Mars"]"#,
    ),
    (
        "Japan: winter",
        r#"["Soak in an open-air onsen while snow falls in Hakone", "Ski the powder snow of Niseko", "See the illuminated snow sculptures at the Sapporo Snow Festival"]"#,
    ),
];

/// Configuration of [`ChatModelStrategy`], fixed after construction.
#[derive(Debug, Clone)]
pub struct ModelStrategyConfig {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Exact number of recommendations a response must contain.
    pub recommendation_count: usize,
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds.
    pub backoff_base: u64,
    /// Sampling temperature; output is non-deterministic by design.
    pub temperature: f64,
}

impl Default for ModelStrategyConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            recommendation_count: RECOMMENDATION_COUNT,
            max_retries: 3,
            backoff_base: 2,
            temperature: 0.8,
        }
    }
}

/// Strategy that asks a chat model for recommendations.
///
/// Builds a few-shot prompt, submits it through a [`ChatClient`], parses the
/// JSON array answer, and retries transient failures with exponential
/// backoff. A response with the wrong number of elements is treated exactly
/// like a parse failure: it consumes a retry, it is never truncated or
/// padded.
pub struct ChatModelStrategy {
    client: Arc<dyn ChatClient>,
    config: ModelStrategyConfig,
}

impl ChatModelStrategy {
    pub fn new(client: Arc<dyn ChatClient>, config: ModelStrategyConfig) -> Self {
        Self { client, config }
    }

    fn build_messages(&self, country: &str, season: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(FEW_SHOT_EXCHANGES.len() * 2 + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        for (example_input, example_answer) in FEW_SHOT_EXCHANGES {
            messages.push(ChatMessage::user(example_input));
            messages.push(ChatMessage::assistant(example_answer));
        }
        messages.push(ChatMessage::user(format!("{country}: {season}")));
        messages
    }

    fn parse_recommendations(
        &self,
        raw: &str,
        country: &str,
        season: &str,
    ) -> std::result::Result<Vec<TravelRecommendation>, ChatError> {
        // Models occasionally wrap the array in a Markdown code block.
        let trimmed = raw.trim();
        let trimmed = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        let cleaned = trimmed.strip_suffix("```").unwrap_or(trimmed).trim();

        let texts: Vec<String> = serde_json::from_str(cleaned)
            .map_err(|e| ChatError::Malformed(format!("expected a JSON array of strings: {e}")))?;

        if texts.len() != self.config.recommendation_count {
            return Err(ChatError::Malformed(format!(
                "expected {} recommendations, got {}",
                self.config.recommendation_count,
                texts.len()
            )));
        }

        Ok(texts
            .into_iter()
            .map(|text| TravelRecommendation::new(country, season, text))
            .collect())
    }

    async fn attempt(
        &self,
        country: &str,
        season: &str,
    ) -> std::result::Result<Vec<TravelRecommendation>, ChatError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(country, season),
            temperature: self.config.temperature,
        };
        let raw = self.client.complete(request).await?;
        self.parse_recommendations(&raw, country, season)
    }
}

/// Wait before 0-indexed retry `retry`: `base ^ retry` seconds.
fn backoff_delay(base: u64, retry: u32) -> Duration {
    Duration::from_secs(base.saturating_pow(retry))
}

#[async_trait]
impl RecommendationStrategy for ChatModelStrategy {
    async fn recommend(&self, country: &str, season: &str) -> Result<Vec<TravelRecommendation>> {
        let mut retry = 0;
        loop {
            debug!(
                "Requesting recommendations for {country}: {season} (attempt {} of {})",
                retry + 1,
                self.config.max_retries + 1
            );

            match self.attempt(country, season).await {
                Ok(records) => return Ok(records),
                Err(err) if err.is_transient() => {
                    if retry >= self.config.max_retries {
                        warn!("Giving up after {} attempts: {}", retry + 1, err);
                        return Err(StrategyError::Exhausted {
                            attempts: retry + 1,
                            source: err,
                        });
                    }
                    let delay = backoff_delay(self.config.backoff_base, retry);
                    warn!(
                        error = %err,
                        delay_secs = delay.as_secs(),
                        "Recommendation attempt failed, backing off before retry"
                    );
                    sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(StrategyError::Fatal(err)),
            }
        }
    }
}
