use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn, Level};
use travel_recommendation::{
    ChatModelStrategy, CountryResolver, ModelStrategyConfig, OpenAiChatClient,
    RecommendationStrategy, StaticStrategy, TravelRecommender,
};

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Season {
    Fall,
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    fn as_str(self) -> &'static str {
        match self {
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendParams {
    country: String,
    season: Season,
}

#[derive(Debug, Serialize)]
struct RecommendResponse {
    country: String,
    season: String,
    recommendations: Vec<String>,
}

#[derive(Clone)]
struct AppState {
    recommender: Arc<TravelRecommender>,
    resolver: CountryResolver,
}

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Travel Recommendation Service",
        "endpoints": {
            "GET /recommend": "Recommend three travel activities for a country and season",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn recommend(
    Query(params): Query<RecommendParams>,
    State(state): State<AppState>,
) -> Result<Json<RecommendResponse>, ApiError> {
    info!(
        "Received recommendation request: {} / {}",
        params.country,
        params.season.as_str()
    );

    let country = state.resolver.resolve(&params.country).map_err(|e| {
        info!("Could not resolve country: {}", e);
        bad_request_error(&e.to_string())
    })?;

    let records = state
        .recommender
        .recommend(&country, params.season.as_str())
        .await
        .map_err(|e| {
            error!("Recommendation strategy failed: {}", e);
            internal_error(&e.to_string())
        })?;

    Ok(Json(RecommendResponse {
        country,
        season: params.season.as_str().to_string(),
        recommendations: records.into_iter().map(|r| r.recommendation).collect(),
    }))
}

fn build_strategy() -> Arc<dyn RecommendationStrategy> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(api_key) => match OpenAiChatClient::new(api_key) {
            Ok(client) => {
                let mut config = ModelStrategyConfig::default();
                if let Ok(model) = std::env::var("OPENAI_MODEL") {
                    config.model = model;
                }
                info!("Using chat model strategy with model {}", config.model);
                Arc::new(ChatModelStrategy::new(Arc::new(client), config))
            }
            Err(e) => {
                warn!(
                    "Failed to build chat client ({}), falling back to canned recommendations",
                    e
                );
                Arc::new(StaticStrategy)
            }
        },
        Err(_) => {
            warn!("OPENAI_API_KEY not set, falling back to canned recommendations");
            Arc::new(StaticStrategy)
        }
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/recommend", get(recommend))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .compact()
        .init();

    info!("Starting travel recommendation service");

    let state = AppState {
        recommender: Arc::new(TravelRecommender::new(build_strategy())),
        resolver: CountryResolver::new(),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Server running on http://0.0.0.0:3000");
    info!("Available endpoints:");
    info!("  GET  /           - Service info");
    info!("  GET  /health     - Health check");
    info!("  GET  /recommend  - Recommend travel activities");
    info!("    Example: GET /recommend?country=France&season=summer");

    axum::serve(listener, app).await?;

    Ok(())
}
