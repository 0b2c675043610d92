use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

pub const NO_MATCHES_EXPLANATION: &str = "No influencers found for those filters.";
pub const RANKED_EXPLANATION: &str = "Ranked by semantic relevance + follower fit.";

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
    pub explanations: String,
    pub request_id: String,
}

impl MatchResponse {
    pub fn new(matches: Vec<MatchResult>) -> Self {
        let explanations = if matches.is_empty() {
            NO_MATCHES_EXPLANATION
        } else {
            RANKED_EXPLANATION
        };

        Self {
            matches,
            explanations: explanations.to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rows: usize,
    pub dataset: String,
    pub embeddings_shape: [usize; 2],
    pub model: String,
    pub generation_enabled: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
