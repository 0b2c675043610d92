use crate::models::{ScoredCandidate, ScoringWeights};
use crate::services::embedder::dot;

/// Lower bound for the audience fit of an oversized candidate
pub const MIN_AUDIENCE_FIT: f64 = 0.1;
/// Upper bound for the audience fit
pub const MAX_AUDIENCE_FIT: f64 = 1.0;

/// Relevance of a candidate to the brief (0-1)
///
/// Both vectors are unit-normalized, so the dot product is the cosine
/// similarity. Negative similarities are treated as no relevance.
#[inline]
pub fn calculate_relevance(candidate_vector: &[f32], brief_vector: &[f32]) -> f64 {
    (dot(candidate_vector, brief_vector) as f64).clamp(0.0, 1.0)
}

/// Audience-size fit (0.1-1)
///
/// Candidates at or under the cap score 1.0. Above it the score is
/// `cap / audience_size` clamped to [0.1, 1.0]. A missing or non-positive cap
/// and an empty audience both score 1.0.
#[inline]
pub fn calculate_audience_fit(audience_size: u64, max_audience_size: Option<i64>) -> f64 {
    let cap = match max_audience_size {
        Some(cap) if cap > 0 => cap as f64,
        _ => return MAX_AUDIENCE_FIT,
    };

    if audience_size == 0 {
        return MAX_AUDIENCE_FIT;
    }

    let audience = audience_size as f64;
    if audience <= cap {
        MAX_AUDIENCE_FIT
    } else {
        (cap / audience).clamp(MIN_AUDIENCE_FIT, MAX_AUDIENCE_FIT)
    }
}

/// Blend relevance and audience fit into a single score (0-1)
///
/// score = relevance * 0.75 + audience_fit * 0.25 with the default weights
#[inline]
pub fn blend(relevance: f64, audience_fit: f64, weights: &ScoringWeights) -> f64 {
    relevance * weights.relevance + audience_fit * weights.audience
}

/// Score one candidate against a brief
pub fn score_candidate(
    roster_index: usize,
    candidate_vector: &[f32],
    brief_vector: &[f32],
    audience_size: u64,
    max_audience_size: Option<i64>,
    weights: &ScoringWeights,
) -> ScoredCandidate {
    let relevance = calculate_relevance(candidate_vector, brief_vector);
    let audience_fit = calculate_audience_fit(audience_size, max_audience_size);

    ScoredCandidate {
        roster_index,
        relevance,
        audience_fit,
        fit: blend(relevance, audience_fit, weights),
    }
}

/// Order by fit descending; equal scores keep roster order
pub fn rank_scored(scored: &mut [ScoredCandidate]) {
    // sort_by is stable, so the roster order of ties survives
    scored.sort_by(|a, b| b.fit.total_cmp(&a.fit));
}
