use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::{
    context::MatchContext,
    filters::{matches_filters, validate_filters, MatchFilters},
    outreach::OutreachDrafter,
    scoring::{rank_scored, score_candidate},
};
use crate::models::{MatchRequest, MatchResult, ScoredCandidate, ScoringWeights, SenderIdentity};
use crate::services::embedder::{EmbedError, Embedder};

/// Request-level failures
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbedError),
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Exact-match attribute filtering
/// 2. Brief embedding (once per request)
/// 3. Relevance and audience-fit scoring
/// 4. Stable ranking and truncation to top_k
/// 5. Outreach drafting for the selected candidates
#[derive(Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    embedder: Arc<dyn Embedder>,
    drafter: OutreachDrafter,
    embed_timeout: Duration,
    outreach_concurrency: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, embedder: Arc<dyn Embedder>, drafter: OutreachDrafter) -> Self {
        Self {
            weights,
            embedder,
            drafter,
            embed_timeout: Duration::from_secs(30),
            outreach_concurrency: 4,
        }
    }

    pub fn with_default_weights(embedder: Arc<dyn Embedder>, drafter: OutreachDrafter) -> Self {
        Self::new(ScoringWeights::default(), embedder, drafter)
    }

    pub fn with_embed_timeout(mut self, timeout: Duration) -> Self {
        self.embed_timeout = timeout;
        self
    }

    pub fn with_outreach_concurrency(mut self, concurrency: usize) -> Self {
        self.outreach_concurrency = concurrency.max(1);
        self
    }

    pub fn drafter(&self) -> &OutreachDrafter {
        &self.drafter
    }

    /// Rank the roster against a brief and draft outreach for the top results
    ///
    /// Returns at most `min(top_k, passing candidates)` results ordered by fit
    /// score, with ties in roster order. An empty vector means no candidate
    /// passed the filters.
    pub async fn find_matches(
        &self,
        context: &MatchContext,
        request: &MatchRequest,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let brief = request.brief.trim();
        if brief.is_empty() {
            return Err(MatchError::Validation("Brief is required.".to_string()));
        }
        if request.top_k < 1 {
            return Err(MatchError::Validation(format!(
                "top_k must be at least 1, got {}",
                request.top_k
            )));
        }

        let filters = MatchFilters::from_request(request);
        validate_filters(&filters, context.metadata()).map_err(MatchError::Validation)?;

        // Stage 1: filter mask
        let passing = filter_candidates(context, &filters);
        if passing.is_empty() {
            tracing::debug!("No candidates passed filters {:?}", filters);
            return Ok(Vec::new());
        }

        // Stage 2: embed the brief
        let brief_vector = self.embed_brief(brief).await?;
        if brief_vector.len() != context.index().dimension() {
            return Err(EmbedError::DimensionMismatch {
                expected: context.index().dimension(),
                actual: brief_vector.len(),
            }
            .into());
        }

        // Stages 3 & 4: score, rank, truncate
        let top_k = usize::try_from(request.top_k).unwrap_or(usize::MAX).min(passing.len());
        let ranked = self.rank(context, &passing, &brief_vector, request.max_audience_size, top_k);

        tracing::debug!(
            "Ranked {} of {} candidates, returning {}",
            passing.len(),
            context.roster().len(),
            ranked.len()
        );

        // Stage 5: draft outreach; `buffered` keeps the ranking order
        let sender = SenderIdentity::from_options(
            request.sender_name.as_deref(),
            request.sender_company.as_deref(),
        );

        let results = stream::iter(ranked.into_iter().filter_map(|scored| {
            context
                .roster()
                .get(scored.roster_index)
                .map(|candidate| (candidate, scored))
        }))
        .map(|(candidate, scored)| {
            let sender = &sender;
            async move {
                let message = self.drafter.draft(brief, candidate, sender).await;
                MatchResult::from_scored(candidate, &scored, message)
            }
        })
        .buffered(self.outreach_concurrency)
        .collect::<Vec<_>>()
        .await;

        Ok(results)
    }

    /// Score the given roster positions and keep the best `top_k`
    pub fn rank(
        &self,
        context: &MatchContext,
        positions: &[usize],
        brief_vector: &[f32],
        max_audience_size: Option<i64>,
        top_k: usize,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = positions
            .iter()
            .filter_map(|&i| {
                let candidate = context.roster().get(i)?;
                let vector = context.index().get(i)?;
                Some(score_candidate(
                    i,
                    vector,
                    brief_vector,
                    candidate.audience_size,
                    max_audience_size,
                    &self.weights,
                ))
            })
            .collect();

        rank_scored(&mut scored);
        scored.truncate(top_k);
        scored
    }

    async fn embed_brief(&self, brief: &str) -> Result<Vec<f32>, EmbedError> {
        tokio::time::timeout(self.embed_timeout, self.embedder.embed(brief))
            .await
            .map_err(|_| EmbedError::Timeout(self.embed_timeout))?
    }
}

/// Roster positions passing every set filter, in roster order
pub fn filter_candidates(context: &MatchContext, filters: &MatchFilters) -> Vec<usize> {
    context
        .roster()
        .iter()
        .enumerate()
        .filter(|(_, candidate)| matches_filters(candidate, filters))
        .map(|(i, _)| i)
        .collect()
}
