use thiserror::Error;

use crate::core::metadata::{describe, RosterMetadata};
use crate::services::embedder::{EmbedError, Embedder};
use crate::services::Roster;

/// Errors while building the process-wide match context
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to embed roster: {0}")]
    Embedding(#[from] EmbedError),

    #[error("Embedding index has {index} vectors for {roster} roster rows")]
    IndexMismatch { roster: usize, index: usize },
}

/// Unit vectors parallel to the roster, one per candidate
#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

impl EmbeddingIndex {
    pub fn new(vectors: Vec<Vec<f32>>, dimension: usize) -> Result<Self, EmbedError> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(EmbedError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }
        Ok(Self { vectors, dimension })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, index: usize) -> Option<&[f32]> {
        self.vectors.get(index).map(Vec::as_slice)
    }
}

/// Read-only roster, embeddings and metadata shared by every request
#[derive(Debug, Clone)]
pub struct MatchContext {
    roster: Roster,
    index: EmbeddingIndex,
    metadata: RosterMetadata,
    model: String,
}

impl MatchContext {
    /// Embed every roster row (in batches) and assemble the context
    pub async fn build(
        roster: Roster,
        embedder: &dyn Embedder,
        batch_size: usize,
    ) -> Result<Self, ContextError> {
        let texts: Vec<String> = roster.iter().map(|c| c.embedding_text()).collect();
        let mut vectors = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(batch_size.max(1)) {
            vectors.extend(embedder.embed_batch(chunk).await?);
        }

        tracing::debug!("Embedded {} roster rows with {}", vectors.len(), embedder.model_name());

        let index = EmbeddingIndex::new(vectors, embedder.dimension())?;
        Self::from_parts(roster, index, embedder.model_name())
    }

    pub fn from_parts(roster: Roster, index: EmbeddingIndex, model: &str) -> Result<Self, ContextError> {
        if roster.len() != index.len() {
            return Err(ContextError::IndexMismatch {
                roster: roster.len(),
                index: index.len(),
            });
        }

        let metadata = describe(&roster);

        Ok(Self {
            roster,
            index,
            metadata,
            model: model.to_string(),
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn index(&self) -> &EmbeddingIndex {
        &self.index
    }

    pub fn metadata(&self) -> &RosterMetadata {
        &self.metadata
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
