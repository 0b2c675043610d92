//! Influencer Match - campaign brief to influencer matching service
//!
//! This library ranks a fixed influencer roster against a free-text campaign
//! brief, blending semantic relevance with audience-size fit, and drafts a
//! short outreach message for every match.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{describe, GroupRegion, MatchContext, MatchError, Matcher, OutreachDrafter, RosterMetadata};
pub use crate::models::{Candidate, MatchRequest, MatchResponse, MatchResult, ScoringWeights, SenderIdentity};
pub use crate::services::{Embedder, HashEmbedder, Roster, TextGenerator};
