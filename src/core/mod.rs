// Core algorithm exports
pub mod context;
pub mod filters;
pub mod matcher;
pub mod metadata;
pub mod outreach;
pub mod region;
pub mod scoring;

pub use context::{ContextError, EmbeddingIndex, MatchContext};
pub use filters::{matches_filters, validate_filters, MatchFilters};
pub use matcher::{filter_candidates, MatchError, Matcher};
pub use metadata::{describe, RosterMetadata};
pub use outreach::{build_prompt, fallback_message, OutreachDrafter};
pub use region::{country_to_group_region, GroupRegion};
pub use scoring::{blend, calculate_audience_fit, calculate_relevance, rank_scored, score_candidate};
