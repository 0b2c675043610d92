// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, MatchResult, ScoredCandidate, ScoringWeights, SenderIdentity, Subscores};
pub use requests::MatchRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchResponse};
