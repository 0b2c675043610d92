use serde::{Deserialize, Serialize};

use crate::core::region::{country_to_group_region, GroupRegion};

/// One row of the influencer roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "person_name")]
    pub name: String,
    #[serde(rename = "email")]
    pub contact: String,
    #[serde(rename = "followers")]
    pub audience_size: u64,
    pub platform: String,
    pub category: String,
    #[serde(rename = "country")]
    pub region: String,
    #[serde(rename = "continent")]
    pub group_region: GroupRegion,
    #[serde(rename = "hashtags")]
    pub tags: String,
}

impl Candidate {
    /// Build a candidate, deriving `group_region` from `region`
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        audience_size: u64,
        platform: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        let region = region.into();
        let group_region = country_to_group_region(&region);
        Self {
            name: name.into(),
            contact: contact.into(),
            audience_size,
            platform: platform.into(),
            category: category.into(),
            region,
            group_region,
            tags: tags.into(),
        }
    }

    /// Text submitted to the embedder for this candidate
    pub fn embedding_text(&self) -> String {
        format!("{} {} {}", self.category, self.tags, self.platform)
    }
}

/// Intermediate ranking entry, referencing the roster by position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub roster_index: usize,
    /// Cosine similarity against the brief, clamped to [0, 1]
    pub relevance: f64,
    /// Audience-size fit in [0.1, 1]
    pub audience_fit: f64,
    /// Blended score in [0, 1]
    pub fit: f64,
}

/// Percentage subscores reported alongside the fit score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subscores {
    pub relevance: f64,
    #[serde(rename = "follower_fit")]
    pub audience_fit: f64,
}

/// A ranked match returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "person_name")]
    pub name: String,
    #[serde(rename = "email")]
    pub contact: String,
    pub platform: String,
    #[serde(rename = "followers")]
    pub audience_size: u64,
    #[serde(rename = "country")]
    pub region: String,
    #[serde(rename = "continent")]
    pub group_region: GroupRegion,
    pub category: String,
    #[serde(rename = "hashtags")]
    pub tags: String,
    pub fit_score: f64,
    pub subscores: Subscores,
    pub outreach_message: String,
}

impl MatchResult {
    pub fn from_scored(candidate: &Candidate, scored: &ScoredCandidate, outreach_message: String) -> Self {
        Self {
            name: candidate.name.clone(),
            contact: candidate.contact.clone(),
            platform: candidate.platform.clone(),
            audience_size: candidate.audience_size,
            region: candidate.region.clone(),
            group_region: candidate.group_region,
            category: candidate.category.clone(),
            tags: candidate.tags.clone(),
            fit_score: round2(scored.fit * 100.0),
            subscores: Subscores {
                relevance: round2(scored.relevance * 100.0),
                audience_fit: round2(scored.audience_fit * 100.0),
            },
            outreach_message,
        }
    }
}

/// Who the outreach message is signed by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub name: String,
    pub company: String,
}

pub const PLACEHOLDER_SENDER_NAME: &str = "[Your Name]";
pub const PLACEHOLDER_SENDER_COMPANY: &str = "[Your Company]";

impl SenderIdentity {
    /// Blank or missing values fall back to bracketed placeholders
    pub fn from_options(name: Option<&str>, company: Option<&str>) -> Self {
        fn pick(value: Option<&str>, placeholder: &str) -> String {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => placeholder.to_string(),
            }
        }

        Self {
            name: pick(name, PLACEHOLDER_SENDER_NAME),
            company: pick(company, PLACEHOLDER_SENDER_COMPANY),
        }
    }
}

impl Default for SenderIdentity {
    fn default() -> Self {
        Self::from_options(None, None)
    }
}

/// Blend weights for the fit score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub relevance: f64,
    pub audience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            relevance: 0.75,
            audience: 0.25,
        }
    }
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
