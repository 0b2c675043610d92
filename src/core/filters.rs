use crate::core::metadata::RosterMetadata;
use crate::models::{Candidate, MatchRequest};

/// Exact-match attribute filters; `None` passes everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilters {
    pub group_region: Option<String>,
    pub platform: Option<String>,
    pub category: Option<String>,
}

impl MatchFilters {
    /// Blank filter values are treated as unset
    pub fn from_request(request: &MatchRequest) -> Self {
        fn set(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
        }

        Self {
            group_region: set(&request.group_region),
            platform: set(&request.platform),
            category: set(&request.category),
        }
    }
}

/// Check if a candidate passes every set filter
///
/// Comparison is exact and case-sensitive.
#[inline]
pub fn matches_filters(candidate: &Candidate, filters: &MatchFilters) -> bool {
    if let Some(region) = &filters.group_region {
        if candidate.group_region.as_str() != region {
            return false;
        }
    }

    if let Some(platform) = &filters.platform {
        if &candidate.platform != platform {
            return false;
        }
    }

    if let Some(category) = &filters.category {
        if &candidate.category != category {
            return false;
        }
    }

    true
}

/// Reject filter values that no roster row carries
pub fn validate_filters(filters: &MatchFilters, metadata: &RosterMetadata) -> Result<(), String> {
    let checks = [
        ("continent", &filters.group_region, &metadata.group_regions),
        ("platform", &filters.platform, &metadata.platforms),
        ("category", &filters.category, &metadata.categories),
    ];

    for (field, value, known) in checks {
        if let Some(value) = value {
            if !known.contains(value) {
                return Err(format!("Unknown {} filter value: {}", field, value));
            }
        }
    }

    Ok(())
}
