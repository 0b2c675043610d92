use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::services::Roster;

/// Distinct filter values and audience bounds for populating UI controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMetadata {
    pub platforms: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    #[serde(rename = "continents")]
    pub group_regions: BTreeSet<String>,
    #[serde(rename = "follower_min")]
    pub audience_min: u64,
    #[serde(rename = "follower_max")]
    pub audience_max: u64,
}

/// Scan the roster once and collect its metadata
///
/// An empty roster yields empty sets and zero bounds.
pub fn describe(roster: &Roster) -> RosterMetadata {
    let mut metadata = RosterMetadata::default();
    let mut bounds: Option<(u64, u64)> = None;

    for candidate in roster.iter() {
        metadata.platforms.insert(candidate.platform.clone());
        metadata.categories.insert(candidate.category.clone());
        metadata.group_regions.insert(candidate.group_region.to_string());

        let size = candidate.audience_size;
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(size), max.max(size)),
            None => (size, size),
        });
    }

    if let Some((min, max)) = bounds {
        metadata.audience_min = min;
        metadata.audience_max = max;
    }

    metadata
}
