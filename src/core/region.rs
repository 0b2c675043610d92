use serde::{Deserialize, Serialize};
use std::fmt;

/// Continent-level grouping derived from a candidate's country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupRegion {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Europe,
    Asia,
    Oceania,
    Africa,
    Other,
}

impl GroupRegion {
    pub const ALL: [GroupRegion; 7] = [
        GroupRegion::NorthAmerica,
        GroupRegion::SouthAmerica,
        GroupRegion::Europe,
        GroupRegion::Asia,
        GroupRegion::Oceania,
        GroupRegion::Africa,
        GroupRegion::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRegion::NorthAmerica => "North America",
            GroupRegion::SouthAmerica => "South America",
            GroupRegion::Europe => "Europe",
            GroupRegion::Asia => "Asia",
            GroupRegion::Oceania => "Oceania",
            GroupRegion::Africa => "Africa",
            GroupRegion::Other => "Other",
        }
    }
}

impl fmt::Display for GroupRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased country names and their group region
const COUNTRY_TABLE: &[(&str, GroupRegion)] = &[
    ("usa", GroupRegion::NorthAmerica),
    ("united states", GroupRegion::NorthAmerica),
    ("canada", GroupRegion::NorthAmerica),
    ("mexico", GroupRegion::NorthAmerica),
    ("brazil", GroupRegion::SouthAmerica),
    ("argentina", GroupRegion::SouthAmerica),
    ("chile", GroupRegion::SouthAmerica),
    ("colombia", GroupRegion::SouthAmerica),
    ("peru", GroupRegion::SouthAmerica),
    ("uk", GroupRegion::Europe),
    ("united kingdom", GroupRegion::Europe),
    ("england", GroupRegion::Europe),
    ("ireland", GroupRegion::Europe),
    ("france", GroupRegion::Europe),
    ("germany", GroupRegion::Europe),
    ("italy", GroupRegion::Europe),
    ("spain", GroupRegion::Europe),
    ("netherlands", GroupRegion::Europe),
    ("belgium", GroupRegion::Europe),
    ("portugal", GroupRegion::Europe),
    ("sweden", GroupRegion::Europe),
    ("norway", GroupRegion::Europe),
    ("denmark", GroupRegion::Europe),
    ("poland", GroupRegion::Europe),
    ("india", GroupRegion::Asia),
    ("japan", GroupRegion::Asia),
    ("singapore", GroupRegion::Asia),
    ("uae", GroupRegion::Asia),
    ("united arab emirates", GroupRegion::Asia),
    ("china", GroupRegion::Asia),
    ("south korea", GroupRegion::Asia),
    ("indonesia", GroupRegion::Asia),
    ("malaysia", GroupRegion::Asia),
    ("australia", GroupRegion::Oceania),
    ("new zealand", GroupRegion::Oceania),
    ("south africa", GroupRegion::Africa),
    ("nigeria", GroupRegion::Africa),
    ("egypt", GroupRegion::Africa),
    ("kenya", GroupRegion::Africa),
    ("morocco", GroupRegion::Africa),
];

/// Map a free-text country to its group region.
///
/// Matching is case-insensitive after trimming; anything not in the table is `Other`.
#[inline]
pub fn country_to_group_region(country: &str) -> GroupRegion {
    let key = country.trim().to_lowercase();
    COUNTRY_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, region)| *region)
        .unwrap_or(GroupRegion::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_countries() {
        assert_eq!(country_to_group_region("USA"), GroupRegion::NorthAmerica);
        assert_eq!(country_to_group_region("Germany"), GroupRegion::Europe);
        assert_eq!(country_to_group_region("India"), GroupRegion::Asia);
        assert_eq!(country_to_group_region("Brazil"), GroupRegion::SouthAmerica);
        assert_eq!(country_to_group_region("New Zealand"), GroupRegion::Oceania);
        assert_eq!(country_to_group_region("Kenya"), GroupRegion::Africa);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(country_to_group_region("  united KINGDOM "), GroupRegion::Europe);
        assert_eq!(country_to_group_region("uae"), GroupRegion::Asia);
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(country_to_group_region("Atlantis"), GroupRegion::Other);
        assert_eq!(country_to_group_region(""), GroupRegion::Other);
    }

    #[test]
    fn test_display_matches_serde() {
        for region in GroupRegion::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region));
        }
    }
}
