use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank the roster against a campaign brief
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    pub brief: String,
    #[serde(default, alias = "group_region", rename = "continent")]
    pub group_region: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// `None` or a non-positive value disables the audience cap
    #[serde(default = "default_max_audience_size", alias = "max_audience_size", rename = "max_followers")]
    pub max_audience_size: Option<i64>,
    #[validate(range(min = 1))]
    #[serde(default = "default_top_k")]
    pub top_k: i64,
    #[serde(default, alias = "sender_name", rename = "user_name")]
    pub sender_name: Option<String>,
    #[serde(default, alias = "sender_company", rename = "company_name")]
    pub sender_company: Option<String>,
}

pub const DEFAULT_MAX_AUDIENCE_SIZE: i64 = 1_000_000;
pub const DEFAULT_TOP_K: i64 = 5;

fn default_max_audience_size() -> Option<i64> {
    Some(DEFAULT_MAX_AUDIENCE_SIZE)
}

fn default_top_k() -> i64 {
    DEFAULT_TOP_K
}

impl MatchRequest {
    /// A request with no filters and default cap / top_k
    pub fn new(brief: impl Into<String>) -> Self {
        Self {
            brief: brief.into(),
            group_region: None,
            platform: None,
            category: None,
            max_audience_size: default_max_audience_size(),
            top_k: DEFAULT_TOP_K,
            sender_name: None,
            sender_company: None,
        }
    }

    pub fn with_top_k(mut self, top_k: i64) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_max_audience_size(mut self, cap: Option<i64>) -> Self {
        self.max_audience_size = cap;
        self
    }

    pub fn with_group_region(mut self, group_region: impl Into<String>) -> Self {
        self.group_region = Some(group_region.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sender(mut self, name: impl Into<String>, company: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self.sender_company = Some(company.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let req: MatchRequest = serde_json::from_str(r#"{"brief": "vegan snacks"}"#).unwrap();
        assert_eq!(req.top_k, 5);
        assert_eq!(req.max_audience_size, Some(1_000_000));
        assert!(req.group_region.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_explicit_null_cap_disables_it() {
        let req: MatchRequest =
            serde_json::from_str(r#"{"brief": "x", "max_followers": null}"#).unwrap();
        assert_eq!(req.max_audience_size, None);
    }

    #[test]
    fn test_aliases() {
        let req: MatchRequest = serde_json::from_str(
            r#"{"brief": "x", "group_region": "Europe", "max_audience_size": 10, "sender_name": "Ana"}"#,
        )
        .unwrap();
        assert_eq!(req.group_region.as_deref(), Some("Europe"));
        assert_eq!(req.max_audience_size, Some(10));
        assert_eq!(req.sender_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_validation_rejects_zero_top_k() {
        let req = MatchRequest::new("x").with_top_k(0);
        assert!(req.validate().is_err());
    }
}
