// Integration tests for Influencer Match

use async_trait::async_trait;
use influencer_match::core::{MatchContext, MatchError, Matcher, OutreachDrafter};
use influencer_match::models::{Candidate, MatchRequest};
use influencer_match::services::embedder::{normalize, EmbedError, Embedder};
use influencer_match::services::generator::{GenerateError, TextGenerator};
use influencer_match::services::{HashEmbedder, Roster};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const AXES: [&str; 5] = ["fitness", "running", "tech", "food", "travel"];

/// Embeds text as keyword counts over a handful of fixed axes
struct KeywordEmbedder;

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts
            .iter()
            .map(|text| {
                let text = text.to_lowercase();
                let mut vector: Vec<f32> = AXES.iter().map(|axis| text.matches(axis).count() as f32).collect();
                normalize(&mut vector);
                vector
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        AXES.len()
    }

    fn model_name(&self) -> &str {
        "keyword-axes"
    }
}

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let name = prompt
            .lines()
            .skip_while(|l| *l != "Influencer:")
            .nth(1)
            .unwrap_or_default()
            .trim_start_matches("Name: ")
            .to_string();
        Ok(format!("Generated pitch for {}", name))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

fn create_candidate(name: &str, followers: u64, platform: &str, category: &str, country: &str, tags: &str) -> Candidate {
    Candidate::new(
        name,
        format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        followers,
        platform,
        category,
        country,
        tags,
    )
}

fn create_roster() -> Roster {
    Roster::from_candidates(vec![
        create_candidate("Ava Lee", 20_000, "Instagram", "fitness", "USA", "#running #fitness"),
        create_candidate("Ben King", 80_000, "YouTube", "tech", "Germany", "#tech"),
        create_candidate("Cal Hall", 15_000, "Instagram", "food", "India", "#food #travel"),
        create_candidate("Dee Young", 500_000, "Instagram", "fitness", "UK", "#running #fitness"),
        create_candidate("Eli Green", 20_000, "Instagram", "fitness", "USA", "#running #fitness"),
        create_candidate("Fay Clark", 20_000, "TikTok", "travel", "Japan", "#travel"),
    ])
}

async fn create_context() -> MatchContext {
    MatchContext::build(create_roster(), &KeywordEmbedder, 4).await.unwrap()
}

fn create_matcher() -> Matcher {
    Matcher::with_default_weights(Arc::new(KeywordEmbedder), OutreachDrafter::template_only())
}

#[tokio::test]
async fn test_integration_end_to_end_matching() {
    let context = create_context().await;
    let request = MatchRequest::new("running shoes for fitness lovers").with_top_k(3);

    let results = create_matcher().find_matches(&context, &request).await.unwrap();

    assert_eq!(results.len(), 3);

    // All matches should be sorted by score
    for i in 1..results.len() {
        assert!(
            results[i - 1].fit_score >= results[i].fit_score,
            "Matches not sorted by score"
        );
    }

    // Fitness creators under the cap should lead
    assert_eq!(results[0].name, "Ava Lee");
    assert_eq!(results[1].name, "Dee Young");
    assert_eq!(results[2].name, "Eli Green");
}

#[tokio::test]
async fn test_result_count_is_min_of_top_k_and_matches() {
    let context = create_context().await;
    let matcher = create_matcher();

    for top_k in 1..=8 {
        let request = MatchRequest::new("fitness").with_platform("Instagram").with_top_k(top_k);
        let results = matcher.find_matches(&context, &request).await.unwrap();
        assert_eq!(results.len(), (top_k as usize).min(4));
    }
}

#[tokio::test]
async fn test_ties_keep_roster_order() {
    let roster = Roster::from_candidates(
        ["Zed", "Amy", "Mo", "Kit"]
            .iter()
            .map(|name| create_candidate(name, 10_000, "YouTube", "tech", "Canada", "#tech"))
            .collect(),
    );
    let context = MatchContext::build(roster, &KeywordEmbedder, 64).await.unwrap();

    let results = create_matcher()
        .find_matches(&context, &MatchRequest::new("tech review").with_top_k(4))
        .await
        .unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Amy", "Mo", "Kit"]);
    assert!(results.windows(2).all(|w| w[0].fit_score == w[1].fit_score));
}

#[tokio::test]
async fn test_fit_score_reconstructs_from_subscores() {
    let context = create_context().await;
    let request = MatchRequest::new("travel food and fitness")
        .with_max_audience_size(Some(50_000))
        .with_top_k(10);

    let results = create_matcher().find_matches(&context, &request).await.unwrap();

    assert_eq!(results.len(), 6);
    for r in &results {
        let expected = 0.75 * r.subscores.relevance + 0.25 * r.subscores.audience_fit;
        assert!(
            (r.fit_score - expected).abs() <= 0.02,
            "{}: fit {} vs reconstructed {}",
            r.name,
            r.fit_score,
            expected
        );
        assert!((0.0..=100.0).contains(&r.fit_score));
    }
}

#[tokio::test]
async fn test_audience_fit_bounds() {
    let context = create_context().await;
    let request = MatchRequest::new("fitness")
        .with_category("fitness")
        .with_max_audience_size(Some(50_000))
        .with_top_k(10);

    let results = create_matcher().find_matches(&context, &request).await.unwrap();

    for r in &results {
        match r.name.as_str() {
            // 500k is ten times the cap
            "Dee Young" => assert_eq!(r.subscores.audience_fit, 10.0),
            _ => assert_eq!(r.subscores.audience_fit, 100.0),
        }
    }
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let context = create_context().await;
    let request = MatchRequest::new("tech")
        .with_group_region("North America")
        .with_platform("Instagram")
        .with_category("fitness")
        .with_top_k(10);

    let results = create_matcher().find_matches(&context, &request).await.unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ava Lee", "Eli Green"]);
    for r in &results {
        assert_eq!(r.group_region.as_str(), "North America");
        assert_eq!(r.platform, "Instagram");
        assert_eq!(r.category, "fitness");
    }
}

#[tokio::test]
async fn test_invalid_requests_fail_without_results() {
    let context = create_context().await;
    let matcher = create_matcher();

    let empty = matcher.find_matches(&context, &MatchRequest::new("")).await;
    assert!(matches!(empty, Err(MatchError::Validation(_))));

    let zero = matcher
        .find_matches(&context, &MatchRequest::new("fitness").with_top_k(0))
        .await;
    assert!(matches!(zero, Err(MatchError::Validation(_))));

    let negative = matcher
        .find_matches(&context, &MatchRequest::new("fitness").with_top_k(-3))
        .await;
    assert!(matches!(negative, Err(MatchError::Validation(_))));
}

#[tokio::test]
async fn test_fallback_outreach_example() {
    let roster = Roster::from_candidates(vec![create_candidate(
        "Jane Doe", 25_000, "Instagram", "fitness", "USA", "#fitness",
    )]);
    let context = MatchContext::build(roster, &KeywordEmbedder, 64).await.unwrap();

    let results = create_matcher()
        .find_matches(&context, &MatchRequest::new("promote running shoes"))
        .await
        .unwrap();

    let message = &results[0].outreach_message;
    assert!(message.contains("Jane Doe"));
    assert!(message.contains("fitness"));
    assert!(message.contains("Instagram"));
    assert!(message.contains("[Your Name]"));
    assert!(message.contains("[Your Company]"));
}

#[tokio::test]
async fn test_fallback_outreach_signed_by_sender() {
    let context = create_context().await;
    let request = MatchRequest::new("fitness running")
        .with_category("fitness")
        .with_sender("Sam Ortiz", "Stride Labs")
        .with_top_k(3);

    let results = create_matcher().find_matches(&context, &request).await.unwrap();

    assert_eq!(results.len(), 3);
    for r in &results {
        assert!(r.outreach_message.starts_with(&format!("Hi {},", r.name)));
        assert!(r.outreach_message.contains("I'm Sam Ortiz from Stride Labs"));
        assert!(r.outreach_message.ends_with("Sam Ortiz\nStride Labs"));
        assert!(!r.outreach_message.contains("[Your Name]"));
    }
}

#[tokio::test]
async fn test_generated_outreach_follows_ranking() {
    let context = create_context().await;
    let drafter = OutreachDrafter::new(Some(Arc::new(EchoGenerator)), Duration::from_secs(1));
    let matcher = Matcher::with_default_weights(Arc::new(KeywordEmbedder), drafter)
        .with_outreach_concurrency(3);

    let results = matcher
        .find_matches(&context, &MatchRequest::new("fitness running").with_top_k(6))
        .await
        .unwrap();

    for r in &results {
        assert_eq!(r.outreach_message, format!("Generated pitch for {}", r.name));
    }
}

#[tokio::test]
async fn test_roster_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "person_name,email,followers,platform,category,country,hashtags").unwrap();
    for i in 0..25 {
        writeln!(
            file,
            "Person {i},person{i}@mail.com,{},Instagram,food,Spain,#food #influencer",
            10_000 + i * 100
        )
        .unwrap();
    }
    file.flush().unwrap();

    let roster = Roster::load(file.path()).unwrap();
    assert_eq!(roster.len(), 25);

    let context = MatchContext::build(roster, &HashEmbedder::new(64), 10).await.unwrap();
    assert_eq!(context.roster().len(), 25);
    assert_eq!(context.index().len(), 25);
    assert_eq!(context.metadata().group_regions.iter().collect::<Vec<_>>(), vec!["Europe"]);
}
