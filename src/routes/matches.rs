use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{MatchContext, MatchError, Matcher};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, MatchResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<MatchContext>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/meta", web::get().to(meta))
        .route("/match", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let context = &state.context;

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rows: context.roster().len(),
        dataset: context.roster().source().to_string(),
        embeddings_shape: [context.index().len(), context.index().dimension()],
        model: context.model().to_string(),
        generation_enabled: state.matcher.drafter().generation_enabled(),
        timestamp: chrono::Utc::now(),
    })
}

/// Distinct filter values and follower bounds
///
/// GET /api/v1/meta
async fn meta(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.context.metadata())
}

/// Find matches endpoint
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "brief": "string",
///   "continent": "Europe",
///   "platform": "Instagram",
///   "category": "fitness",
///   "max_followers": 1000000,
///   "top_k": 5,
///   "user_name": "string",
///   "company_name": "string"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Matching brief ({} chars), top_k: {}, filters: continent={:?} platform={:?} category={:?}",
        req.brief.len(),
        req.top_k,
        req.group_region,
        req.platform,
        req.category
    );

    match state.matcher.find_matches(&state.context, &req).await {
        Ok(matches) => {
            let response = MatchResponse::new(matches);
            tracing::info!(
                "Returning {} matches (request {})",
                response.matches.len(),
                response.request_id
            );
            HttpResponse::Ok().json(response)
        }
        Err(MatchError::Validation(message)) => {
            tracing::info!("Rejected match request: {}", message);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message,
                status_code: 400,
            })
        }
        Err(MatchError::Embedding(e)) => {
            tracing::error!("Failed to embed brief: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Embedding failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutreachDrafter;
    use crate::models::Candidate;
    use crate::services::embedder::{EmbedError, Embedder};
    use crate::services::{HashEmbedder, Roster};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;

    struct UnavailableEmbedder;

    #[async_trait]
    impl Embedder for UnavailableEmbedder {
        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Err(EmbedError::Api("503 Service Unavailable".into()))
        }

        fn dimension(&self) -> usize {
            64
        }

        fn model_name(&self) -> &str {
            "unavailable"
        }
    }

    async fn create_state() -> AppState {
        let roster = Roster::from_candidates(vec![
            Candidate::new("Jane Doe", "jane@x.io", 40_000, "Instagram", "fitness", "USA", "#fitness"),
            Candidate::new("Raj Patel", "raj@x.io", 90_000, "YouTube", "tech", "India", "#tech"),
        ]);
        let embedder = Arc::new(HashEmbedder::new(64));
        let context = MatchContext::build(roster, embedder.as_ref(), 64).await.unwrap();

        AppState {
            context: Arc::new(context),
            matcher: Matcher::with_default_weights(embedder, OutreachDrafter::template_only()),
        }
    }

    #[actix_web::test]
    async fn test_match_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state().await))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/match")
            .set_json(serde_json::json!({"brief": "fitness gear", "top_k": 1}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["matches"].as_array().unwrap().len(), 1);
        assert_eq!(body["explanations"], "Ranked by semantic relevance + follower fit.");
        assert!(body["matches"][0]["outreach_message"].as_str().unwrap().contains("[Your Name]"));
    }

    #[actix_web::test]
    async fn test_match_rejects_blank_brief() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state().await))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/match")
            .set_json(serde_json::json!({"brief": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_match_embedding_failure_is_bad_gateway() {
        let mut state = create_state().await;
        state.matcher = Matcher::with_default_weights(Arc::new(UnavailableEmbedder), OutreachDrafter::template_only());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/match")
            .set_json(serde_json::json!({"brief": "fitness gear"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Embedding failed");
        assert_eq!(body["status_code"], 502);
    }

    #[actix_web::test]
    async fn test_meta_and_health() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state().await))
                .configure(configure),
        )
        .await;

        let meta: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/meta").to_request()).await;
        assert_eq!(meta["platforms"], serde_json::json!(["Instagram", "YouTube"]));
        assert_eq!(meta["continents"], serde_json::json!(["Asia", "North America"]));
        assert_eq!(meta["follower_min"], 40_000);

        let health: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(health["rows"], 2);
        assert_eq!(health["embeddings_shape"], serde_json::json!([2, 64]));
        assert_eq!(health["generation_enabled"], false);
    }
}
