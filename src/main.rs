use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use influencer_match::config::Settings;
use influencer_match::core::{MatchContext, Matcher, OutreachDrafter};
use influencer_match::models::ScoringWeights;
use influencer_match::routes::{self, AppState};
use influencer_match::services::{embedder, generator, Roster};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn startup_error(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting influencer matching service...");

    let settings = Settings::load()
        .map_err(|e| startup_error(format!("Configuration error: {}", e)))?;

    info!("Configuration loaded successfully");

    // The roster and its embeddings are built once; no requests are served if this fails
    let roster = Roster::load(&settings.roster.path)
        .map_err(|e| startup_error(format!("Failed to load roster: {}", e)))?;

    let embedder = embedder::from_settings(&settings.embedding)
        .map_err(|e| startup_error(format!("Failed to initialize embedder: {}", e)))?;

    let context = MatchContext::build(roster, embedder.as_ref(), settings.embedding.batch_size)
        .await
        .map_err(|e| startup_error(format!("Failed to build embedding index: {}", e)))?;

    info!(
        "Embedding index ready: {} x {} ({})",
        context.index().len(),
        context.index().dimension(),
        context.model()
    );

    let generator = generator::from_settings(&settings.generation);
    if generator.is_none() {
        info!("Outreach generation disabled, using template messages");
    }
    let drafter = OutreachDrafter::new(generator, Duration::from_secs(settings.generation.timeout_secs));

    let weights = ScoringWeights {
        relevance: settings.scoring.weights.relevance,
        audience: settings.scoring.weights.audience,
    };

    let matcher = Matcher::new(weights, embedder, drafter)
        .with_embed_timeout(Duration::from_secs(settings.embedding.timeout_secs))
        .with_outreach_concurrency(settings.matching.outreach_concurrency);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        context: Arc::new(context),
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
