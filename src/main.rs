use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use wardrobe_advisor::config::{LoggingSettings, Settings};
use wardrobe_advisor::core::{MatchSettings, Matcher, RecommendationEngine};
use wardrobe_advisor::routes::{self, recommendations::AppState};
use wardrobe_advisor::services::{build_provider, GarmentRepository, PostgresClient};

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

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting wardrobe advisor service...");

    // Shopping suggestions: generative when an API key is configured
    let suggestions = build_provider(&settings.stylist);

    let match_settings = MatchSettings {
        threshold: settings.matching.threshold,
        limit: settings.matching.limit,
    };
    let matcher = Matcher::new(match_settings);
    let effective = matcher.settings();
    let engine = RecommendationEngine::new(matcher, suggestions);

    info!(
        "Recommendation engine initialized (threshold: {}, limit: {}, suggestions: {})",
        effective.threshold,
        effective.limit,
        engine.provider_name()
    );

    // Stored wardrobes are optional; without them only stateless routes work
    let repository: Option<Arc<dyn GarmentRepository>> = match &settings.database.url {
        Some(url) => match PostgresClient::new(
            url,
            settings.database.max_connections,
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
        )
        .await
        {
            Ok(client) => {
                info!(
                    "PostgreSQL client initialized (max: {} connections)",
                    settings.database.max_connections
                );
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to connect to PostgreSQL ({}), stored wardrobe routes disabled", e);
                None
            }
        },
        None => {
            info!("No database configured, stored wardrobe routes disabled");
            None
        }
    };

    // Build application state
    let app_state = AppState {
        engine: Arc::new(engine),
        repository,
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
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
