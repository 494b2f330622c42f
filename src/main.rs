use nivaro_portal::{
    AppState,
    analytics::{AnalyticsDispatcher, AnalyticsState},
    config::{AppConfig, Env},
    create_router,
    gate::{
        CookiePresenceVerifier, DEFAULT_APP_PREFIXES, DEFAULT_MARKETING_PREFIXES, GateConfig,
        GateState, VerifierState,
    },
    repository::{InMemoryRepository, RepositoryState},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for
/// initializing all core components: Configuration, Logging, the sample-data
/// Repository, the Analytics dispatcher, the Access Gate, and the HTTP Server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes the RUST_LOG environment variable, falling back to sensible
    // defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nivaro_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Data Layer Initialization
    // The store is an in-memory sample-data set recreated on every start;
    // there is no persistence by design.
    let repo = Arc::new(InMemoryRepository::seeded()) as RepositoryState;

    // 5. Analytics Dispatcher
    // Built from the configured provider; consent-gated from the first event.
    let analytics =
        Arc::new(AnalyticsDispatcher::from_config(&config.analytics)) as AnalyticsState;

    // 6. Access Gate Assembly
    // Immutable route tables plus the presence-based session verifier,
    // constructed once and shared read-only for the process lifetime.
    let gate = Arc::new(GateConfig::new(
        DEFAULT_MARKETING_PREFIXES.iter().map(|s| s.to_string()),
        DEFAULT_APP_PREFIXES.iter().map(|s| s.to_string()),
        &config.login_path,
        &config.landing_path,
    )) as GateState;
    let verifier =
        Arc::new(CookiePresenceVerifier::new(config.auth_cookies.clone())) as VerifierState;

    // 7. Unified State Assembly and Server Startup
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        repo,
        analytics,
        gate,
        verifier,
        config,
    };

    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind HTTP listener. Check BIND_ADDR.");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.expect("server error");
}
