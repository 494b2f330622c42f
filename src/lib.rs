use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod analytics;
pub mod auth;
pub mod config;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod repository;

// Module for routing segregation (Pages, Public API, Authenticated API).
pub mod routes;
use auth::AuthUser;
use gate::{GateAction, GateState, VerifierState};
use routes::{authenticated, pages, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the application entry point (main.rs).
pub use analytics::{AnalyticsDispatcher, AnalyticsState, MockSink};
pub use config::AppConfig;
pub use gate::{CookiePresenceVerifier, GateConfig};
pub use repository::{InMemoryRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the JSON API.
/// It aggregates all paths and schemas decorated with the `#[utoipa::path]`
/// and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // List all public handler functions here for documentation generation.
    paths(
        handlers::get_clubs, handlers::get_club, handlers::get_club_members,
        handlers::get_club_announcements,
        handlers::get_meetings, handlers::get_meeting, handlers::create_meeting,
        handlers::update_meeting, handlers::delete_meeting, handlers::get_rsvps,
        handlers::create_rsvp, handlers::get_me, handlers::track_event,
        handlers::set_consent, handlers::get_consent
    ),
    // List all models (schemas) used in the request/response bodies.
    components(
        schemas(
            models::Club, models::Member, models::MemberRole, models::User,
            models::Meeting, models::MeetingKind, models::Rsvp,
            models::RsvpStatus, models::Announcement, models::CreateMeetingRequest,
            models::UpdateMeetingRequest, models::CreateRsvpRequest,
            models::TrackEventRequest, models::ConsentRequest, models::ConsentStatus,
            models::UserProfile,
        )
    ),
    tags(
        (name = "nivaro-portal", description = "Nivaro Club Portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**: the single, thread-safe, immutable
/// container holding all essential application services and configuration,
/// shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Data layer: the club/meeting/RSVP store behind the Repository trait.
    pub repo: RepositoryState,
    /// Analytics layer: the consent-gated event dispatcher.
    pub analytics: AnalyticsState,
    /// Gate layer: the immutable route tables and redirect targets.
    pub gate: GateState,
    /// Authentication seam: resolves cookie presence to an authenticated flag.
    pub verifier: VerifierState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow extractors and handlers to selectively pull
// components from the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(app_state: &AppState) -> AnalyticsState {
        app_state.analytics.clone()
    }
}

impl FromRef<AppState> for GateState {
    fn from_ref(app_state: &AppState) -> GateState {
        app_state.gate.clone()
    }
}

impl FromRef<AppState> for VerifierState {
    fn from_ref(app_state: &AppState) -> VerifierState {
        app_state.verifier.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// gate_middleware
///
/// The request-time decision point. Runs on every request (the gate's own
/// allow-list short-circuits infrastructure and `/api` paths) and turns the
/// pure `GateConfig::decide` verdict into an HTTP effect: pass the request
/// down the stack, or answer with a 307 redirect. No state is written; the
/// same `(path, cookies)` pair always produces the same response.
async fn gate_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let authenticated = state.verifier.is_authenticated(&jar);

    match state.gate.decide(&path, authenticated) {
        GateAction::Continue => next.run(request).await,
        GateAction::RedirectToLogin { return_path } => {
            tracing::debug!(%path, "unauthenticated app request, redirecting to login");
            Redirect::temporary(&state.gate.login_url(&return_path)).into_response()
        }
        GateAction::RedirectToDefault => {
            tracing::debug!(%path, "authenticated marketing request, redirecting to app");
            Redirect::temporary(state.gate.landing_path()).into_response()
        }
    }
}

/// auth_middleware
///
/// Enforces authentication for the authenticated API routes.
///
/// *Mechanism*: It attempts to extract `AuthUser` from the request. Since
/// `AuthUser` implements `FromRequestParts`, if no recognized session cookie
/// is present the extractor rejects the request with a 401 Unauthorized
/// status, preventing execution of the handler.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Browser-facing pages (marketing + app shells + infra files).
        .merge(pages::page_routes())
        // JSON API under /api. The page gate skips this tree by allow-list;
        // the authenticated subset is protected by `auth_middleware` instead.
        .nest(
            "/api",
            public::public_api().merge(
                authenticated::authenticated_api()
                    .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
            ),
        )
        // The route-classification gate evaluates every request.
        .layer(middleware::from_fn_with_state(state.clone(), gate_middleware))
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a span
                // that carries the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: returns the x-request-id header to the
                // client and injects it into subsequent service calls.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (Applied last, allowing all traffic in/out after processing)
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation: extracts the
/// `x-request-id` header (if present) and includes it in the structured
/// logging metadata alongside the HTTP method and URI, so every log line for
/// a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
