use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated API Router Module
///
/// JSON endpoints for callers holding a recognized session cookie, mounted
/// under `/api`. Every handler here relies on the `AuthUser` extractor
/// middleware being present on the router layer above this module, which
/// guarantees a resolved identity before any handler runs.
///
/// The identity check is presence-based (see `auth.rs`); the API tree is
/// skipped by the page gate and guarded here instead.
pub fn authenticated_api() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/me
        // The authenticated user's profile.
        .route("/me", get(handlers::get_me))
        // --- Meeting management ---
        // POST /api/meetings
        // Schedules a new meeting; the creator comes from the session.
        .route("/meetings", post(handlers::create_meeting))
        // PUT/DELETE /api/meetings/{id}
        // Partial update (incl. post-meeting summary/recording) and removal.
        .route(
            "/meetings/{id}",
            put(handlers::update_meeting).delete(handlers::delete_meeting),
        )
        // POST /api/meetings/{id}/rsvps
        // Records the caller's answer; replaces their previous one.
        .route("/meetings/{id}/rsvps", post(handlers::create_rsvp))
        // --- Analytics ---
        // POST /api/analytics/event
        // Forwards a frontend event to the consent-gated dispatcher.
        .route("/analytics/event", post(handlers::track_event))
        // POST /api/analytics/consent
        // Grants or revokes analytics consent.
        .route("/analytics/consent", post(handlers::set_consent))
}
