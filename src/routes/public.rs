use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public API Router Module
///
/// JSON endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in), mounted under `/api`. All of this data is
/// read-only sample content; anything that writes lives in the authenticated
/// module.
pub fn public_api() -> Router<AppState> {
    Router::new()
        // GET /api/clubs
        // Lists every club on the platform.
        .route("/clubs", get(handlers::get_clubs))
        // GET /api/clubs/{id}
        // Detailed view of a single club.
        .route("/clubs/{id}", get(handlers::get_club))
        // GET /api/clubs/{id}/members
        // A club's membership roster, admins first.
        .route("/clubs/{id}/members", get(handlers::get_club_members))
        // GET /api/clubs/{id}/announcements
        // A club's announcements, pinned entries first.
        .route("/clubs/{id}/announcements", get(handlers::get_club_announcements))
        // GET /api/meetings?type=...&search=...
        // Lists meetings, supporting kind filtering and text search.
        .route("/meetings", get(handlers::get_meetings))
        // GET /api/meetings/{id}
        // Detailed view of a single meeting.
        .route("/meetings/{id}", get(handlers::get_meeting))
        // GET /api/meetings/{id}/rsvps
        // The RSVPs recorded for a meeting.
        .route("/meetings/{id}/rsvps", get(handlers::get_rsvps))
        // GET /api/analytics/consent
        // Current consent flag, so the frontend can render the banner state.
        .route("/analytics/consent", get(handlers::get_consent))
}
