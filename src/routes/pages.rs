use crate::AppState;
use axum::{Router, response::Html, routing::get};

/// Page Router Module
///
/// The browser-facing routes: the marketing site, the authenticated app shell,
/// and the root infrastructure files. Actual page rendering belongs to the
/// frontend; these handlers serve thin HTML shells so the access gate has real
/// routes to guard and end-to-end tests can observe pass-through vs redirect.
///
/// Access control happens in the gate middleware layered over the whole
/// router, not here: by the time a handler runs, the gate has already decided
/// the request may pass.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated endpoint for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /robots.txt
        // Root infrastructure file; always reachable (gate allow-list).
        .route("/robots.txt", get(robots))
        // --- Marketing site ---
        .route("/", get(|| async { shell("Nivaro") }))
        .route("/about", get(|| async { shell("About") }))
        .route("/pricing", get(|| async { shell("Pricing") }))
        .route("/contact", get(|| async { shell("Contact") }))
        .route("/faq", get(|| async { shell("FAQ") }))
        .route("/testimonials", get(|| async { shell("Testimonials") }))
        // Legal pages.
        .route("/privacy-policy", get(|| async { shell("Privacy Policy") }))
        .route("/terms", get(|| async { shell("Terms of Service") }))
        .route("/cookies", get(|| async { shell("Cookie Policy") }))
        // Auth flows. These live in the marketing table, but the gate lets
        // authenticated users through to anything under /auth/ so that the
        // logout flow stays reachable.
        .route("/auth/login", get(|| async { shell("Sign In") }))
        .route("/auth/signup", get(|| async { shell("Sign Up") }))
        .route("/auth/forgot-password", get(|| async { shell("Reset Password") }))
        .route("/auth/logout", get(|| async { shell("Sign Out") }))
        // --- Authenticated app shell ---
        .route("/dashboard", get(|| async { shell("Dashboard") }))
        .route("/meetings", get(|| async { shell("Meetings") }))
        .route("/meetings/{id}", get(|| async { shell("Meeting") }))
        .route("/learning", get(|| async { shell("Learning") }))
        .route("/project-collaboration", get(|| async { shell("Projects") }))
        .route("/forum", get(|| async { shell("Forum") }))
        .route("/announcements", get(|| async { shell("Announcements") }))
        .route("/profile", get(|| async { shell("Profile") }))
        .route("/settings", get(|| async { shell("Settings") }))
        .route("/club", get(|| async { shell("Clubs") }))
        .route("/club/{club_id}", get(|| async { shell("Club") }))
        .route("/onboarding", get(|| async { shell("Onboarding") }))
}

/// Minimal HTML shell. The frontend bundle takes over rendering client-side.
fn shell(title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} · Nivaro</title></head>\n<body><div id=\"root\" data-page=\"{title}\"></div></body>\n</html>\n"
    ))
}

async fn robots() -> &'static str {
    "User-agent: *\nAllow: /\n"
}
