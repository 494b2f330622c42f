use axum_extra::extract::cookie::{Cookie, CookieJar};
use nivaro_portal::gate::{
    CookiePresenceVerifier, GateAction, GateConfig, RouteClass, SessionVerifier,
    is_infrastructure,
};

fn gate() -> GateConfig {
    GateConfig::default()
}

// --- Infrastructure allow-list ---

#[test]
fn infrastructure_paths_always_continue() {
    let gate = gate();
    let infra = [
        "/static/app.css",
        "/assets/logo.svg",
        "/api/meetings",
        "/favicon.ico",
        "/robots.txt",
        "/sitemap.xml",
        "/downloads/report.pdf",
    ];
    for path in infra {
        assert!(is_infrastructure(path), "{path} should be infrastructure");
        // Regardless of authentication state.
        assert_eq!(gate.decide(path, false), GateAction::Continue, "{path} anon");
        assert_eq!(gate.decide(path, true), GateAction::Continue, "{path} authed");
    }
}

// --- Classification ---

#[test]
fn classifies_marketing_app_and_neither() {
    let gate = gate();
    assert_eq!(gate.classify("/"), RouteClass::Marketing);
    assert_eq!(gate.classify("/pricing"), RouteClass::Marketing);
    assert_eq!(gate.classify("/auth/login"), RouteClass::Marketing);
    assert_eq!(gate.classify("/dashboard"), RouteClass::App);
    assert_eq!(gate.classify("/club/abc123"), RouteClass::App);
    assert_eq!(gate.classify("/meetings/42"), RouteClass::App);
    assert_eq!(gate.classify("/swagger-ui"), RouteClass::Neither);
    assert_eq!(gate.classify("/nonexistent"), RouteClass::Neither);
}

#[test]
fn prefix_match_is_segment_exact() {
    let gate = gate();
    // Sibling names must not false-positive on a shared prefix.
    assert_eq!(gate.classify("/forumish"), RouteClass::Neither);
    assert_eq!(gate.classify("/clubsx"), RouteClass::Neither);
    assert_eq!(gate.classify("/pricingly"), RouteClass::Neither);
    // The real prefixes still match at a segment boundary.
    assert_eq!(gate.classify("/forum"), RouteClass::App);
    assert_eq!(gate.classify("/forum/thread-1"), RouteClass::App);
}

// --- Decision table ---

#[test]
fn unauthenticated_app_path_redirects_to_login_with_return_path() {
    let gate = gate();
    let action = gate.decide("/dashboard/settings", false);
    assert_eq!(
        action,
        GateAction::RedirectToLogin {
            return_path: "/dashboard/settings".to_string()
        }
    );
    // The redirect target encodes the original path exactly.
    assert_eq!(
        gate.login_url("/dashboard/settings"),
        "/auth/login?redirect=%2Fdashboard%2Fsettings"
    );
}

#[test]
fn authenticated_marketing_path_redirects_to_landing() {
    let gate = gate();
    assert_eq!(gate.decide("/pricing", true), GateAction::RedirectToDefault);
    assert_eq!(gate.decide("/", true), GateAction::RedirectToDefault);
    assert_eq!(gate.decide("/terms", true), GateAction::RedirectToDefault);
}

#[test]
fn authenticated_auth_pages_continue() {
    let gate = gate();
    // Logout flows must stay reachable for signed-in users.
    assert_eq!(gate.decide("/auth/login", true), GateAction::Continue);
    assert_eq!(gate.decide("/auth/signup", true), GateAction::Continue);
}

#[test]
fn anonymous_marketing_and_unknown_paths_continue() {
    let gate = gate();
    assert_eq!(gate.decide("/pricing", false), GateAction::Continue);
    assert_eq!(gate.decide("/auth/login", false), GateAction::Continue);
    assert_eq!(gate.decide("/nonexistent", false), GateAction::Continue);
    assert_eq!(gate.decide("/nonexistent", true), GateAction::Continue);
}

#[test]
fn authenticated_app_path_continues() {
    let gate = gate();
    assert_eq!(gate.decide("/dashboard", true), GateAction::Continue);
    assert_eq!(gate.decide("/club/abc123", true), GateAction::Continue);
}

#[test]
fn decision_is_idempotent() {
    let gate = gate();
    let cases = [
        ("/dashboard", false),
        ("/dashboard", true),
        ("/pricing", true),
        ("/robots.txt", false),
        ("/nonexistent", true),
    ];
    for (path, authed) in cases {
        let first = gate.decide(path, authed);
        let second = gate.decide(path, authed);
        assert_eq!(first, second, "decision for {path} must not drift");
    }
}

#[test]
fn club_detail_scenario_end_to_end() {
    let gate = gate();

    // Anonymous visitor gets bounced to login, carrying the club path.
    let action = gate.decide("/club/abc123", false);
    match &action {
        GateAction::RedirectToLogin { return_path } => {
            assert_eq!(return_path, "/club/abc123");
            assert_eq!(
                gate.login_url(return_path),
                "/auth/login?redirect=%2Fclub%2Fabc123"
            );
        }
        other => panic!("expected login redirect, got {other:?}"),
    }

    // The same path with a session cookie present passes through.
    assert_eq!(gate.decide("/club/abc123", true), GateAction::Continue);
}

// --- Session verifier ---

#[test]
fn cookie_presence_verifier_checks_recognized_names_only() {
    let verifier = CookiePresenceVerifier::new(
        ["session".to_string(), "auth_token".to_string()],
    );

    let empty = CookieJar::new();
    assert!(!verifier.is_authenticated(&empty));

    let recognized = CookieJar::new().add(Cookie::new("session", "opaque-value"));
    assert!(verifier.is_authenticated(&recognized));

    // Contents are never inspected; presence of the name is the whole check.
    let forged = CookieJar::new().add(Cookie::new("auth_token", ""));
    assert!(verifier.is_authenticated(&forged));

    let unrecognized = CookieJar::new().add(Cookie::new("theme", "dark"));
    assert!(!verifier.is_authenticated(&unrecognized));
}

#[test]
fn custom_route_tables_are_respected() {
    let gate = GateConfig::new(
        ["/landing".to_string()],
        ["/portal".to_string()],
        "/login",
        "/portal/home",
    );
    assert_eq!(gate.classify("/landing"), RouteClass::Marketing);
    assert_eq!(gate.classify("/portal/x"), RouteClass::App);
    assert_eq!(gate.decide("/landing", true), GateAction::RedirectToDefault);
    assert_eq!(
        gate.login_url("/portal/x"),
        "/login?redirect=%2Fportal%2Fx"
    );
}
