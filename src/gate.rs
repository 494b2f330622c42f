use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use url::form_urlencoded;

/// Route Classifier / Access Gate
///
/// Decides, per request, whether a path belongs to the marketing site or the
/// authenticated application, and whether the caller should pass through or be
/// redirected. The whole evaluation is a pure function over immutable tables:
/// no locks, no shared counters, no I/O. Each request is classified
/// independently, so the gate is safe under unbounded request parallelism.
///
/// The gate is a convenience redirect, **not** an authorization mechanism.
/// It treats cookie *presence* as the authentication signal and never inspects
/// cookie contents; a forged or stale cookie is indistinguishable from a valid
/// one at this layer. Real credential validation happens downstream in the
/// authentication service, behind the `SessionVerifier` seam.

/// Marketing prefixes: pages intended for unauthenticated visitors.
/// Ordered; membership is tested with a segment-boundary prefix match.
pub const DEFAULT_MARKETING_PREFIXES: &[&str] = &[
    "/",
    "/about",
    "/pricing",
    "/contact",
    "/auth/login",
    "/auth/signup",
    "/auth/forgot-password",
    "/privacy-policy",
    "/terms",
    "/cookies",
    "/faq",
    "/testimonials",
];

/// App prefixes: pages intended only for authenticated users.
pub const DEFAULT_APP_PREFIXES: &[&str] = &[
    "/dashboard",
    "/meetings",
    "/learning",
    "/project-collaboration",
    "/forum",
    "/announcements",
    "/profile",
    "/settings",
    "/club",
    "/onboarding",
];

/// RouteClass
///
/// The category a request path falls into. Paths matching neither table are
/// `Neither` and always pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Marketing,
    App,
    Neither,
}

/// GateAction
///
/// The gate's verdict for a single request. `RedirectToLogin` carries the
/// original path so the login page can send the visitor back after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    Continue,
    RedirectToLogin { return_path: String },
    RedirectToDefault,
}

/// GateConfig
///
/// Immutable configuration for the gate, assembled once at startup and shared
/// read-only for the lifetime of the process. The route tables are never
/// mutated at runtime; reconfiguration means restarting with new tables.
#[derive(Clone)]
pub struct GateConfig {
    marketing_prefixes: Vec<String>,
    app_prefixes: Vec<String>,
    login_path: String,
    landing_path: String,
}

/// The shared, read-only gate handle stored in application state.
pub type GateState = Arc<GateConfig>;

impl Default for GateConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_MARKETING_PREFIXES.iter().map(|s| s.to_string()),
            DEFAULT_APP_PREFIXES.iter().map(|s| s.to_string()),
            "/auth/login",
            "/dashboard",
        )
    }
}

impl GateConfig {
    pub fn new(
        marketing_prefixes: impl IntoIterator<Item = String>,
        app_prefixes: impl IntoIterator<Item = String>,
        login_path: &str,
        landing_path: &str,
    ) -> Self {
        Self {
            marketing_prefixes: marketing_prefixes.into_iter().collect(),
            app_prefixes: app_prefixes.into_iter().collect(),
            login_path: login_path.to_string(),
            landing_path: landing_path.to_string(),
        }
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// classify
    ///
    /// Assigns the path to `Marketing`, `App`, or `Neither` by prefix membership.
    /// The marketing table is consulted first; first matching table wins.
    pub fn classify(&self, path: &str) -> RouteClass {
        if Self::matches_any(&self.marketing_prefixes, path) {
            RouteClass::Marketing
        } else if Self::matches_any(&self.app_prefixes, path) {
            RouteClass::App
        } else {
            RouteClass::Neither
        }
    }

    /// decide
    ///
    /// The per-request decision table, evaluated in order with first match winning:
    ///
    /// 1. Infrastructure paths (static assets, files with an extension,
    ///    `favicon.ico`, `robots.txt`, `sitemap.xml`, the `/api` tree) always
    ///    pass through, regardless of authentication state.
    /// 2. Authenticated caller on a marketing page outside `/auth/` is sent to
    ///    the landing page.
    /// 3. Authenticated caller under `/auth/` passes through, so logout flows
    ///    stay reachable.
    /// 4. Unauthenticated caller on an app page is sent to login, carrying the
    ///    original path.
    /// 5. Everything else passes through. Unknown paths are `Neither`, so the
    ///    function is total: there is no input that fails to produce an action.
    pub fn decide(&self, path: &str, authenticated: bool) -> GateAction {
        if is_infrastructure(path) {
            return GateAction::Continue;
        }

        match self.classify(path) {
            RouteClass::Marketing if authenticated => {
                if path.starts_with("/auth/") {
                    GateAction::Continue
                } else {
                    GateAction::RedirectToDefault
                }
            }
            RouteClass::App if !authenticated => GateAction::RedirectToLogin {
                return_path: path.to_string(),
            },
            _ => GateAction::Continue,
        }
    }

    /// login_url
    ///
    /// Builds the login redirect target with the original path carried as the
    /// `redirect` query parameter, form-urlencoded (`/club/x` -> `%2Fclub%2Fx`).
    pub fn login_url(&self, return_path: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect", return_path)
            .finish();
        format!("{}?{}", self.login_path, query)
    }

    /// Segment-boundary prefix match: the path must equal the prefix exactly or
    /// continue with a `/` immediately after it. A bare substring match would
    /// false-positive on sibling names (`/clubsx` against `/club`).
    fn matches_any(prefixes: &[String], path: &str) -> bool {
        prefixes.iter().any(|prefix| {
            path == prefix
                || (path.len() > prefix.len()
                    && path.starts_with(prefix.as_str())
                    && path.as_bytes()[prefix.len()] == b'/')
        })
    }
}

/// is_infrastructure
///
/// The fixed allow-list of paths the gate never evaluates: static assets,
/// the API tree (guarded per-route instead), any path with a `.` (files with
/// an extension), and the well-known root files.
pub fn is_infrastructure(path: &str) -> bool {
    path.starts_with("/static/")
        || path.starts_with("/assets/")
        || path.starts_with("/api/")
        || path.contains('.')
        || path == "/robots.txt"
        || path == "/sitemap.xml"
        || path == "/favicon.ico"
}

// --- Authentication seam ---

/// SessionVerifier
///
/// The seam between the gate and the authentication collaborator. The gate
/// itself is verification-agnostic: it asks this trait for a boolean and makes
/// no assumptions about how the answer was produced. The default implementation
/// below is presence-based; a deployment with a real session store would swap
/// in an implementation that validates the token server-side.
pub trait SessionVerifier: Send + Sync {
    fn is_authenticated(&self, jar: &CookieJar) -> bool;
}

/// The shared verifier handle stored in application state.
pub type VerifierState = Arc<dyn SessionVerifier>;

/// CookiePresenceVerifier
///
/// Treats possession of any recognized cookie name as proof of authentication.
/// No signature or server-side session check occurs; this is the documented
/// boundary of the gate's guarantee.
pub struct CookiePresenceVerifier {
    cookie_names: Vec<String>,
}

impl CookiePresenceVerifier {
    pub fn new(cookie_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            cookie_names: cookie_names.into_iter().collect(),
        }
    }
}

impl SessionVerifier for CookiePresenceVerifier {
    fn is_authenticated(&self, jar: &CookieJar) -> bool {
        self.cookie_names.iter().any(|name| jar.get(name).is_some())
    }
}
