use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (Gate, Analytics, Repository). It is pulled into the application state via FromRef,
/// embodying the "immutable AppConfig" part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and fail-fast behavior.
    pub env: Env,
    // Address the HTTP server binds to.
    pub bind_addr: String,
    // Cookie names whose presence marks a request as authenticated.
    // The gate inspects presence only; it never reads cookie contents.
    pub auth_cookies: Vec<String>,
    // Where authenticated visitors land when bounced off marketing pages.
    pub landing_path: String,
    // Login page that unauthenticated visitors are sent to, with a `redirect` parameter.
    pub login_path: String,
    // Analytics provider settings (consent gating, outbound endpoint).
    pub analytics: AnalyticsConfig,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, permissive defaults) and production-grade behavior (JSON logs, fail-fast).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// AnalyticsProvider
///
/// Which third-party sink receives tracked events. `None` drops everything.
#[derive(Clone, PartialEq, Debug)]
pub enum AnalyticsProvider {
    None,
    Plausible,
}

/// AnalyticsConfig
///
/// Settings for the consent-gated analytics dispatcher.
#[derive(Clone)]
pub struct AnalyticsConfig {
    pub provider: AnalyticsProvider,
    // The site domain reported to Plausible (its `domain` event field).
    pub plausible_domain: Option<String>,
    // Base URL of the Plausible instance; events go to `{endpoint}/api/event`.
    pub plausible_endpoint: String,
    // When true, no event leaves the process until consent has been granted.
    pub require_consent: bool,
}

/// The recognized session cookie names.
///
/// This is the union of the two cookie sets the legacy middlewares checked
/// (`session`/`auth-token`/`nivaro-session` and `session`/`auth_token`/`access_token`).
/// The two sets never agreed; the union is the single authoritative configuration
/// and can only widen who this layer treats as authenticated. Overridable via the
/// `AUTH_COOKIES` environment variable (comma-separated).
pub const DEFAULT_AUTH_COOKIES: &[&str] = &[
    "session",
    "auth_token",
    "auth-token",
    "access_token",
    "nivaro-session",
];

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "0.0.0.0:3000".to_string(),
            auth_cookies: DEFAULT_AUTH_COOKIES.iter().map(|s| s.to_string()).collect(),
            landing_path: "/dashboard".to_string(),
            login_path: "/auth/login".to_string(),
            analytics: AnalyticsConfig {
                provider: AnalyticsProvider::None,
                plausible_domain: None,
                plausible_endpoint: "https://plausible.io".to_string(),
                require_consent: true,
            },
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime environment
    /// (especially Production) is not found. This prevents the application from starting
    /// with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Cookie set resolution: AUTH_COOKIES overrides the built-in union.
        let auth_cookies = match env::var("AUTH_COOKIES") {
            Ok(raw) => raw
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            Err(_) => DEFAULT_AUTH_COOKIES.iter().map(|s| s.to_string()).collect(),
        };

        let analytics = Self::load_analytics(&env);

        Self {
            env,
            bind_addr,
            auth_cookies,
            landing_path: "/dashboard".to_string(),
            login_path: "/auth/login".to_string(),
            analytics,
        }
    }

    /// load_analytics
    ///
    /// Resolves the analytics provider block. The legacy frontend also understood
    /// `google` and `both`, which relied on injected browser scripts and have no
    /// server-side transport; those values log a warning and resolve to `None`.
    fn load_analytics(env: &Env) -> AnalyticsConfig {
        let provider_str = std::env::var("ANALYTICS_PROVIDER").unwrap_or_default();
        let provider = match provider_str.as_str() {
            "plausible" => AnalyticsProvider::Plausible,
            "none" | "" => AnalyticsProvider::None,
            other => {
                tracing::warn!(provider = other, "unsupported analytics provider, disabling");
                AnalyticsProvider::None
            }
        };

        // Plausible without a site domain would post events the provider cannot
        // attribute, so production refuses to start instead.
        let plausible_domain = match (&provider, env) {
            (AnalyticsProvider::Plausible, Env::Production) => Some(
                std::env::var("PLAUSIBLE_DOMAIN").expect(
                    "FATAL: PLAUSIBLE_DOMAIN required when ANALYTICS_PROVIDER=plausible in production",
                ),
            ),
            (AnalyticsProvider::Plausible, Env::Local) => Some(
                std::env::var("PLAUSIBLE_DOMAIN").unwrap_or_else(|_| "localhost".to_string()),
            ),
            _ => None,
        };

        let plausible_endpoint = std::env::var("PLAUSIBLE_ENDPOINT")
            .unwrap_or_else(|_| "https://plausible.io".to_string());

        let require_consent = std::env::var("REQUIRE_COOKIE_CONSENT")
            .map(|v| v == "true")
            .unwrap_or(true);

        AnalyticsConfig {
            provider,
            plausible_domain,
            plausible_endpoint,
            require_consent,
        }
    }
}
