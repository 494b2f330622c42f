use nivaro_portal::config::{AnalyticsProvider, AppConfig, DEFAULT_AUTH_COOKIES, Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_local_defaults() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                // Clear other variables to test fallbacks
                env::remove_var("BIND_ADDR");
                env::remove_var("AUTH_COOKIES");
                env::remove_var("ANALYTICS_PROVIDER");
                env::remove_var("REQUIRE_COOKIE_CONSENT");
            }
            AppConfig::load()
        },
        vec![
            "APP_ENV",
            "BIND_ADDR",
            "AUTH_COOKIES",
            "ANALYTICS_PROVIDER",
            "REQUIRE_COOKIE_CONSENT",
        ],
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.landing_path, "/dashboard");
    assert_eq!(config.login_path, "/auth/login");
    // The recognized cookie set defaults to the documented union.
    assert_eq!(
        config.auth_cookies,
        DEFAULT_AUTH_COOKIES
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
    );
    // Analytics is off unless explicitly configured, and consent defaults on.
    assert_eq!(config.analytics.provider, AnalyticsProvider::None);
    assert!(config.analytics.require_consent);
}

#[test]
#[serial]
fn test_auth_cookie_override_parsing() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("AUTH_COOKIES", " session , sid ,, portal-token ");
            }
            AppConfig::load()
        },
        vec!["APP_ENV", "AUTH_COOKIES"],
    );

    // Whitespace trimmed, empty entries dropped, order preserved.
    assert_eq!(config.auth_cookies, vec!["session", "sid", "portal-token"]);
}

#[test]
#[serial]
fn test_plausible_local_fallback_domain() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("ANALYTICS_PROVIDER", "plausible");
                env::remove_var("PLAUSIBLE_DOMAIN");
                env::remove_var("PLAUSIBLE_ENDPOINT");
            }
            AppConfig::load()
        },
        vec![
            "APP_ENV",
            "ANALYTICS_PROVIDER",
            "PLAUSIBLE_DOMAIN",
            "PLAUSIBLE_ENDPOINT",
        ],
    );

    assert_eq!(config.analytics.provider, AnalyticsProvider::Plausible);
    assert_eq!(config.analytics.plausible_domain.as_deref(), Some("localhost"));
    assert_eq!(config.analytics.plausible_endpoint, "https://plausible.io");
}

#[test]
#[serial]
fn test_production_plausible_fail_fast() {
    // We expect this to panic because the site domain is not set
    let result = panic::catch_unwind(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("ANALYTICS_PROVIDER", "plausible");
            env::remove_var("PLAUSIBLE_DOMAIN");
        }
        AppConfig::load()
    });

    // Cleanup
    unsafe {
        for var in ["APP_ENV", "ANALYTICS_PROVIDER", "PLAUSIBLE_DOMAIN"] {
            env::remove_var(var);
        }
    }

    assert!(
        result.is_err(),
        "Production config loading should panic when the plausible domain is missing"
    );
}

#[test]
#[serial]
fn test_unsupported_provider_degrades_to_none() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                // The legacy frontend allowed `google`, which has no
                // server-side transport here.
                env::set_var("ANALYTICS_PROVIDER", "google");
            }
            AppConfig::load()
        },
        vec!["APP_ENV", "ANALYTICS_PROVIDER"],
    );

    assert_eq!(config.analytics.provider, AnalyticsProvider::None);
}
