use crate::config::{AnalyticsConfig, AnalyticsProvider};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Consent-gated analytics dispatch.
///
/// Events are forwarded to a configured third-party sink only when a provider
/// is enabled AND (if consent is required) consent has been granted. Dispatch
/// failures are logged and swallowed: analytics must never fail a request.

/// AnalyticsEvent
///
/// A named event with a string property map. The map is ordered so repeated
/// dispatches of the same event serialize identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: String,
    // Page URL for page-view style events; absent for plain custom events.
    pub url: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl AnalyticsEvent {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: None,
            properties: BTreeMap::new(),
        }
    }
}

// 1. AnalyticsSink Contract
/// AnalyticsSink
///
/// Defines the abstract contract for delivering one event to a provider.
/// This trait allows us to swap the concrete implementation (the real HTTP
/// client in production, the in-memory MockSink during testing) without
/// affecting the dispatcher or the calling handlers.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn deliver(&self, event: &AnalyticsEvent) -> Result<(), String>;
}

/// The concrete type used to share a sink across the dispatcher.
pub type SinkState = Arc<dyn AnalyticsSink>;

// 2. The Real Implementation (Plausible events API)
/// PlausibleSink
///
/// Posts events to a Plausible instance's `/api/event` endpoint. Plausible is
/// the one provider from the legacy configuration with a server-side event
/// API; `google`/`both` configurations resolve to no sink at load time.
pub struct PlausibleSink {
    client: reqwest::Client,
    endpoint: String,
    domain: String,
}

impl PlausibleSink {
    pub fn new(endpoint: &str, domain: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            domain: domain.to_string(),
        }
    }
}

#[async_trait]
impl AnalyticsSink for PlausibleSink {
    async fn deliver(&self, event: &AnalyticsEvent) -> Result<(), String> {
        let url = event
            .url
            .clone()
            .unwrap_or_else(|| format!("app://{}", self.domain));

        let body = serde_json::json!({
            "name": event.name,
            "domain": self.domain,
            "url": url,
            "props": event.properties,
        });

        let response = self
            .client
            .post(format!("{}/api/event", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("plausible returned {}", response.status()))
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)
/// MockSink
///
/// Records every delivered event in memory so tests can assert on exactly what
/// the dispatcher let through the consent gate.
#[derive(Default)]
pub struct MockSink {
    events: std::sync::Mutex<Vec<AnalyticsEvent>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("mock sink lock").clone()
    }
}

#[async_trait]
impl AnalyticsSink for MockSink {
    async fn deliver(&self, event: &AnalyticsEvent) -> Result<(), String> {
        self.events.lock().expect("mock sink lock").push(event.clone());
        Ok(())
    }
}

// --- Dispatcher ---

/// AnalyticsDispatcher
///
/// The consent gate in front of the sink. Consent is a process-wide flag; the
/// legacy frontend kept it per-browser in localStorage, which has no
/// server-side equivalent for this single-tenant demo backend.
pub struct AnalyticsDispatcher {
    sink: Option<SinkState>,
    require_consent: bool,
    consented: AtomicBool,
}

/// The shared dispatcher handle stored in application state.
pub type AnalyticsState = Arc<AnalyticsDispatcher>;

impl AnalyticsDispatcher {
    /// from_config
    ///
    /// Builds the dispatcher the configuration asks for. Provider `None` means
    /// no sink: every track call becomes a cheap no-op.
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let sink: Option<SinkState> = match config.provider {
            AnalyticsProvider::Plausible => {
                let domain = config.plausible_domain.as_deref().unwrap_or_default();
                Some(Arc::new(PlausibleSink::new(
                    &config.plausible_endpoint,
                    domain,
                )))
            }
            AnalyticsProvider::None => None,
        };
        Self::with_sink(sink, config.require_consent)
    }

    /// with_sink
    ///
    /// Direct construction, used by tests to inject a MockSink.
    pub fn with_sink(sink: Option<SinkState>, require_consent: bool) -> Self {
        Self {
            sink,
            require_consent,
            consented: AtomicBool::new(false),
        }
    }

    /// A dispatcher that drops everything. Handy default for tests.
    pub fn disabled() -> Self {
        Self::with_sink(None, true)
    }

    // --- Consent management ---

    pub fn grant_consent(&self) {
        self.consented.store(true, Ordering::Relaxed);
    }

    pub fn revoke_consent(&self) {
        self.consented.store(false, Ordering::Relaxed);
    }

    pub fn consent_status(&self) -> bool {
        self.consented.load(Ordering::Relaxed)
    }

    /// True when an event would actually be forwarded right now.
    fn enabled(&self) -> bool {
        self.sink.is_some() && (!self.require_consent || self.consent_status())
    }

    // --- Dispatch ---

    /// track
    ///
    /// Forwards a named event with its property map. Silently dropped while
    /// disabled or unconsented; delivery errors are logged, never surfaced.
    pub async fn track(&self, name: &str, properties: BTreeMap<String, String>) {
        let mut event = AnalyticsEvent::named(name);
        event.properties = properties;
        self.dispatch(event).await;
    }

    /// track_page_view
    ///
    /// Page-view variant: the event is named `pageview` and carries the URL,
    /// with the title as a property when present.
    pub async fn track_page_view(&self, url: &str, title: Option<&str>) {
        let mut event = AnalyticsEvent::named("pageview");
        event.url = Some(url.to_string());
        if let Some(title) = title {
            event.properties.insert("title".into(), title.to_string());
        }
        self.dispatch(event).await;
    }

    /// track_event
    ///
    /// Entry point for pre-built events (the HTTP event endpoint builds these
    /// straight from the request payload).
    pub async fn track_event(&self, event: AnalyticsEvent) {
        self.dispatch(event).await;
    }

    // Predefined helpers for the events the server emits itself.

    pub async fn track_meeting_scheduled(&self, meeting_id: &str) {
        self.track(
            "meeting_scheduled",
            BTreeMap::from([("meeting_id".into(), meeting_id.into())]),
        )
        .await;
    }

    pub async fn track_meeting_joined(&self, meeting_id: &str) {
        self.track(
            "meeting_joined",
            BTreeMap::from([("meeting_id".into(), meeting_id.into())]),
        )
        .await;
    }

    pub async fn track_search(&self, query: &str, results: usize) {
        self.track(
            "search_performed",
            BTreeMap::from([
                ("search_query".into(), query.into()),
                ("results_count".into(), results.to_string()),
            ]),
        )
        .await;
    }

    async fn dispatch(&self, event: AnalyticsEvent) {
        if !self.enabled() {
            return;
        }
        // `enabled` checked sink presence above.
        let Some(sink) = &self.sink else { return };
        if let Err(e) = sink.deliver(&event).await {
            tracing::warn!(event = %event.name, error = %e, "analytics delivery failed");
        }
    }
}
