use nivaro_portal::analytics::{
    AnalyticsDispatcher, AnalyticsEvent, MockSink, SinkState,
};
use nivaro_portal::config::{AnalyticsConfig, AnalyticsProvider};
use std::collections::BTreeMap;
use std::sync::Arc;

fn dispatcher_with_mock(require_consent: bool) -> (AnalyticsDispatcher, Arc<MockSink>) {
    let sink = Arc::new(MockSink::new());
    let dispatcher =
        AnalyticsDispatcher::with_sink(Some(sink.clone() as SinkState), require_consent);
    (dispatcher, sink)
}

#[tokio::test]
async fn nothing_dispatches_before_consent() {
    let (dispatcher, sink) = dispatcher_with_mock(true);

    dispatcher.track("club_created", BTreeMap::new()).await;
    dispatcher.track_page_view("/pricing", Some("Pricing")).await;
    dispatcher.track_meeting_scheduled("42").await;

    assert!(!dispatcher.consent_status());
    assert!(sink.recorded().is_empty());
}

#[tokio::test]
async fn events_flow_after_grant_and_stop_after_revoke() {
    let (dispatcher, sink) = dispatcher_with_mock(true);

    dispatcher.grant_consent();
    assert!(dispatcher.consent_status());

    dispatcher
        .track(
            "search_performed",
            BTreeMap::from([("search_query".into(), "rust".into())]),
        )
        .await;
    assert_eq!(sink.recorded().len(), 1);
    assert_eq!(sink.recorded()[0].name, "search_performed");
    assert_eq!(
        sink.recorded()[0].properties.get("search_query").map(String::as_str),
        Some("rust")
    );

    dispatcher.revoke_consent();
    assert!(!dispatcher.consent_status());

    dispatcher.track("meeting_joined", BTreeMap::new()).await;
    // Still just the one event from before the revoke.
    assert_eq!(sink.recorded().len(), 1);
}

#[tokio::test]
async fn consent_is_not_required_when_disabled_by_config() {
    let (dispatcher, sink) = dispatcher_with_mock(false);

    // No grant has happened, but the deployment opted out of consent gating.
    dispatcher.track_meeting_scheduled("7").await;

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].name, "meeting_scheduled");
    assert_eq!(
        recorded[0].properties.get("meeting_id").map(String::as_str),
        Some("7")
    );
}

#[tokio::test]
async fn page_views_carry_url_and_title() {
    let (dispatcher, sink) = dispatcher_with_mock(false);

    dispatcher
        .track_page_view("https://nivaro.test/pricing", Some("Pricing"))
        .await;

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].name, "pageview");
    assert_eq!(recorded[0].url.as_deref(), Some("https://nivaro.test/pricing"));
    assert_eq!(
        recorded[0].properties.get("title").map(String::as_str),
        Some("Pricing")
    );
}

#[tokio::test]
async fn provider_none_drops_everything_even_with_consent() {
    let dispatcher = AnalyticsDispatcher::from_config(&AnalyticsConfig {
        provider: AnalyticsProvider::None,
        plausible_domain: None,
        plausible_endpoint: "https://plausible.io".to_string(),
        require_consent: false,
    });

    dispatcher.grant_consent();
    // No sink exists; this must be a cheap no-op rather than an error.
    dispatcher.track("club_created", BTreeMap::new()).await;
    dispatcher
        .track_event(AnalyticsEvent::named("meeting_joined"))
        .await;

    // The shorthand constructor behaves the same way.
    let disabled = AnalyticsDispatcher::disabled();
    disabled.grant_consent();
    disabled.track_page_view("/", None).await;
}

#[tokio::test]
async fn repeated_events_serialize_identically() {
    let (dispatcher, sink) = dispatcher_with_mock(false);

    let props = BTreeMap::from([
        ("club_id".to_string(), "club-1".to_string()),
        ("section".to_string(), "dashboard".to_string()),
    ]);
    dispatcher.track("user_engagement", props.clone()).await;
    dispatcher.track("user_engagement", props).await;

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 2);
    // Ordered property map: the two dispatches are byte-for-byte identical.
    assert_eq!(recorded[0], recorded[1]);
}
