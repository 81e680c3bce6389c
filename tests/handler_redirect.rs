mod common;

use chrono::Utc;
use common::{CHROME, FACEBOOK, FailingStore, memory_store, promo_link};
use slug_redirector::application::services::TrafficSplitPolicy;
use slug_redirector::config::{Config, RedirectMode};
use slug_redirector::domain::access_event::{AccessEvent, ClientInfo, ClientKind};
use slug_redirector::domain::entities::Link;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_human_is_redirected() {
    let (server, mut rx) = common::create_test_server(Config::default(), memory_store([promo_link()]));

    let response = server
        .get("/Promo")
        .add_header("User-Agent", CHROME)
        .add_query_param("utm", "x")
        .await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://dest.example/x");
    assert_eq!(response.header("cache-control"), "no-store");

    let event = rx.try_recv().expect("access event queued");
    assert_eq!(event.slug, "promo");
    assert_eq!(event.url, "https://dest.example/x");
    assert_eq!(event.client, ClientKind::Human);
    assert_eq!(event.ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_crawler_gets_preview() {
    let mut config = Config::default();
    config.preview.default_image = "https://img.example/default.png".to_string();
    let (server, mut rx) = common::create_test_server(config, memory_store([promo_link()]));

    let response = server
        .get("/Promo")
        .add_header("User-Agent", FACEBOOK)
        .add_header("Host", "s.example.com")
        .await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let html = response.text();
    assert!(html.contains(r#"<meta property="og:title" content="Promo">"#));
    assert!(html.contains(r#"<meta property="og:image" content="https://img.example/default.png">"#));
    assert!(html.contains(r#"<meta property="og:description" content="A short link">"#));
    let canonical = html
        .lines()
        .find(|l| l.contains(r#"rel="canonical""#))
        .expect("canonical link");
    assert!(canonical.contains("s.example.com/Promo"));

    let event = rx.try_recv().expect("access event queued");
    assert_eq!(event.client, ClientKind::Bot);
}

#[tokio::test]
async fn test_unknown_slug_falls_through() {
    let (server, mut rx) = common::create_test_server(Config::default(), memory_store([promo_link()]));

    let response = server.get("/missing").add_header("User-Agent", CHROME).await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_reserved_slugs_never_resolve() {
    let store = memory_store([
        Link::new("dashboard", "https://dest.example/d"),
        Link::new("api", "https://dest.example/a"),
    ]);
    let (server, _rx) = common::create_test_server(Config::default(), store);

    server.get("/dashboard").await.assert_status_not_found();
    server.get("/api").await.assert_status_not_found();
}

#[tokio::test]
async fn test_invalid_slugs_never_resolve() {
    let store = memory_store([Link::new("a_b", "https://dest.example/u")]);
    let (server, _rx) = common::create_test_server(Config::default(), store);

    server.get("/a_b").await.assert_status_not_found();
    server.get("/favicon.ico").await.assert_status_not_found();
}

#[tokio::test]
async fn test_trailing_slash_and_extra_segments() {
    let (server, _rx) = common::create_test_server(Config::default(), memory_store([promo_link()]));

    assert_eq!(server.get("/promo/").await.status_code(), 301);
    assert_eq!(server.get("/promo/anything").await.status_code(), 301);
}

#[tokio::test]
async fn test_case_insensitive_lookup() {
    let store = memory_store([Link::new("abc", "https://dest.example/abc")]);
    let (server, _rx) = common::create_test_server(Config::default(), store);

    for path in ["/Abc", "/ABC", "/abc"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 301, "{path}");
        assert_eq!(response.header("location"), "https://dest.example/abc");
    }
}

#[tokio::test]
async fn test_case_insensitive_falls_back_to_exact_case() {
    let store = memory_store([Link::new("Abc", "https://dest.example/upper")]);
    let (server, _rx) = common::create_test_server(Config::default(), store);

    let response = server.get("/Abc").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://dest.example/upper");
}

#[tokio::test]
async fn test_case_sensitive_lookup() {
    let config = Config {
        case_sensitive: true,
        ..Config::default()
    };
    let store = memory_store([Link::new("Abc", "https://dest.example/upper")]);
    let (server, _rx) = common::create_test_server(config, store);

    assert_eq!(server.get("/Abc").await.status_code(), 301);
    server.get("/abc").await.assert_status_not_found();
    server.get("/ABC").await.assert_status_not_found();
}

#[tokio::test]
async fn test_query_propagation() {
    let config = Config {
        redirect_with_query: true,
        ..Config::default()
    };
    let store = memory_store([Link::new("promo", "https://dest.example/x?ref=s&utm=old")]);
    let (server, _rx) = common::create_test_server(config, store);

    let response = server.get("/promo").add_query_param("utm", "x").await;

    assert_eq!(
        response.header("location"),
        "https://dest.example/x?ref=s&utm=x"
    );
}

#[tokio::test]
async fn test_query_not_propagated_by_default() {
    let store = memory_store([Link::new("promo", "https://dest.example/x?ref=s")]);
    let (server, _rx) = common::create_test_server(Config::default(), store);

    let response = server.get("/promo").add_query_param("utm", "x").await;

    assert_eq!(response.header("location"), "https://dest.example/x?ref=s");
}

#[tokio::test]
async fn test_configured_status_code() {
    let config = Config {
        redirect_status_code: 307,
        ..Config::default()
    };
    let (server, _rx) = common::create_test_server(config, memory_store([promo_link()]));

    assert_eq!(server.get("/promo").await.status_code(), 307);
}

#[tokio::test]
async fn test_script_redirect_mode() {
    let config = Config {
        redirect_mode: RedirectMode::Script,
        ..Config::default()
    };
    let (server, _rx) = common::create_test_server(config, memory_store([promo_link()]));

    let response = server.get("/promo").add_header("User-Agent", CHROME).await;

    response.assert_status_ok();
    assert_eq!(response.header("referrer-policy"), "no-referrer");
    assert!(response.maybe_header("location").is_none());

    let html = response.text();
    assert!(html.contains(r#"("https://dest.example/x")"#));
    assert!(html.contains("noreferrer"));
}

#[tokio::test]
async fn test_home_redirect() {
    let config = Config {
        home_url: Some("https://home.example/".to_string()),
        ..Config::default()
    };
    let (server, _rx) = common::create_test_server(config, common::empty_store());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://home.example/");
}

#[tokio::test]
async fn test_root_without_home_is_not_found() {
    let (server, _rx) = common::create_test_server(Config::default(), common::empty_store());

    server.get("/").await.assert_status_not_found();
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let (server, mut rx) = common::create_test_server(Config::default(), Arc::new(FailingStore));

    let response = server.get("/promo").add_header("User-Agent", CHROME).await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "store_unavailable");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_store_failure_skipped_for_reserved_paths() {
    let (server, _rx) = common::create_test_server(Config::default(), Arc::new(FailingStore));

    server.get("/favicon.ico").await.assert_status_not_found();
}

#[tokio::test]
async fn test_expired_link_is_not_found() {
    let expired = Link::new("old", "https://dest.example/old")
        .with_expiration(Utc::now().timestamp() - 60);
    let (server, _rx) = common::create_test_server(Config::default(), memory_store([expired]));

    server.get("/old").await.assert_status_not_found();
}

#[tokio::test]
async fn test_human_without_destination_falls_through() {
    let card: Link = serde_json::from_str(r#"{"slug":"card","title":"Card"}"#).unwrap();
    let (server, _rx) = common::create_test_server(Config::default(), memory_store([card]));

    server
        .get("/card")
        .add_header("User-Agent", CHROME)
        .await
        .assert_status_not_found();
    server
        .get("/card")
        .add_header("User-Agent", FACEBOOK)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_full_access_queue_does_not_block_redirect() {
    let (tx, _rx) = mpsc::channel(1);
    tx.try_send(AccessEvent::new(
        "filler".to_string(),
        "https://example.com".to_string(),
        ClientKind::Human,
        ClientInfo::default(),
    ))
    .unwrap();

    let state = slug_redirector::state::AppState::new(
        Config::default(),
        memory_store([promo_link()]),
        tx,
    );
    let server = common::server_for(state);

    assert_eq!(server.get("/promo").await.status_code(), 301);
}

#[tokio::test]
async fn test_closed_access_queue_does_not_block_redirect() {
    let (state, rx) = common::create_test_state(Config::default(), memory_store([promo_link()]));
    drop(rx);
    let server = common::server_for(state);

    assert_eq!(server.get("/promo").await.status_code(), 301);
}

#[tokio::test]
async fn test_access_event_captures_request_metadata() {
    let (server, mut rx) = common::create_test_server(Config::default(), memory_store([promo_link()]));

    server
        .get("/promo")
        .add_header("User-Agent", CHROME)
        .add_header("Referer", "https://google.com")
        .add_header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .add_header("CF-IPCountry", "ID")
        .add_header("Accept-Language", "id-ID,id;q=0.9")
        .await;

    let event = rx.try_recv().expect("access event queued");
    assert_eq!(event.referer.as_deref(), Some("https://google.com"));
    assert_eq!(event.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(event.country.as_deref(), Some("ID"));
    assert_eq!(event.language.as_deref(), Some("id-ID,id;q=0.9"));
    assert_eq!(event.user_agent.as_deref(), Some(CHROME));
}

#[tokio::test]
async fn test_traffic_split_respects_exempt_locale() {
    let config = Config {
        traffic_split: Some(TrafficSplitPolicy::new("ID", "https://alt.example/")),
        ..Config::default()
    };
    let (server, _rx) = common::create_test_server(config, memory_store([promo_link()]));

    for _ in 0..50 {
        let response = server
            .get("/promo")
            .add_header("User-Agent", CHROME)
            .add_header("CF-IPCountry", "ID")
            .await;
        assert_eq!(response.header("location"), "https://dest.example/x");
    }

    let mut diverted = 0;
    for _ in 0..200 {
        let response = server
            .get("/promo")
            .add_header("User-Agent", CHROME)
            .add_header("CF-IPCountry", "US")
            .await;
        if response.header("location") == "https://alt.example/" {
            diverted += 1;
        }
    }

    assert!(diverted > 0, "alternate destination never selected");
    assert!(diverted < 200, "stored destination never selected");
}

#[tokio::test]
async fn test_non_get_requests_are_not_resolved() {
    let (server, _rx) = common::create_test_server(Config::default(), memory_store([promo_link()]));

    server.post("/promo").await.assert_status_not_found();
}
