use fluent_rest::config::TransportConfig;
use fluent_rest::{ReqwestTransport, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

async fn redirecting_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/final"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    server
}

fn builder(server: &MockServer, config: TransportConfig) -> RequestBuilder {
    let transport = ReqwestTransport::new(config).expect("client should build");
    RequestBuilder::with_transport(&server.uri(), Arc::new(transport)).expect("builder")
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_follow_redirect_get() {
    if !can_bind_localhost() {
        return;
    }

    let server = redirecting_server().await;
    let response = builder(&server, TransportConfig::default())
        .path(["start"])
        .get()
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "ok");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 2);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_redirect_returned_when_not_following() {
    if !can_bind_localhost() {
        return;
    }

    let server = redirecting_server().await;
    let config = TransportConfig {
        follow_redirects: false,
        ..TransportConfig::default()
    };
    let response = builder(&server, config)
        .path(["start"])
        .get()
        .await
        .expect("3xx is a response, not an error");
    assert_eq!(response.status(), 302);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/final")
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_transport_timeout_surfaces_as_transport_error() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = TransportConfig {
        timeout: Duration::from_millis(50),
        ..TransportConfig::default()
    };
    let err = builder(&server, config)
        .get()
        .await
        .expect_err("request should time out");
    assert!(err.is_transport());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_user_agent_from_config() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = TransportConfig {
        user_agent: Some("integration/1.0".to_string()),
        ..TransportConfig::default()
    };
    builder(&server, config).get().await.expect("request should succeed");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(
        requests[0]
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok()),
        Some("integration/1.0")
    );
}
