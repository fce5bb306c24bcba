/// HTTP executor tests against a local mock server
/// Covers headers, form bodies, redirect handling and transport failures
use std::net::TcpListener;
use std::time::Duration;

use wordfuzz::{
    decide_verdict, FilterSet, HttpExecutor, RequestExecutor, RequestSpec, TransportError,
    Verdict, USER_AGENT,
};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_sends_user_agent_and_reports_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(50)))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new().expect("client");
    let spec = RequestSpec::new(format!("{}/FUZZ", server.uri()), None);
    let response = executor
        .execute(&spec.render("admin"))
        .await
        .expect("response");

    assert_eq!(response.status, 200);
    assert_eq!(response.body_len, 50);
    assert_eq!(response.location, None);

    let received = server.received_requests().await.expect("recording enabled");
    let agent = received[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok());
    assert_eq!(agent, Some(USER_AGENT));
}

#[tokio::test]
async fn test_post_sends_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=root"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new().expect("client");
    let spec = RequestSpec::new(
        format!("{}/login", server.uri()),
        Some("user=FUZZ".to_string()),
    );
    let response = executor
        .execute(&spec.render("root"))
        .await
        .expect("response");

    assert_eq!(response.status, 200);
    assert_eq!(response.body_len, "welcome".len());
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zzz"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/home"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new().expect("client");
    let spec = RequestSpec::new(format!("{}/FUZZ", server.uri()), None);
    let outcome = executor.execute(&spec.render("zzz")).await;

    let filters = FilterSet::new(["301"], []);
    assert_eq!(
        decide_verdict(&outcome, &filters),
        Verdict::Redirect {
            location: "/home".to_string(),
            status: 301
        }
    );
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let executor = HttpExecutor::new().expect("client");
    let spec = RequestSpec::new(format!("{}/FUZZ", server.uri()), None);
    let outcome = executor.execute(&spec.render("slow")).await;

    assert_eq!(outcome, Err(TransportError::Timeout));
    assert_eq!(
        decide_verdict(&outcome, &FilterSet::default()),
        Verdict::TransportError
    );
}

#[tokio::test]
async fn test_closed_port_is_a_connect_error() {
    // Bind an ephemeral port, then release it so nothing listens there.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let executor = HttpExecutor::new().expect("client");
    let spec = RequestSpec::new(format!("http://127.0.0.1:{}/FUZZ", port), None);
    let outcome = executor.execute(&spec.render("gone")).await;

    assert!(matches!(outcome, Err(TransportError::Connect(_))), "{:?}", outcome);
    assert_eq!(
        decide_verdict(&outcome, &FilterSet::default()),
        Verdict::TransportError
    );
}
