use std::sync::Arc;

use ua_request::Transport;

// Every test here initializes with the same service name, so parallel
// execution within this binary cannot observe mixed values.

#[test]
fn replace_defaults_is_idempotent() {
    ua_request::init_service_name("orders-svc");
    ua_request::replace_defaults();
    ua_request::replace_defaults();

    assert!(Arc::ptr_eq(
        &ua_request::default_client(),
        &ua_request::decorated_client()
    ));
    let decorated: Arc<dyn Transport> = ua_request::decorated_transport();
    assert!(Arc::ptr_eq(&ua_request::default_transport(), &decorated));
}

#[tokio::test]
async fn ambient_client_carries_user_agent() {
    ua_request::init_service_name("orders-svc");

    let mut server = mockito::Server::new_async().await;
    let ua = ua_request::user_agent();
    let mock = server
        .mock("GET", "/hello")
        .match_header("user-agent", ua.as_str())
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("world")
        .create();
    let url = server.url();

    // The ambient path and an explicitly held decorated client are
    // indistinguishable on the wire.
    let res = ua_request::get(&format!("{url}/hello")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "world");

    let res = ua_request::decorated_client().get(&format!("{url}/hello")).await.unwrap();
    assert_eq!(res.status(), 200);

    mock.expect(2).assert();
}

#[tokio::test]
async fn concurrent_requests_all_echo_user_agent() {
    ua_request::init_service_name("orders-svc");

    let mut server = mockito::Server::new_async().await;
    let ua = ua_request::user_agent();
    let mock = server
        .mock("GET", "/echo")
        .match_header("user-agent", ua.as_str())
        .with_body_from_request(|request| {
            request
                .header("user-agent")
                .first()
                .map(|value| value.as_bytes().to_vec())
                .unwrap_or_default()
        })
        .create();
    let url = server.url();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let url = format!("{url}/echo");
        handles.push(tokio::spawn(async move { ua_request::get(&url).await }));
    }
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.text().await.unwrap(), ua);
    }

    mock.expect(8).assert();
}

#[tokio::test]
async fn decorated_transport_delegates_exactly_once() {
    ua_request::init_service_name("orders-svc");

    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/once").with_status(204).create();
    let url = server.url();

    let request = ua_request::new_request(ua_request::Method::GET, &format!("{url}/once"), None).unwrap();
    let response = ua_request::decorated_client().execute(request).await.unwrap();
    assert_eq!(response.status(), 204);

    mock.expect(1).assert();
}

#[tokio::test]
async fn original_client_bypasses_decoration() {
    ua_request::init_service_name("orders-svc");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/plain")
        .match_header("user-agent", mockito::Matcher::Missing)
        .with_status(200)
        .create();
    let url = server.url();

    let res = ua_request::original_client()
        .get(format!("{url}/plain"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    mock.expect(1).assert();
}
