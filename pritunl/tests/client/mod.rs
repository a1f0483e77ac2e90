use std::time::Duration;

use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use pritunl::{CallScope, CancellationToken, ErrorKind, RequestOptions};
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[tokio::test]
async fn test_signed_headers_are_verifiable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut orgs: Vec<Value> = Vec::new();
    client
        .execute_into(
            &CallScope::new(),
            Method::GET,
            "/organization",
            RequestOptions::new(),
            &mut orgs,
        )
        .await
        .unwrap();

    let reqs = server.received_requests().await.unwrap();
    let req = &reqs[0];
    assert_eq!(header(req, "auth-token"), Some(TOKEN));
    assert_eq!(header(req, "auth-nonce").unwrap().len(), 32);
    assert!(header(req, "auth-timestamp").unwrap().parse::<i64>().is_ok());
    assert_eq!(header(req, "accept"), Some("application/json"));
    assert!(verify_signature(req, SECRET));
    assert!(!verify_signature(req, "another-secret"));
}

#[tokio::test]
async fn test_each_call_gets_a_fresh_nonce() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let scope = CallScope::new();
    for _ in 0..2 {
        client
            .execute(&scope, Method::GET, "/server", RequestOptions::new())
            .await
            .unwrap();
    }

    let reqs = server.received_requests().await.unwrap();
    assert_ne!(header(&reqs[0], "auth-nonce"), header(&reqs[1], "auth-nonce"));
}

#[tokio::test]
async fn test_query_is_appended_after_signing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server"))
        .and(query_param("page", "1"))
        .and(query_param("filter", "office vpn"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let opts = RequestOptions::new()
        .with_query("page", "1")
        .with_query("filter", "office vpn");
    client
        .execute(&CallScope::new(), Method::GET, "/server", opts)
        .await
        .unwrap();

    let reqs = server.received_requests().await.unwrap();
    assert_eq!(reqs[0].url.query(), Some("filter=office+vpn&page=1"));
    // The signature covers the bare path only.
    assert!(verify_signature(&reqs[0], SECRET));
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let opts = RequestOptions::new().with_json_body(&json!({"public_address": "192.170.1.163"}));
    client
        .execute(&CallScope::new(), Method::PUT, "/settings", opts)
        .await
        .unwrap();

    let reqs = server.received_requests().await.unwrap();
    assert_eq!(header(&reqs[0], "content-type"), Some("application/json"));
    let body: Value = serde_json::from_slice(&reqs[0].body).unwrap();
    assert_eq!(body, json!({"public_address": "192.170.1.163"}));
}

#[tokio::test]
async fn test_raw_body_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let opts = RequestOptions::new()
        .with_raw_body("name=alice")
        .with_header("Content-Type", "application/x-www-form-urlencoded");
    client
        .execute(&CallScope::new(), Method::POST, "/user/o1", opts)
        .await
        .unwrap();

    let reqs = server.received_requests().await.unwrap();
    assert_eq!(reqs[0].body, b"name=alice".to_vec());
    assert_eq!(
        header(&reqs[0], "content-type"),
        Some("application/x-www-form-urlencoded")
    );
}

#[tokio::test]
async fn test_both_bodies_fail_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let opts = RequestOptions::new()
        .with_json_body(&json!({"name": "alice"}))
        .with_raw_body("name=alice");
    let err = client
        .execute(&CallScope::new(), Method::POST, "/user/o1", opts)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(err.is_input_error());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_auth_headers_override_caller_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let opts = RequestOptions::new()
        .with_header("Auth-Token", "spoofed")
        .with_header("X-Request-Id", "42")
        .without_header("Content-Type");
    client
        .execute(&CallScope::new(), Method::GET, "/server", opts)
        .await
        .unwrap();

    let reqs = server.received_requests().await.unwrap();
    assert_eq!(header(&reqs[0], "auth-token"), Some(TOKEN));
    assert_eq!(header(&reqs[0], "x-request-id"), Some("42"));
    assert_eq!(header(&reqs[0], "content-type"), None);
}

#[test_case("GET", 200, true ; "get 200")]
#[test_case("GET", 201, false ; "get 201")]
#[test_case("HEAD", 200, true ; "head 200")]
#[test_case("POST", 201, true ; "post 201")]
#[test_case("POST", 202, true ; "post 202")]
#[test_case("POST", 204, false ; "post 204")]
#[test_case("PUT", 200, true ; "put 200")]
#[test_case("PUT", 204, false ; "put 204")]
#[test_case("PATCH", 201, false ; "patch 201")]
#[test_case("PATCH", 204, true ; "patch 204")]
#[test_case("DELETE", 201, false ; "delete 201")]
#[test_case("DELETE", 204, true ; "delete 204")]
#[test_case("DELETE", 404, false ; "delete 404")]
#[test_case("OPTIONS", 200, false ; "options 200")]
#[tokio::test]
async fn test_default_status_codes(verb: &str, status: u16, accepted: bool) {
    let server = MockServer::start().await;
    let body = if status == 204 { "" } else { "server says no" };
    Mock::given(method(verb))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let res = client
        .execute(
            &CallScope::new(),
            Method::from_bytes(verb.as_bytes()).unwrap(),
            "/server/s1",
            RequestOptions::new(),
        )
        .await;

    match res {
        Ok(resp) => {
            assert!(accepted, "{verb} {status} should be rejected");
            assert_eq!(resp.status().as_u16(), status);
        }
        Err(err) => {
            assert!(!accepted, "{verb} {status} should be accepted: {err}");
            assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
            assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
            assert!(err.to_string().contains(&status.to_string()));
            if verb != "HEAD" && status != 204 {
                assert_eq!(err.body(), Some(body));
                assert!(err.to_string().contains(body));
            }
        }
    }
}

#[tokio::test]
async fn test_ok_codes_override() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .execute(
            &CallScope::new(),
            Method::PUT,
            "/server/s1",
            RequestOptions::new().with_ok_codes([StatusCode::NO_CONTENT]),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_no_content_leaves_target_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut target = vec![1, 2, 3];
    let resp = client
        .execute_into(
            &CallScope::new(),
            Method::DELETE,
            "/server/s1/route/r1",
            RequestOptions::new(),
            &mut target,
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(target, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut target: Vec<Value> = Vec::new();
    let err = client
        .execute_into(
            &CallScope::new(),
            Method::GET,
            "/admin",
            RequestOptions::new(),
            &mut target,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_keep_body_hands_over_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/key/o1/u1.tar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"raw archive".to_vec()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .execute(
            &CallScope::new(),
            Method::GET,
            "/key/o1/u1.tar",
            RequestOptions::new().with_keep_body(true),
        )
        .await
        .unwrap();

    let body = resp.into_body().unwrap();
    assert_eq!(body.bytes().await.unwrap().as_ref(), b"raw archive");
}

#[tokio::test]
async fn test_drained_response_has_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .execute(&CallScope::new(), Method::GET, "/server", RequestOptions::new())
        .await
        .unwrap();
    assert!(resp.into_body().is_none());
}

#[tokio::test]
async fn test_keep_body_with_decode_target_is_rejected() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let mut target: Vec<Value> = Vec::new();
    let err = client
        .execute_into(
            &CallScope::new(),
            Method::GET,
            "/admin",
            RequestOptions::new().with_keep_body(true),
            &mut target,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancellation_aborts_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let token = CancellationToken::new();
    let scope = CallScope::new().with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });
    let err = client
        .execute(&scope, Method::GET, "/server", RequestOptions::new())
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_deadline_aborts_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let scope = CallScope::new().with_timeout(Duration::from_millis(100));
    let err = client
        .execute(&scope, Method::GET, "/server", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_cancelled_scope_does_not_leak_into_other_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .execute(
            &CallScope::new().with_cancellation(token),
            Method::GET,
            "/server",
            RequestOptions::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);

    client
        .execute(&CallScope::new(), Method::GET, "/server", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Reserve a free port and release it so nothing listens there.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = Config::new(addr.to_string(), Credential::new(TOKEN, SECRET)).with_scheme("http");

    let client = Client::new(config).unwrap();
    let err = client
        .execute(&CallScope::new(), Method::GET, "/server", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
