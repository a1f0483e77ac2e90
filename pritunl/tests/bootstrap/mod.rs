// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use pretty_assertions::assert_eq;
use pritunl::{bootstrap, BootstrapRequest, CallScope, Deployment, ErrorKind};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const NEW_TOKEN: &str = "IUKPQDVpZhbYDyqEJMCCDzhlJeTBwgcV";
const NEW_SECRET: &str = "2YJbp0QWdYvqDdZgSRaKU4bYJLqzN1yE";

async fn mount(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a fresh pritunl install with its default admin, organization and route.
async fn fresh_install(server: &MockServer) {
    mount(
        server,
        "GET",
        "/admin",
        200,
        json!([
            {"id": "a0", "username": "operator", "auth_api": false, "super_user": false},
            {"id": "a1", "username": "pritunl", "auth_api": false, "super_user": true}
        ]),
    )
    .await;
    mount(
        server,
        "PUT",
        "/admin/a1",
        200,
        json!({
            "id": "a1",
            "username": "pritunl",
            "auth_api": true,
            "token": NEW_TOKEN,
            "secret": NEW_SECRET,
            "super_user": true
        }),
    )
    .await;
    mount(
        server,
        "POST",
        "/server",
        200,
        json!({
            "id": "s1",
            "name": "server_Ab3dE",
            "network": "10.12.12.0/24",
            "port": 15724,
            "protocol": "udp",
            "status": "offline"
        }),
    )
    .await;
    mount(
        server,
        "PUT",
        "/server/s1/organization/o1",
        200,
        json!({"id": "o1", "server": "s1", "name": "default"}),
    )
    .await;
    mount(
        server,
        "GET",
        "/server/s1/route",
        200,
        json!([
            {"id": "r0", "server": "s1", "network": "0.0.0.0/0", "nat": true}
        ]),
    )
    .await;
    mount(server, "DELETE", "/server/s1/route/r0", 200, json!({})).await;
    mount(
        server,
        "POST",
        "/server/s1/route",
        200,
        json!({"id": "r1", "server": "s1", "network": "10.10.0.0/16", "nat": false}),
    )
    .await;
    mount(
        server,
        "PUT",
        "/server/s1/operation/start",
        200,
        json!({"id": "s1", "name": "server_Ab3dE", "status": "online"}),
    )
    .await;
    mount(server, "PUT", "/settings", 200, json!({})).await;
}

fn request(server: &MockServer) -> BootstrapRequest {
    init_logger();
    BootstrapRequest::new(
        test_config(server, TOKEN, SECRET),
        "192.170.1.163",
        "10.10.0.0/16",
        false,
    )
}

fn calls(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(m, p)| (m.to_string(), p.to_string()))
        .collect()
}

#[tokio::test]
async fn test_bootstrap_fresh_install() {
    let server = MockServer::start().await;
    fresh_install(&server).await;
    mount(
        &server,
        "GET",
        "/organization",
        200,
        json!([
            {"id": "o0", "name": "contractors"},
            {"id": "o1", "name": "default"}
        ]),
    )
    .await;

    let deployment = bootstrap(&CallScope::new(), request(&server)).await.unwrap();

    assert_eq!(
        received_calls(&server).await,
        calls(&[
            ("GET", "/admin"),
            ("PUT", "/admin/a1"),
            ("POST", "/server"),
            ("GET", "/organization"),
            ("PUT", "/server/s1/organization/o1"),
            ("GET", "/server/s1/route"),
            ("DELETE", "/server/s1/route/r0"),
            ("POST", "/server/s1/route"),
            ("PUT", "/server/s1/operation/start"),
            ("PUT", "/settings"),
        ])
    );

    assert_eq!(
        deployment,
        Deployment {
            public_address: "192.170.1.163".to_string(),
            admin_user_id: "a1".to_string(),
            api_token: NEW_TOKEN.to_string(),
            api_secret: NEW_SECRET.to_string(),
            vpn_server_name: "server_Ab3dE".to_string(),
            vpn_server_id: "s1".to_string(),
            vpn_server_state: "online".to_string(),
            vpn_network: "10.12.12.0/24".to_string(),
            vpn_port: 15724,
            organization_id: "o1".to_string(),
            route: "10.10.0.0/16".to_string(),
            route_id: "r1".to_string(),
            route_use_nat: false,
        }
    );
}

#[tokio::test]
async fn test_bootstrap_switches_to_rotated_credential() {
    let server = MockServer::start().await;
    fresh_install(&server).await;
    mount(
        &server,
        "GET",
        "/organization",
        200,
        json!([{"id": "o1", "name": "default"}]),
    )
    .await;

    bootstrap(&CallScope::new(), request(&server)).await.unwrap();

    let reqs = server.received_requests().await.unwrap();
    let (before, after) = reqs.split_at(2);
    for req in before {
        assert_eq!(header(req, "auth-token"), Some(TOKEN));
        assert!(verify_signature(req, SECRET));
    }
    for req in after {
        assert_eq!(header(req, "auth-token"), Some(NEW_TOKEN), "{}", req.url);
        assert!(verify_signature(req, NEW_SECRET), "{}", req.url);
    }

    let route: Value = serde_json::from_slice(&reqs[7].body).unwrap();
    assert_eq!(
        route,
        json!({"server": "s1", "network": "10.10.0.0/16", "nat": false})
    );
    let settings: Value = serde_json::from_slice(&reqs[9].body).unwrap();
    assert_eq!(settings, json!({"public_address": "192.170.1.163"}));
}

#[tokio::test]
async fn test_bootstrap_missing_default_organization() {
    let server = MockServer::start().await;
    fresh_install(&server).await;
    mount(
        &server,
        "GET",
        "/organization",
        200,
        json!([{"id": "o0", "name": "contractors"}]),
    )
    .await;

    let err = bootstrap(&CallScope::new(), request(&server))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // The rotation already happened and is not rolled back.
    assert_eq!(
        received_calls(&server).await,
        calls(&[
            ("GET", "/admin"),
            ("PUT", "/admin/a1"),
            ("POST", "/server"),
            ("GET", "/organization"),
        ])
    );
}

#[tokio::test]
async fn test_bootstrap_missing_default_admin() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/admin",
        200,
        json!([{"id": "a0", "username": "operator"}]),
    )
    .await;

    let err = bootstrap(&CallScope::new(), request(&server))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(received_calls(&server).await, calls(&[("GET", "/admin")]));
}

#[tokio::test]
async fn test_bootstrap_stops_at_first_failure() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/admin",
        200,
        json!([{"id": "a1", "username": "pritunl"}]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/admin/a1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401: Unauthorized"))
        .mount(&server)
        .await;

    let err = bootstrap(&CallScope::new(), request(&server))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(
        received_calls(&server).await,
        calls(&[("GET", "/admin"), ("PUT", "/admin/a1")])
    );
}

#[tokio::test]
async fn test_bootstrap_rejects_invalid_address_without_io() {
    let server = MockServer::start().await;
    fresh_install(&server).await;

    let mut req = request(&server);
    req.public_address = "vpn.example.com".to_string();
    let err = bootstrap(&CallScope::new(), req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(server.received_requests().await.unwrap().is_empty());
}
