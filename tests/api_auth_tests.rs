// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication, preference and CORS tests.
//!
//! These tests verify that:
//! 1. Session routes reject requests without valid tokens
//! 2. Anonymous sign-in issues a working token
//! 3. Team preferences are validated and drive the gate endpoint
//! 4. CORS preflight and security headers are in place

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn put_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn sign_in(app: &axum::Router) -> (String, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/anonymous")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));

    let body = common::body_json(response).await;
    (
        body["session_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/api/preferences", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(get("/api/preferences", Some("invalid.token.here")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let (app, _) = common::create_test_app();
    let token = common::create_test_jwt("s1", b"some_other_key_of_32_bytes_long!");

    let response = app
        .oneshot(get("/api/preferences", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_auth() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("cookie-session", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/preferences")
                .header(header::COOKIE, format!("session_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_sign_in_creates_session() {
    let (app, _) = common::create_test_app();
    let (session_id, token) = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(get("/api/session", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["session_id"], session_id);
    assert_eq!(body["anonymous"], true);
}

#[tokio::test]
async fn test_each_sign_in_is_a_new_session() {
    let (app, _) = common::create_test_app();
    let (first, _) = sign_in(&app).await;
    let (second, _) = sign_in(&app).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_preference_round_trip() {
    let (app, _) = common::create_test_app();
    let (_, token) = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(get("/api/preferences", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["selected_team"].is_null());

    let response = app
        .clone()
        .oneshot(put_json(
            "/api/preferences",
            &token,
            json!({ "selected_team": "kia" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/preferences", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["selected_team"], "kia");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/preferences")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get("/api/preferences", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["selected_team"].is_null());
}

#[tokio::test]
async fn test_unknown_team_rejected() {
    let (app, _) = common::create_test_app();
    let (_, token) = sign_in(&app).await;

    for body in [json!({ "selected_team": "yankees" }), json!({ "selected_team": null })] {
        let response = app
            .clone()
            .oneshot(put_json("/api/preferences", &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_teams_listed() {
    let (app, _) = common::create_test_app();
    let (_, token) = sign_in(&app).await;

    let response = app.oneshot(get("/api/teams", Some(&token))).await.unwrap();
    let body = common::body_json(response).await;
    let teams = body.as_array().unwrap();

    assert_eq!(teams.len(), 10);
    assert!(teams.iter().any(|t| t["id"] == "lg" && t["name"] == "LG Twins"));
}

#[tokio::test]
async fn test_gate_endpoint_redirects() {
    let (app, _) = common::create_test_app();
    let (_, token) = sign_in(&app).await;

    // No team yet, on the tabs: go to onboarding
    let response = app
        .clone()
        .oneshot(get("/api/gate?route=/(app)/(tabs)", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["state"], "ready");
    assert_eq!(body["redirect"], "/(app)/onboarding");

    // No team, already on onboarding: stay
    let response = app
        .clone()
        .oneshot(get("/api/gate?route=/(app)/onboarding", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["redirect"].is_null());

    app.clone()
        .oneshot(put_json(
            "/api/preferences",
            &token,
            json!({ "selected_team": "lotte" }),
        ))
        .await
        .unwrap();

    // Team picked while on onboarding: go to tabs
    let response = app
        .oneshot(get("/api/gate?route=/(app)/onboarding", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["selected_team"], "lotte");
    assert_eq!(body["redirect"], "/(app)/(tabs)");
}

#[tokio::test]
async fn test_database_failure_is_500() {
    let (app, state) = common::create_offline_app();
    let token = common::create_test_jwt("s1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(get("/api/preferences", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "database_error");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/preferences")
                .header(header::ORIGIN, "http://localhost:8081")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
}
