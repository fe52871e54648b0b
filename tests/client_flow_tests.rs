// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end app flows against a live local server.
//!
//! The gate and the admin list are driven through [`ApiClient`] the same
//! way the app drives them.

use game_schedule::client::{ApiClient, ClientError};
use game_schedule::models::{AppRoute, GameInput};
use game_schedule::services::game_list::{Confirmation, DeleteOutcome, MonthFilter};
use game_schedule::services::gate::GateEffect;
use game_schedule::services::{GameListController, GateRunner, GateState, TeamDirectory};

mod common;

fn input(date: &str, home: &str, away: &str) -> GameInput {
    GameInput {
        date: date.to_string(),
        time: "17:00".to_string(),
        home_team_id: home.to_string(),
        away_team_id: away.to_string(),
        stadium: "Sajik".to_string(),
    }
}

#[tokio::test]
async fn test_gate_onboarding_flow() {
    let (app, _) = common::create_test_app();
    let base_url = common::spawn_server(app).await;
    let client = ApiClient::new(base_url);

    let mut runner = GateRunner::new(client.clone(), client.clone(), AppRoute::Tabs);
    assert_eq!(runner.state(), GateState::Initializing);

    // No stored session: sign in, become ready, send to onboarding
    let effects = runner.initialize().await;
    assert_eq!(
        effects,
        vec![
            GateEffect::SignInAnonymously,
            GateEffect::BecameReady,
            GateEffect::Redirect(AppRoute::Onboarding),
        ]
    );
    assert_eq!(runner.state(), GateState::Ready);
    assert!(client.session().is_some());

    assert!(runner.navigate(AppRoute::Onboarding).is_empty());

    client.set_selected_team("lotte").await.unwrap();
    let effects = runner.refresh_preference().await;
    assert_eq!(effects, vec![GateEffect::Redirect(AppRoute::Tabs)]);
    assert_eq!(runner.gate().selected_team(), Some("lotte"));

    assert!(runner.navigate(AppRoute::Tabs).is_empty());
}

#[tokio::test]
async fn test_gate_signs_in_again_after_sign_out() {
    let (app, _) = common::create_test_app();
    let base_url = common::spawn_server(app).await;
    let client = ApiClient::new(base_url);

    let mut runner = GateRunner::new(client.clone(), client.clone(), AppRoute::Tabs);
    runner.initialize().await;
    let first = client.session().unwrap().session_id;

    // The first sign-in is still queued as a change
    assert!(runner.next_session_change().await.unwrap().is_empty());

    client.sign_out();
    let effects = runner.next_session_change().await.unwrap();

    assert_eq!(effects, vec![GateEffect::SignInAnonymously]);
    let second = client.session().unwrap().session_id;
    assert_ne!(first, second);
    assert_eq!(runner.state(), GateState::Ready);
}

#[tokio::test]
async fn test_gate_with_stored_session_skips_sign_in() {
    let (app, _) = common::create_test_app();
    let base_url = common::spawn_server(app).await;

    let first = ApiClient::new(base_url.clone());
    let mut runner = GateRunner::new(first.clone(), first.clone(), AppRoute::Onboarding);
    runner.initialize().await;
    first.set_selected_team("kia").await.unwrap();
    let session = first.session().unwrap();

    // Next launch restores the session
    let client = ApiClient::new(base_url).with_session(session);
    let mut runner = GateRunner::new(client.clone(), client.clone(), AppRoute::Tabs);
    let effects = runner.initialize().await;

    assert_eq!(effects, vec![GateEffect::BecameReady]);
    assert_eq!(runner.gate().selected_team(), Some("kia"));
}

#[tokio::test]
async fn test_gate_fails_open_when_server_unreachable() {
    // Nothing listens on port 9 locally
    let client = ApiClient::new("http://127.0.0.1:9");
    let mut runner = GateRunner::new(client.clone(), client, AppRoute::Tabs);

    let effects = runner.initialize().await;

    assert!(effects.contains(&GateEffect::BecameReady));
    assert!(effects.contains(&GateEffect::Redirect(AppRoute::Onboarding)));
    assert_eq!(runner.state(), GateState::Ready);
}

#[tokio::test]
async fn test_admin_list_delete_flow() {
    let (app, _) = common::create_test_app();
    let base_url = common::spawn_server(app).await;
    let client = ApiClient::new(base_url).with_admin_key(common::ADMIN_KEY);

    let march = client
        .create_game(&input("2025-03-22", "lotte", "lg"))
        .await
        .unwrap();
    let april = client
        .create_game(&input("2025-04-01", "kia", "nc"))
        .await
        .unwrap();

    let filter = MonthFilter::new(2025, 3).unwrap();
    let mut list =
        GameListController::with_filter(client.clone(), TeamDirectory::default(), filter);
    assert!(list.load().await);
    assert!(!list.is_loading());
    assert_eq!(list.games().len(), 2);

    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, march.id);
    assert_eq!(rows[0].matchup, "LG Twins vs Lotte Giants");

    // Cancel leaves everything alone
    list.request_delete(&march.id);
    assert_eq!(
        list.resolve_delete(Confirmation::Cancel).await,
        DeleteOutcome::Cancelled
    );
    assert_eq!(list.games().len(), 2);

    // Confirm deletes and refetches
    let prompt = list.request_delete(&march.id);
    assert_eq!(prompt.message, "Are you sure?");
    assert_eq!(
        list.resolve_delete(Confirmation::Delete).await,
        DeleteOutcome::Deleted
    );
    assert_eq!(list.games().len(), 1);
    assert_eq!(list.games()[0].id, april.id);
    assert_eq!(
        list.empty_message().as_deref(),
        Some("No games found for 2025-3")
    );

    list.select_month(4);
    assert!(list.empty_message().is_none());
    assert_eq!(list.edit_route(&april.id).path(), format!("/admin/games/{}", april.id));
}

#[tokio::test]
async fn test_admin_update_round_trip() {
    let (app, _) = common::create_test_app();
    let base_url = common::spawn_server(app).await;
    let client = ApiClient::new(base_url).with_admin_key(common::ADMIN_KEY);

    let game = client
        .create_game(&input("2025-06-01", "ssg", "kt"))
        .await
        .unwrap();
    client
        .update_game(&game.id, &input("2025-06-02", "ssg", "kt"))
        .await
        .unwrap();

    let fetched = client.get_game(&game.id).await.unwrap();
    assert_eq!(fetched.date, "2025-06-02");

    match client.get_game("missing").await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected 404, got {:?}", other.map(|g| g.id)),
    }
}

#[tokio::test]
async fn test_admin_calls_need_key() {
    let (app, _) = common::create_test_app();
    let base_url = common::spawn_server(app).await;
    let client = ApiClient::new(base_url);

    let mut list = GameListController::with_filter(
        client,
        TeamDirectory::default(),
        MonthFilter::default(),
    );

    assert!(!list.load().await);
    let alert = list.take_alert().unwrap();
    assert_eq!(alert.title, "Error");
    assert_eq!(alert.message, "Failed to load games");
    assert!(list.games().is_empty());
}
