//! Tests for pokémon HTTP handlers.

use super::*;
use crate::domain::ports::MockPokemonCommand;
use crate::inbound::http::test_utils::{mock_state, test_app};
use crate::test_support::{InMemoryRegistry, StubPokemonCatalog, in_memory_http_state};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

async fn send(state: HttpState, request: TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn create(name: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/pokemons")
        .set_json(json!({ "name": name }))
}

fn state_with(catalog: StubPokemonCatalog) -> (InMemoryRegistry, Arc<StubPokemonCatalog>, HttpState) {
    let registry = InMemoryRegistry::new();
    let catalog = Arc::new(catalog);
    let state = in_memory_http_state(&registry, catalog.clone());
    (registry, catalog, state)
}

#[rstest]
#[actix_web::test]
async fn create_enriches_from_catalog() {
    let (_, catalog, state) = state_with(StubPokemonCatalog::with_defaults());

    let (status, body) = send(state, create("Pikachu")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Pikachu");
    assert_eq!(body["height"], 4);
    assert_eq!(body["weight"], 60);
    assert_eq!(body["photo"], "https://img.example/pikachu.png");
    assert_eq!(catalog.calls(), 1);
}

#[rstest]
#[actix_web::test]
async fn client_supplied_attributes_are_ignored() {
    let (_, catalog, state) = state_with(StubPokemonCatalog::with_defaults());

    let (status, body) = send(
        state,
        TestRequest::post().uri("/api/v1/pokemons").set_json(json!({
            "name": "Pikachu",
            "height": 999,
            "weight": 999,
            "photo": "https://evil.example/fake.png"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["weight"], 60);
    assert_eq!(catalog.calls(), 1);
}

#[rstest]
#[case::not_in_catalog(StubPokemonCatalog::with_defaults(), "Agumon", "catalog_not_found")]
#[case::catalog_down(StubPokemonCatalog::unavailable(), "Pikachu", "catalog_unavailable")]
#[actix_web::test]
async fn catalog_failures_reject_creation_without_persisting(
    #[case] catalog: StubPokemonCatalog,
    #[case] name: &str,
    #[case] code: &str,
) {
    let (registry, _, state) = state_with(catalog);

    let (status, body) = send(state, create(name)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], code);
    assert_eq!(registry.pokemon_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn duplicate_names_conflict_ignoring_case() {
    let (_, catalog, state) = state_with(StubPokemonCatalog::with_defaults());
    send(state.clone(), create("Pikachu")).await;

    let (status, body) = send(state, create("PIKACHU")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"]["code"], "duplicate_name");
    assert_eq!(catalog.calls(), 1);
}

#[rstest]
#[actix_web::test]
async fn rename_keeps_derived_attributes() {
    let (_, catalog, state) = state_with(StubPokemonCatalog::with_defaults());
    let (_, created) = send(state.clone(), create("Pikachu")).await;
    let id = created["id"].as_i64().expect("id");

    let (status, body) = send(
        state.clone(),
        TestRequest::put()
            .uri(&format!("/api/v1/pokemons/{id}/"))
            .set_json(json!({ "name": "Sparky" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sparky");
    assert_eq!(body["weight"], 60);
    assert_eq!(catalog.calls(), 1);

    let (status, body) = send(
        state,
        TestRequest::patch()
            .uri(&format!("/api/v1/pokemons/{id}"))
            .set_json(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sparky");
}

#[rstest]
#[actix_web::test]
async fn put_without_name_is_rejected() {
    let mut pokemons = MockPokemonCommand::new();
    pokemons.expect_update_pokemon().never();
    let mut state = mock_state();
    state.pokemons = Arc::new(pokemons);

    let (status, body) = send(
        state,
        TestRequest::put()
            .uri("/api/v1/pokemons/1")
            .set_json(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!({ "field": "name", "code": "missing_field" }));
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let (_, _, state) = state_with(StubPokemonCatalog::with_defaults());
    let (_, created) = send(state.clone(), create("Charizard")).await;
    let id = created["id"].as_i64().expect("id");

    let (status, _) = send(
        state.clone(),
        TestRequest::delete().uri(&format!("/api/v1/pokemons/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(state, TestRequest::get().uri(&format!("/api/v1/pokemons/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_returns_pokemon_in_id_order() {
    let (_, _, state) = state_with(StubPokemonCatalog::with_defaults());
    send(state.clone(), create("Snorlax")).await;
    send(state.clone(), create("Pikachu")).await;

    let (status, body) = send(state, TestRequest::get().uri("/api/v1/pokemons")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|pokemon| pokemon["name"].as_str())
        .collect();
    assert_eq!(names, ["Snorlax", "Pikachu"]);
    assert!(body[0]["photo"].is_null());
}
