//! End-to-end tests over the router with an in-memory store and sessions.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use pantry_service::{
    AppState,
    config::SessionConfig,
    handlers,
    models::{Ingredient, IngredientDraft},
    session::create_session_layer,
    store::{IngredientStore, MemoryIngredientStore},
};

fn test_app() -> (Router, Arc<MemoryIngredientStore>) {
    let store = Arc::new(MemoryIngredientStore::new());
    let state = AppState::new(store.clone());

    let session_config = SessionConfig {
        secure: false,
        ..SessionConfig::default()
    };

    let app = handlers::router(state).layer(create_session_layer(&session_config));
    (app, store)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn login(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/login", None, &format!("username={username}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ingredient");
    session_cookie(&response)
}

fn ingredient_owned_by(owner: &str, name: &str) -> Ingredient {
    Ingredient::new(
        IngredientDraft {
            name: name.to_string(),
            unit: "g".to_string(),
            quantity: 100.0,
            price: None,
        },
        owner,
    )
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn anonymous_requests_are_redirected_to_login() {
    let (app, _) = test_app();

    let edit_uri = format!("/ingredient/edit/{}", Uuid::new_v4());
    let delete_uri = format!("/ingredient/delete/{}", Uuid::new_v4());
    for uri in [
        "/ingredient",
        "/ingredient/new",
        edit_uri.as_str(),
        delete_uri.as_str(),
    ] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri {uri}");
        assert_eq!(location(&response), "/login", "uri {uri}");
    }
}

#[tokio::test]
async fn login_requires_a_username() {
    let (app, _) = test_app();
    let response = app
        .oneshot(form_post("/login", None, "username=++"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_then_list_shows_the_ingredient() {
    let (app, _) = test_app();
    let cookie = login(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(form_post(
            "/ingredient/new",
            Some(&cookie),
            "name=Flour&unit=g&quantity=500",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ingredient");

    let response = app
        .clone()
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Flour"));
    assert!(body.contains("Your ingredient has been created."));
    assert!(body.contains("flash-success"));

    // Flash messages are shown exactly once.
    let response = app
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(!body.contains("Your ingredient has been created."));
}

#[tokio::test]
async fn invalid_create_re_renders_and_persists_nothing() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(form_post(
            "/ingredient/new",
            Some(&cookie),
            "name=&unit=g&quantity=0",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Name is required."));
    assert!(body.contains("Quantity must be greater than zero."));

    assert_eq!(store.count_by_owner("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn owner_comes_from_the_session_not_the_form() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    // A forged owner_id field in the form body is ignored.
    let response = app
        .oneshot(form_post(
            "/ingredient/new",
            Some(&cookie),
            "name=Salt&unit=g&quantity=10&owner_id=eve",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(store.count_by_owner("alice").await.unwrap(), 1);
    assert_eq!(store.count_by_owner("eve").await.unwrap(), 0);
}

#[tokio::test]
async fn edit_updates_and_flashes_info() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    let ingredient = ingredient_owned_by("alice", "Sugar");
    store.insert(&ingredient).await.unwrap();

    let response = app
        .clone()
        .oneshot(form_post(
            &format!("/ingredient/edit/{}", ingredient.id),
            Some(&cookie),
            "name=Brown+sugar&unit=kg&quantity=2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ingredient");

    let response = app
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Brown sugar"));
    assert!(body.contains("Your ingredient has been updated."));
    assert!(body.contains("flash-info"));

    let stored = store.find_by_id(ingredient.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Brown sugar");
    assert_eq!(stored.owner_id, "alice");
}

#[tokio::test]
async fn non_owner_cannot_edit_or_delete() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    let ingredient = ingredient_owned_by("bob", "Pepper");
    store.insert(&ingredient).await.unwrap();

    let edit_uri = format!("/ingredient/edit/{}", ingredient.id);
    let response = app
        .clone()
        .oneshot(get(&edit_uri, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(form_post(&edit_uri, Some(&cookie), "name=X&unit=g&quantity=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get(
            &format!("/ingredient/delete/{}", ingredient.id),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The record is untouched.
    let stored = store.find_by_id(ingredient.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Pepper");
}

#[tokio::test]
async fn delete_flashes_warning_and_is_not_repeatable() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    let ingredient = ingredient_owned_by("alice", "Basil");
    store.insert(&ingredient).await.unwrap();

    let delete_uri = format!("/ingredient/delete/{}", ingredient.id);
    let response = app
        .clone()
        .oneshot(get(&delete_uri, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ingredient");

    let response = app
        .clone()
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Your ingredient has been deleted."));
    assert!(body.contains("flash-warning"));

    let response = app.oneshot(get(&delete_uri, Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_shows_only_the_users_ingredients() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    store
        .insert(&ingredient_owned_by("alice", "Olive oil"))
        .await
        .unwrap();
    store
        .insert(&ingredient_owned_by("bob", "Vinegar"))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Olive oil"));
    assert!(!body.contains("Vinegar"));
}

#[tokio::test]
async fn listing_is_paginated_by_ten() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    // Explicit timestamps make the listing order deterministic.
    let base = Utc::now();
    for i in 0..25i64 {
        let ingredient = Ingredient {
            id: Uuid::new_v4(),
            name: format!("Item {i:02}"),
            unit: "g".to_string(),
            quantity: 1.0,
            price: None,
            owner_id: "alice".to_string(),
            created_at: base + chrono::Duration::seconds(i),
        };
        store.insert(&ingredient).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Item 00"));
    assert!(body.contains("Item 09"));
    assert!(!body.contains("Item 10"));
    assert!(body.contains("Page 1 of 3"));

    let response = app
        .oneshot(get("/ingredient?page=3", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Item 20"));
    assert!(body.contains("Item 24"));
    assert!(!body.contains("Item 19"));
    assert!(body.contains("Page 3 of 3"));
}

#[tokio::test]
async fn huge_page_number_yields_an_empty_page() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    store
        .insert(&ingredient_owned_by("alice", "Thyme"))
        .await
        .unwrap();

    let response = app
        .oneshot(get(
            "/ingredient?page=18446744073709551615",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(!body.contains("Thyme"));
    assert!(body.contains("You have no ingredients yet."));
}

#[tokio::test]
async fn negative_page_number_defaults_to_the_first_page() {
    let (app, store) = test_app();
    let cookie = login(&app, "alice").await;

    store
        .insert(&ingredient_owned_by("alice", "Rosemary"))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/ingredient?page=-1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Rosemary"));
    assert!(body.contains("Page 1 of 1"));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, _) = test_app();
    let cookie = login(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(form_post("/logout", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app
        .oneshot(get("/ingredient", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn missing_ingredient_is_a_404() {
    let (app, _) = test_app();
    let cookie = login(&app, "alice").await;

    let response = app
        .oneshot(get(
            &format!("/ingredient/edit/{}", Uuid::new_v4()),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
