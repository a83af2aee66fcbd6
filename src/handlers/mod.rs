//! HTTP handlers and route registration.

mod auth;
mod health;
mod ingredients;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", get(health::health))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/ingredient", get(ingredients::index))
        .route(
            "/ingredient/new",
            get(ingredients::new_form).post(ingredients::create),
        )
        .route(
            "/ingredient/edit/{id}",
            get(ingredients::edit_form).post(ingredients::edit),
        )
        .route("/ingredient/delete/{id}", get(ingredients::delete))
        .with_state(state)
}
