//! Login and logout pages.
//!
//! Identity is a plain username; there is no password or account store.
//! The username becomes the owner id on every ingredient the user creates.

use askama::Template;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::Result;
use crate::session::{FlashMessage, FlashMessages, UserSession};
use crate::templates::{HtmlTemplate, TemplateContext};

#[derive(Template)]
#[template(path = "pages/login.html")]
struct LoginTemplate {
    ctx: TemplateContext,
    username: String,
    error: Option<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginForm {
    #[serde(default)]
    username: String,
}

/// GET /login
pub(super) async fn login_page(user_session: UserSession, flash: FlashMessages) -> Response {
    if user_session.data().is_authenticated() {
        return Redirect::to("/ingredient").into_response();
    }

    let template = LoginTemplate {
        ctx: TemplateContext::new()
            .with_path("/login")
            .with_flash(flash.into_messages()),
        username: String::new(),
        error: None,
    };
    HtmlTemplate::page(template).into_response()
}

/// POST /login
pub(super) async fn login(
    mut user_session: UserSession,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let username = form.username.trim();
    if username.is_empty() {
        let template = LoginTemplate {
            ctx: TemplateContext::new().with_path("/login"),
            username: form.username.clone(),
            error: Some("Please enter a username."),
        };
        return Ok(HtmlTemplate::page(template)
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .into_response());
    }

    let username = username.to_string();
    user_session.login(&username).await?;
    tracing::info!(user = %username, "user logged in");

    FlashMessages::push(
        user_session.session(),
        FlashMessage::success(format!("Welcome, {username}!")),
    )
    .await?;
    Ok(Redirect::to("/ingredient").into_response())
}

/// POST /logout
pub(super) async fn logout(mut user_session: UserSession) -> Result<Response> {
    user_session.logout().await?;

    FlashMessages::push(
        user_session.session(),
        FlashMessage::info("You have been logged out."),
    )
    .await?;
    Ok(Redirect::to("/login").into_response())
}
