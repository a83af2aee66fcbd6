//! Ingredient pages: list, create, edit, delete.
//!
//! Every handler takes [`CurrentUser`], so anonymous requests are turned
//! away before any store access. Mutations check ownership against the
//! acting user and finish with a flash message and a redirect to the list.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::forms::{FormErrors, IngredientForm};
use crate::models::Ingredient;
use crate::pagination::{Page, Pagination};
use crate::session::{CurrentUser, FlashMessage, FlashMessages, SessionHandle};
use crate::state::AppState;
use crate::templates::{HtmlTemplate, TemplateContext};

/// Ingredients shown per listing page.
pub const PAGE_SIZE: u64 = 10;

#[derive(Template)]
#[template(path = "pages/ingredients/index.html")]
struct IndexTemplate {
    ctx: TemplateContext,
    page: Page<Ingredient>,
}

#[derive(Template)]
#[template(path = "pages/ingredients/form.html")]
struct FormTemplate {
    ctx: TemplateContext,
    title: &'static str,
    action: String,
    form: IngredientForm,
    errors: FormErrors,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PageQuery {
    // Kept as a raw string: a negative or garbage value falls back to
    // page 1 instead of failing query deserialization with a 400.
    page: Option<String>,
}

impl PageQuery {
    /// The requested page; absent, non-positive, or unparseable values
    /// are treated as page 1.
    fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1)
    }
}

/// GET /ingredient
pub(super) async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
    flash: FlashMessages,
    Query(query): Query<PageQuery>,
) -> Result<Response> {
    let page_number = query.page();
    let items = state
        .store
        .find_by_owner(&user.id, Pagination::page(page_number, PAGE_SIZE))
        .await?;
    let total = state.store.count_by_owner(&user.id).await?;

    let template = IndexTemplate {
        ctx: TemplateContext::new()
            .with_path("/ingredient")
            .with_user(Some(user.id))
            .with_flash(flash.into_messages()),
        page: Page::new(items, page_number, PAGE_SIZE, total),
    };
    Ok(HtmlTemplate::page(template).into_response())
}

/// GET /ingredient/new
pub(super) async fn new_form(user: CurrentUser, flash: FlashMessages) -> Response {
    let template = FormTemplate {
        ctx: TemplateContext::new()
            .with_path("/ingredient/new")
            .with_user(Some(user.id))
            .with_flash(flash.into_messages()),
        title: "New ingredient",
        action: "/ingredient/new".to_string(),
        form: IngredientForm::default(),
        errors: FormErrors::default(),
    };
    HtmlTemplate::page(template).into_response()
}

/// POST /ingredient/new
pub(super) async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    session: SessionHandle,
    Form(form): Form<IngredientForm>,
) -> Result<Response> {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            let template = FormTemplate {
                ctx: TemplateContext::new()
                    .with_path("/ingredient/new")
                    .with_user(Some(user.id)),
                title: "New ingredient",
                action: "/ingredient/new".to_string(),
                form,
                errors,
            };
            return Ok(HtmlTemplate::page(template)
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
    };

    // Ownership comes from the session, never from the form.
    let ingredient = Ingredient::new(draft, user.id);
    state.store.insert(&ingredient).await?;
    tracing::info!(id = %ingredient.id, owner = %ingredient.owner_id, "ingredient created");

    FlashMessages::push(
        &session.0,
        FlashMessage::success("Your ingredient has been created."),
    )
    .await?;
    Ok(Redirect::to("/ingredient").into_response())
}

/// GET /ingredient/edit/{id}
pub(super) async fn edit_form(
    State(state): State<AppState>,
    user: CurrentUser,
    flash: FlashMessages,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let ingredient = load_owned(&state, id, &user).await?;

    let template = FormTemplate {
        ctx: TemplateContext::new()
            .with_path("/ingredient")
            .with_user(Some(user.id))
            .with_flash(flash.into_messages()),
        title: "Edit ingredient",
        action: format!("/ingredient/edit/{id}"),
        form: IngredientForm::from_ingredient(&ingredient),
        errors: FormErrors::default(),
    };
    Ok(HtmlTemplate::page(template).into_response())
}

/// POST /ingredient/edit/{id}
pub(super) async fn edit(
    State(state): State<AppState>,
    user: CurrentUser,
    session: SessionHandle,
    Path(id): Path<Uuid>,
    Form(form): Form<IngredientForm>,
) -> Result<Response> {
    let mut ingredient = load_owned(&state, id, &user).await?;

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            let template = FormTemplate {
                ctx: TemplateContext::new()
                    .with_path("/ingredient")
                    .with_user(Some(user.id)),
                title: "Edit ingredient",
                action: format!("/ingredient/edit/{id}"),
                form,
                errors,
            };
            return Ok(HtmlTemplate::page(template)
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
    };

    ingredient.apply(draft);
    state.store.update(&ingredient).await?;
    tracing::info!(id = %ingredient.id, owner = %ingredient.owner_id, "ingredient updated");

    FlashMessages::push(
        &session.0,
        FlashMessage::info("Your ingredient has been updated."),
    )
    .await?;
    Ok(Redirect::to("/ingredient").into_response())
}

/// GET /ingredient/delete/{id}
pub(super) async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    session: SessionHandle,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    // Ownership is checked before deleting, same as for edits.
    let ingredient = load_owned(&state, id, &user).await?;

    if !state.store.delete(ingredient.id).await? {
        return Err(Error::NotFound("ingredient".to_string()));
    }
    tracing::info!(id = %ingredient.id, owner = %ingredient.owner_id, "ingredient deleted");

    FlashMessages::push(
        &session.0,
        FlashMessage::warning("Your ingredient has been deleted."),
    )
    .await?;
    Ok(Redirect::to("/ingredient").into_response())
}

/// Load an ingredient and verify it belongs to the acting user.
async fn load_owned(state: &AppState, id: Uuid, user: &CurrentUser) -> Result<Ingredient> {
    let ingredient = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("ingredient".to_string()))?;

    if !ingredient.is_owned_by(&user.id) {
        tracing::warn!(id = %id, user = %user.id, "ownership check failed");
        return Err(Error::Forbidden(
            "You do not have access to this ingredient.".to_string(),
        ));
    }
    Ok(ingredient)
}
