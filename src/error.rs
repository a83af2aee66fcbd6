//! Error types and HTTP response conversion
//!
//! Failures surface the way a server-rendered application expects them to:
//! missing authentication redirects to the login page, authorization and
//! lookup failures render small HTML error pages, and everything else is
//! logged and collapsed into a generic 500 page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias using the application error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// No authenticated identity present
    #[error("authentication required")]
    Unauthorized,

    /// Authenticated but not allowed to act on the resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Session read or write failed
    #[error("session error: {0}")]
    Session(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorTemplate {
    status: u16,
    title: &'static str,
    message: String,
}

fn error_page(status: StatusCode, title: &'static str, message: String) -> Response {
    let template = ErrorTemplate {
        status: status.as_u16(),
        title,
        message,
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!("error page rendering failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, title).into_response()
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Login flow is the external collaborator for missing identity.
            Error::Unauthorized => Redirect::to("/login").into_response(),

            Error::Forbidden(msg) => {
                tracing::warn!("forbidden: {msg}");
                error_page(
                    StatusCode::FORBIDDEN,
                    "Access denied",
                    "You do not have access to this resource.".to_string(),
                )
            }

            Error::NotFound(what) => error_page(
                StatusCode::NOT_FOUND,
                "Not found",
                format!("No such {what}."),
            ),

            Error::Store(StoreError::NotFound) => error_page(
                StatusCode::NOT_FOUND,
                "Not found",
                "No such record.".to_string(),
            ),

            Error::Store(err) => {
                tracing::error!(error = %err, "store error");
                generic_error_page()
            }

            Error::Session(msg) => {
                tracing::error!("session error: {msg}");
                generic_error_page()
            }

            Error::Config(err) => {
                tracing::error!("configuration error: {err}");
                generic_error_page()
            }

            Error::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                generic_error_page()
            }
        }
    }
}

fn generic_error_page() -> Response {
    error_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong",
        "An unexpected error occurred. Please try again later.".to_string(),
    )
}
