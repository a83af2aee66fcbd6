//! Askama template to HTTP response conversion.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Wrapper rendering an askama template as an HTML response.
///
/// Rendering failures are logged and collapsed into a bare 500; template
/// errors are programming errors, not user-facing conditions.
pub struct HtmlTemplate<T: Template> {
    template: T,
    status: StatusCode,
}

impl<T: Template> HtmlTemplate<T> {
    /// Render a full page with status 200.
    #[must_use]
    pub fn page(template: T) -> Self {
        Self {
            template,
            status: StatusCode::OK,
        }
    }

    /// Override the HTTP status code, e.g. 422 for a form re-render.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!("template rendering error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
