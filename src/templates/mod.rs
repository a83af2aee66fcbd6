//! Template rendering support for server-rendered pages.

mod context;
mod response;

pub use context::TemplateContext;
pub use response::HtmlTemplate;
