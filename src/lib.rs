//! Pantry service: a server-rendered ingredient manager.
//!
//! Each authenticated user owns a set of ingredients and can list, create,
//! edit, and delete them through HTML pages. Ownership is enforced on every
//! mutating route; listing is paginated at ten items per page.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod session;
pub mod state;
pub mod store;
pub mod templates;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
