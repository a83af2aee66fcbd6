//! Shared context passed to every page template.

use crate::session::FlashMessage;

/// Common data every rendered page needs: flash messages, the current
/// path for navigation highlighting, and the authenticated user.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Flash messages consumed from the session
    pub flash_messages: Vec<FlashMessage>,
    /// Current request path
    pub current_path: String,
    /// Whether a user is logged in
    pub is_authenticated: bool,
    /// The logged-in user identity, if any
    pub user_id: Option<String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current request path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.current_path = path.into();
        self
    }

    /// Set the authenticated user.
    #[must_use]
    pub fn with_user(mut self, user_id: Option<String>) -> Self {
        self.is_authenticated = user_id.is_some();
        self.user_id = user_id;
        self
    }

    /// Attach consumed flash messages.
    #[must_use]
    pub fn with_flash(mut self, messages: Vec<FlashMessage>) -> Self {
        self.flash_messages = messages;
        self
    }

    /// Whether the given path is the current one.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}
