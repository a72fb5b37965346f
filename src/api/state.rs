use std::sync::Arc;

use crate::domain::repositories::UserRepository;

/// Shared handler state
///
/// Holds the storage capability injected at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
