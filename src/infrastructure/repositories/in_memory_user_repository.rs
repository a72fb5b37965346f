use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{NewUser, User, UserChanges};

/// In-process implementation of UserRepository
///
/// Assigns ids the way an auto-increment column does: one past the highest
/// id stored so far, explicit ids included.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<u64, User>,
    last_assigned: u64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let mut inner = self.inner.write().await;

        let id = match user.id.filter(|id| *id != 0) {
            Some(id) => id,
            None => {
                inner.last_assigned += 1;
                inner.last_assigned
            }
        };

        if inner.rows.contains_key(&id) {
            return Err(RepositoryError::DuplicateId(id));
        }

        inner.last_assigned = inner.last_assigned.max(id);
        let user = user.into_user(id);
        inner.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<User>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: u64, changes: &UserChanges) -> RepositoryResult<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(user) => {
                changes.apply_to(user);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: u64) -> RepositoryResult<u64> {
        let removed = self.inner.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
