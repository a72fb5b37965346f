use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserChanges};

/// Errors raised by user storage adapters
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User id already exists: {0}")]
    DuplicateId(u64),

    #[error("User id out of storage range: {0}")]
    IdOutOfRange(u64),

    #[error("Corrupt user row: {0}")]
    CorruptRow(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for the User entity
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the row as stored
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;

    /// Find a user by ID
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<User>>;

    /// Apply a partial update, returning the number of rows affected
    ///
    /// Empty change sets never reach storage and report zero rows.
    async fn update(&self, id: u64, changes: &UserChanges) -> RepositoryResult<u64>;

    /// Delete a user by ID, returning the number of rows affected
    async fn delete(&self, id: u64) -> RepositoryResult<u64>;
}
