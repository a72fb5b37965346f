use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{NewUser, User, UserChanges};

/// PostgreSQL implementation of UserRepository
///
/// Ids are stored in a `BIGINT` column, so only the lower half of the
/// `u64` range is representable.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts under a caller-chosen id and moves the id sequence past it
    ///
    /// Both statements share one transaction so later assigned ids never
    /// land on an explicit one.
    async fn insert_with_id(&self, id: u64, user: &NewUser) -> RepositoryResult<UserRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, first_name, last_name, country, profile_picture)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, country, profile_picture
            "#,
        )
        .bind(to_db_id(id)?)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.country)
        .bind(&user.profile_picture)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, Some(id)))?;

        sqlx::query(
            r#"
            SELECT setval(pg_get_serial_sequence('users', 'id'), GREATEST(MAX(id), 1))
            FROM users
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    country: String,
    profile_picture: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id)
            .map_err(|_| RepositoryError::CorruptRow(format!("negative id {}", row.id)))?;

        Ok(User {
            id,
            first_name: row.first_name,
            last_name: row.last_name,
            country: row.country,
            profile_picture: row.profile_picture,
        })
    }
}

fn to_db_id(id: u64) -> RepositoryResult<i64> {
    i64::try_from(id).map_err(|_| RepositoryError::IdOutOfRange(id))
}

fn map_insert_error(err: sqlx::Error, id: Option<u64>) -> RepositoryError {
    match (&err, id) {
        (sqlx::Error::Database(db_err), Some(id)) if db_err.is_unique_violation() => {
            RepositoryError::DuplicateId(id)
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let requested_id = user.id.filter(|id| *id != 0);

        let row = match requested_id {
            Some(id) => self.insert_with_id(id, &user).await?,
            None => sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (first_name, last_name, country, profile_picture)
                VALUES ($1, $2, $3, $4)
                RETURNING id, first_name, last_name, country, profile_picture
                "#,
            )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.country)
            .bind(&user.profile_picture)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, None))?,
        };

        User::try_from(row)
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<User>> {
        // Ids past the BIGINT range cannot be stored, so they cannot be found
        let Ok(db_id) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, country, profile_picture
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, id: u64, changes: &UserChanges) -> RepositoryResult<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                country = COALESCE($3, country),
                profile_picture = COALESCE($4, profile_picture)
            WHERE id = $5
            "#,
        )
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.country.as_deref())
        .bind(changes.profile_picture.as_deref())
        .bind(to_db_id(id)?)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: u64) -> RepositoryResult<u64> {
        let Ok(db_id) = i64::try_from(id) else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(db_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_with_negative_id_is_rejected() {
        let row = UserRow {
            id: -1,
            first_name: String::new(),
            last_name: String::new(),
            country: String::new(),
            profile_picture: String::new(),
        };

        assert!(matches!(
            User::try_from(row),
            Err(RepositoryError::CorruptRow(_))
        ));
    }

    #[test]
    fn ids_beyond_bigint_are_out_of_range() {
        assert_eq!(to_db_id(42).unwrap(), 42);
        assert!(matches!(
            to_db_id(u64::MAX),
            Err(RepositoryError::IdOutOfRange(u64::MAX))
        ));
    }
}
