use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extractors::{parse_json_body, JsonBody, UserIdParam};
use crate::api::state::AppState;
use crate::domain::user::{NewUser, User, UserChanges};

/// Request body for user create and update
///
/// Every field may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    pub id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<UserPayload> for NewUser {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: payload.id,
            first_name: payload.first_name.unwrap_or_default(),
            last_name: payload.last_name.unwrap_or_default(),
            country: payload.country.unwrap_or_default(),
            profile_picture: payload.profile_picture.unwrap_or_default(),
        }
    }
}

impl From<UserPayload> for UserChanges {
    fn from(payload: UserPayload) -> Self {
        UserChanges::from_non_empty(
            payload.first_name,
            payload.last_name,
            payload.country,
            payload.profile_picture,
        )
    }
}

/// User as returned to clients
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub profile_picture: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            country: user.country,
            profile_picture: user.profile_picture,
        }
    }
}

/// Create a new user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.create(payload.into()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create user");
        ApiError::persistence("Failed to create a new user")
    })?;

    tracing::info!(user_id = user.id, "User created");
    Ok(Json(UserResponse::from(user)))
}

/// Update the non-empty fields of an existing user
///
/// PATCH /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    UserIdParam(id): UserIdParam,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<&'static str>, ApiError> {
    // Existence is checked before the body is looked at
    state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = id, error = %e, "Failed to look up user");
            ApiError::persistence("Failed to look up the user")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let payload: UserPayload = parse_json_body(&headers, &body)?;
    let changes = UserChanges::from(payload);

    if changes.is_empty() {
        tracing::info!(user_id = id, "No fields supplied, nothing to update");
        return Ok(Json("User updated successfully"));
    }

    state.users.update(id, &changes).await.map_err(|e| {
        tracing::error!(user_id = id, error = %e, "Failed to update user");
        ApiError::persistence("Failed to update the user")
    })?;

    tracing::info!(user_id = id, "User updated");
    Ok(Json("User updated successfully"))
}

/// Delete a user
///
/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdParam(id): UserIdParam,
) -> Result<Json<&'static str>, ApiError> {
    let rows_affected = state.users.delete(id).await.map_err(|e| {
        tracing::error!(user_id = id, error = %e, "Failed to delete user");
        ApiError::persistence("User could not be deleted")
    })?;

    if rows_affected == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(Json("User deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_accepts_nulls_and_missing_fields() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"first_name": null, "country": "PE"}"#).unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.first_name, None);
        assert_eq!(payload.country.as_deref(), Some("PE"));
    }

    #[test]
    fn payload_converts_to_new_user_with_defaults() {
        let payload: UserPayload = serde_json::from_str(r#"{"last_name": "Curie"}"#).unwrap();
        let new_user = NewUser::from(payload);

        assert_eq!(new_user.id, None);
        assert_eq!(new_user.first_name, "");
        assert_eq!(new_user.last_name, "Curie");
    }

    #[test]
    fn payload_converts_to_changes_without_empty_fields() {
        let payload: UserPayload = serde_json::from_str(
            r#"{"id": 9, "first_name": "", "last_name": "Curie", "profile_picture": ""}"#,
        )
        .unwrap();
        let changes = UserChanges::from(payload);

        assert_eq!(changes, UserChanges::default().last_name("Curie"));
    }

    #[test]
    fn response_serializes_all_fields() {
        let response = UserResponse::from(User {
            id: 3,
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            country: "PL".to_string(),
            profile_picture: String::new(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "id": 3,
                "first_name": "Marie",
                "last_name": "Curie",
                "country": "PL",
                "profile_picture": ""
            })
        );
    }
}
