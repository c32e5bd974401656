//! User handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Deserialize;
use tracker_core::User;

use super::with_tracker;
use crate::error::ApiResult;
use crate::extractors::JsonOrForm;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(create_user))
}

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    let username = request.username.unwrap_or_default();
    let user = with_tracker(&state, move |tracker| tracker.create_user(&username)).await?;
    Ok(Json(user))
}

/// List all users in creation order
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = with_tracker(&state, |tracker| tracker.list_users()).await?;
    Ok(Json(users))
}
