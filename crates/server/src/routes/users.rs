//! User route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use fruitvendor_core::{Error, User, UserId};

use super::{blocking, path_id};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// Body of `POST /api/users` and `PATCH /api/users/{id}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserRequest {
    pub user: Option<User>,
}

/// List users. The redb store answers `501 Not Implemented`.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let service = state.users();
    let users = blocking(move || service.users()).await?;
    Ok(Json(UsersResponse { users }))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: std::result::Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserResponse>> {
    let id = path_id(path, Error::UserIdRequired)?;
    let service = state.users();
    let user = blocking(move || service.user(&id)).await?;
    Ok(Json(UserResponse { user }))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(request) = payload?;
    let mut user = request.user.ok_or(Error::UserRequired)?;

    let service = state.users();
    let user = blocking(move || {
        service.create_user(&mut user)?;
        Ok(user)
    })
    .await?;

    Ok(Json(UserResponse { user }))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    path: std::result::Result<Path<UserId>, PathRejection>,
    payload: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let id = path_id(path, Error::UserIdRequired)?;
    let Json(request) = payload?;
    let user = request.user.ok_or(Error::UserRequired)?;

    let service = state.users();
    let user = blocking(move || service.update_user(&id, &user)).await?;
    Ok(Json(UserResponse { user }))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    path: std::result::Result<Path<UserId>, PathRejection>,
) -> Result<Json<Value>> {
    let id = path_id(path, Error::UserIdRequired)?;
    let service = state.users();
    blocking(move || service.delete_user(&id)).await?;
    Ok(Json(json!({})))
}
