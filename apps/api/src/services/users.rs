//! Registration and login.
//!
//! `/login` and `/api/login` are the same handler.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use estoque_core::validation::{validate_full_name, validate_password, validate_username};

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Body of `POST /api/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub full_name: String,
}

/// Form of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// `POST /api/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(input) = payload?;
    let username = input.username.trim().to_string();
    validate_username(&username)?;
    validate_password(&input.password)?;
    validate_full_name(&input.full_name)?;

    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Hashing task failed: {e}")))??;

    let user = state
        .db
        .users()
        .create(&username, &password_hash, input.full_name.trim())
        .await?;
    info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(UserResponse {
        username: user.username,
        full_name: user.full_name,
    }))
}

/// `POST /login`, `POST /api/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Form(form) = form?;
    let username = form.username.trim().to_string();

    let user = state.db.users().find_by_username(&username).await?;
    let Some(user) = user else {
        warn!(username = %username, "Login for unknown user");
        return Err(bad_credentials());
    };

    let password = form.password;
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::internal(format!("Verification task failed: {e}")))?;
    if !valid {
        warn!(username = %username, "Login with wrong password");
        return Err(bad_credentials());
    }

    let access_token = state.jwt.generate_access_token(&user.username)?;
    info!(username = %user.username, "User logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

fn bad_credentials() -> ApiError {
    ApiError::unauthorized("Incorrect username or password")
}
