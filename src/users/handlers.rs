use axum::{
    extract::{FromRef, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{info, instrument, warn};

use super::dto::{present, LoginRequest, RegisterRequest, UserResponse};
use super::repo::User;
use crate::{
    auth::{cookie::session_cookie, jwt::JwtKeys, password},
    error::ApiError,
    state::AppState,
};

fn require_registration(payload: &RegisterRequest) -> Result<(&str, &str, &str), ApiError> {
    match (
        present(&payload.name),
        present(&payload.email),
        present(&payload.password),
    ) {
        (Some(name), Some(email), Some(password)) => Ok((name, email, password)),
        _ => Err(ApiError::validation("Please provide all fields")),
    }
}

fn require_login(payload: &LoginRequest) -> Result<(&str, &str), ApiError> {
    match (present(&payload.email), present(&payload.password)) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ApiError::validation("Email and password are required.")),
    }
}

fn session_headers(keys: &JwtKeys, email: &str) -> Result<HeaderMap, ApiError> {
    let token = keys.sign(email)?;
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&token).parse().map_err(anyhow::Error::from)?,
    );
    Ok(headers)
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<UserResponse>), ApiError> {
    let (name, email, password) = require_registration(&payload)?;

    if User::find_by_email(&state.db, email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::conflict("Email already registered"));
    }

    let hash = password::hash_password(password)?;
    let id = User::create(&state.db, name, email, &hash).await?;

    // Re-fetch so the response carries the canonical stored row.
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Error in INSERT QUERY"))?;

    let headers = session_headers(&JwtKeys::from_ref(&state), email)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        headers,
        Json(UserResponse {
            success: true,
            message: "New User added successfully".into(),
            data: user,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, HeaderMap, Json<UserResponse>), ApiError> {
    let (email, password) = require_login(&payload)?;

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::not_found("User not found. Please check Email or Password.")
        })?;

    if !password::verify_password(password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::validation("Invalid password."));
    }

    let headers = session_headers(&JwtKeys::from_ref(&state), email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        StatusCode::OK,
        headers,
        Json(UserResponse {
            success: true,
            message: "User login successful".into(),
            data: user,
        }),
    ))
}
