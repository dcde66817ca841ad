use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{error, info};

use crate::{
    error::ServerError,
    models::{AuthResponse, AuthUser, LoginRequest, RegisterRequest, User},
    store::StoreError,
    AppState,
};

fn auth_response(state: &AppState, user: &User) -> Result<AuthResponse, ServerError> {
    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| ServerError::ServerError(e.to_string()))?;
    Ok(AuthResponse {
        user: AuthUser::from(user),
        token,
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ServerError::BadRequest(
            "Please provide all required fields".to_string(),
        ));
    }

    let user = state
        .users
        .create(&payload.name, &payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail => ServerError::BadRequest("User already exists".to_string()),
            StoreError::PasswordHash(e) => {
                error!("Password hashing failed: {}", e);
                ServerError::ServerError("Server error".to_string())
            }
        })?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ServerError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Please provide email and password".to_string(),
        ));
    }

    let user = state
        .users
        .authenticate(&payload.email, &payload.password)
        .await
        .ok_or_else(|| ServerError::Unauthorized("Invalid credentials".to_string()))?;

    Ok(Json(auth_response(&state, &user)?))
}

pub async fn me(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}
