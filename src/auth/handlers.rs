use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginData, LoginRequest, MeData, RegisterRequest},
        jwt::{CurrentUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::{is_unique_violation, User},
    },
    error::ApiError,
    response::ApiResponse,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        warn!("register request with missing fields");
        return Err(ApiError::validation(
            "Please provide name, email, and password",
        ));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Duplicate(
            "User with this email already exists".into(),
        ));
    }

    // Hashing happens exactly once, here; the stored record only ever holds
    // the hash.
    let hash = hash_password(&payload.password)?;

    let user = match User::create(&state.db, &payload.name, &payload.email, &hash).await {
        Ok(u) => u,
        // Lost a race against a concurrent registration with the same email.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "duplicate email on insert");
            return Err(ApiError::Duplicate(
                "User with this email already exists".into(),
            ));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(e.into());
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("User registered successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        warn!("login request with missing fields");
        return Err(ApiError::validation("Please provide email and password"));
    }

    // Unknown email and wrong password must be indistinguishable to the
    // client.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(ApiResponse::message_data(
        "Login successful",
        LoginData {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        },
    )))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<MeData>> {
    Json(ApiResponse::data(MeData::from(user)))
}
