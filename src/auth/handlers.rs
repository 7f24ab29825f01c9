use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, SuccessResponse},
        extractors::session_token,
        jwt::{cleared_cookie, SessionKeys},
        password::{hash_password, verify_password},
        repo::{NewUser, Session},
        repo_types::User,
        services::{is_valid_email, Credentials, Registration},
    },
    error::{internal, parse_body, ApiError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let reg = Registration::try_from(parse_body::<RegisterRequest>(payload)?).map_err(|e| {
        warn!(reason = %e.message, "registration rejected");
        e
    })?;

    let hash = hash_password(&reg.password).map_err(internal)?;

    let user = User::create(
        &state.db,
        NewUser {
            first_name: &reg.first_name,
            last_name: &reg.last_name,
            email: &reg.email,
            nationality: &reg.nationality,
            phone: &reg.phone,
            password_hash: &hash,
        },
    )
    .await
    .ok_or_else(|| {
        warn!(email = %reg.email, "email already registered");
        ApiError::new(StatusCode::CONFLICT, "El correo ya está registrado")
    })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<([(axum::http::HeaderName, String); 1], Json<AuthResponse>), ApiError> {
    let creds = Credentials::try_from(parse_body::<LoginRequest>(payload)?)?;
    let invalid = || ApiError::new(StatusCode::UNAUTHORIZED, "Invalid credentials");

    if !is_valid_email(&creds.email) {
        warn!(email = %creds.email, "login with malformed email");
        return Err(invalid());
    }

    let Some(user) = User::find_by_email(&state.db, &creds.email).await else {
        warn!(email = %creds.email, "login unknown email");
        return Err(invalid());
    };

    if !verify_password(&creds.password, &user.password_hash).map_err(internal)? {
        warn!(email = %creds.email, user_id = user.id, "login invalid password");
        return Err(invalid());
    }

    let keys = SessionKeys::from_ref(&state);
    let sid = Session::open(&state.db, user.id).await;
    let token = keys.sign(user.id, sid).map_err(internal)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((
        [(SET_COOKIE, keys.cookie(&token))],
        Json(AuthResponse {
            user: PublicUser::from(user),
        }),
    ))
}

/// Always acknowledges; a presented live session is revoked.
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ([(axum::http::HeaderName, &'static str); 1], Json<SuccessResponse>) {
    let keys = SessionKeys::from_ref(&state);
    match session_token(&headers).map(|t| keys.verify(t)) {
        Some(Ok(claims)) => {
            if Session::revoke(&state.db, claims.sid).await {
                info!(user_id = claims.sub, "user logged out");
            }
        }
        Some(Err(_)) => warn!("logout with invalid session token"),
        None => {}
    }
    (
        [(SET_COOKIE, cleared_cookie())],
        Json(SuccessResponse { success: true }),
    )
}
