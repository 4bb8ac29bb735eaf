//! Authentication endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        user::{LoginRequest, TokenResponse},
        StoreSpot,
    },
};

use super::AuthenticatedUser;

/// Token holder
#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub user_id: String,
    pub store_spot: StoreSpot,
}

/// Log in with login name, password and store location
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials or store location")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.auth.authenticate(&request).await?;
    Ok(Json(token))
}

/// Current token holder
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = MeResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: claims.sub,
        store_spot: claims.store_spot,
    })
}

/// Valid store locations
#[utoipa::path(
    get,
    path = "/auth/store-spots",
    tag = "auth",
    responses(
        (status = 200, description = "Store locations", body = Vec<StoreSpot>)
    )
)]
pub async fn store_spots() -> Json<Vec<StoreSpot>> {
    Json(StoreSpot::ALL.to_vec())
}
