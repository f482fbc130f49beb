//! API service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use ranking::{OAuthIdentity, catalog, models::ProfilePatch};
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CatalogResponse, CollaborationRequest, CompletionResponse, DisplayNameRequest,
        InterestCategory, InterestsRequest, LeaderboardQuery, PhotoRequest, RankedQuery,
        RegistrationRequest,
    },
    state::AppState,
};

/// Upper bound on rows a single request may ask for
const MAX_ROWS: usize = 1000;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let profile_routes = Router::new()
        .route("/profiles/:id", get(get_profile).patch(save_profile))
        .route("/profiles/:id/completed", get(get_profile_completion))
        .route("/profiles/:id/display-name", put(update_display_name))
        .route("/profiles/:id/photo", put(update_photo))
        .route("/profiles/:id/interests", put(update_interests))
        .route("/profiles/:id/collaboration", put(update_collaboration))
        .route("/profiles/:id/complete", post(complete_profile));

    Router::new()
        .route("/health", get(health_check))
        .route("/leaderboard", get(get_leaderboard))
        .route("/leaderboard/all", get(get_all_ranked))
        .route("/accounts/register", post(register_account))
        .route("/accounts/oauth", post(record_oauth_sign_in))
        .route("/catalog/interests", get(get_interest_catalog))
        .merge(profile_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "ranking-api"
    }))
}

/// Top users plus the requesting user's rank
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<impl IntoResponse> {
    let top = query.top.unwrap_or(state.top_count).min(MAX_ROWS);
    let board = state
        .leaderboard
        .get_leaderboard(query.user_id.as_deref(), top)
        .await?;

    Ok(Json(board))
}

pub async fn get_all_ranked(
    State(state): State<AppState>,
    Query(query): Query<RankedQuery>,
) -> ApiResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(state.ranked_limit).min(MAX_ROWS);
    let ranked = state.leaderboard.get_all_users_ranked(limit).await?;

    Ok(Json(ranked))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .profiles
        .get_profile(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", id)))?;

    Ok(Json(profile))
}

/// Merge the body into the profile, creating it when absent
pub async fn save_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<impl IntoResponse> {
    // createdAt and accountType belong to account bootstrap
    let patch = patch.without_immutable_fields();
    let profile = state.profiles.save_profile(&id, &patch).await?;

    Ok(Json(profile))
}

pub async fn get_profile_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let completed_profile = state.profiles.has_completed_profile(&id).await;

    Json(CompletionResponse {
        user_id: id,
        completed_profile,
    })
}

pub async fn update_display_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DisplayNameRequest>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .profiles
        .update_display_name(&id, &payload.display_name)
        .await?;

    Ok(Json(profile))
}

pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PhotoRequest>,
) -> ApiResult<impl IntoResponse> {
    let profile = state.profiles.update_photo_url(&id, &payload.photo_url).await?;

    Ok(Json(profile))
}

pub async fn update_interests(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<InterestsRequest>,
) -> ApiResult<impl IntoResponse> {
    let profile = state.profiles.update_interests(&id, payload.interests).await?;

    Ok(Json(profile))
}

pub async fn update_collaboration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CollaborationRequest>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .profiles
        .update_collaboration_preferences(&id, payload.collaboration_preferences)
        .await?;

    Ok(Json(profile))
}

pub async fn complete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .profiles
        .complete_profile(&id, patch.without_immutable_fields())
        .await?;

    Ok(Json(profile))
}

/// Record an email/password registration
pub async fn register_account(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Registration received for {}", payload.user_id);

    let profile = state
        .accounts
        .record_registration(&payload.user_id, &payload.email, &payload.display_name)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Record a sign-in through an OAuth provider
pub async fn record_oauth_sign_in(
    State(state): State<AppState>,
    Json(identity): Json<OAuthIdentity>,
) -> ApiResult<impl IntoResponse> {
    let profile = state.accounts.record_oauth_sign_in(&identity).await?;

    Ok(Json(profile))
}

pub async fn get_interest_catalog() -> impl IntoResponse {
    let categories = catalog::INTERESTS_BY_CATEGORY
        .iter()
        .map(|(name, interests)| InterestCategory {
            name: *name,
            interests: *interests,
        })
        .collect();

    Json(CatalogResponse {
        categories,
        collaboration_types: catalog::COLLABORATION_TYPES,
    })
}
