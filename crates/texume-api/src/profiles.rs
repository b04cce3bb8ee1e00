//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/profiles` | Body: `{"username":"ada"}`; 409 if taken |
//! | `GET`  | `/profiles/{username}` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use texume_core::{profile::Profile, store::ContentStore};

use crate::{ApiState, error::ApiError};

/// Resolve `username` or fail with [`ApiError::MissingProfile`].
pub async fn require_profile<S>(store: &S, username: &str) -> Result<Profile, ApiError>
where
  S: ContentStore,
{
  store
    .get_profile(username)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::MissingProfile(username.to_owned()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub username: String,
}

/// `POST /profiles`, body: `{"username":"ada"}`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore,
{
  let username = body.username.trim();
  if username.is_empty() {
    return Err(ApiError::BadRequest("username must not be empty".into()));
  }

  let existing = state
    .store
    .get_profile(username)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(ApiError::Conflict(format!("username {username:?} is already taken")));
  }

  let profile = state
    .store
    .add_profile(username.to_owned())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(username = %profile.username, "profile created");
  Ok((StatusCode::CREATED, Json(profile)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /profiles/{username}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(username): Path<String>,
) -> Result<Json<Profile>, ApiError>
where
  S: ContentStore,
{
  Ok(Json(require_profile(&*state.store, &username).await?))
}
