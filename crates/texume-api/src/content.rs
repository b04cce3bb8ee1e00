//! Handlers for `/profiles/{username}/content` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/profiles/{username}/content` | Latest content of all sections |
//! | `POST` | `/profiles/{username}/content` | Body: `{"section","formatting"?,"body","created"?}` |
//! | `GET`  | `/profiles/{username}/content/{section}` | Empty content if never saved |
//! | `GET`  | `/profiles/{username}/content/{section}/history` | Latest first |
//!
//! Sections are addressed by label (`Project Work`) or kebab-case alias
//! (`project-work`), case-insensitively.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use texume_core::{
  content::{Content, NewContent},
  formatting::FormattingMode,
  section::Section,
  store::ContentStore,
};

use crate::{ApiState, error::ApiError, profiles::require_profile};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /profiles/{username}/content`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(username): Path<String>,
) -> Result<Json<Vec<Content>>, ApiError>
where
  S: ContentStore,
{
  let profile = require_profile(&*state.store, &username).await?;
  let resume = state
    .cache
    .get_or_load(&*state.store, profile.profile_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(resume.all_latest_content().iter().cloned().collect()))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveBody {
  pub section:    String,
  #[serde(default)]
  pub formatting: Option<String>,
  pub body:       String,
  #[serde(default)]
  pub created:    Option<NaiveDate>,
}

/// `POST /profiles/{username}/content`
///
/// Bodies that do not match their formatting grammar are refused with 422
/// and nothing is stored.
pub async fn save<S>(
  State(state): State<ApiState<S>>,
  Path(username): Path<String>,
  Json(input): Json<SaveBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore,
{
  let profile = require_profile(&*state.store, &username).await?;

  let section = Section::parse(&input.section)?;
  let formatting = input
    .formatting
    .as_deref()
    .map(FormattingMode::parse)
    .transpose()?
    .unwrap_or_default();

  let mut new = NewContent::new(profile.profile_id, section, input.body).with_formatting(formatting);
  new.created = input.created;
  new.validate()?;

  let content = state
    .store
    .save(new)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  state.cache.invalidate(profile.profile_id).await;

  tracing::info!(
    username = %profile.username,
    section = %content.section,
    formatting = %content.formatting,
    "content saved"
  );
  Ok((StatusCode::CREATED, Json(content)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /profiles/{username}/content/{section}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path((username, section)): Path<(String, String)>,
) -> Result<Json<Content>, ApiError>
where
  S: ContentStore,
{
  let section = Section::parse(&section)?;
  let profile = require_profile(&*state.store, &username).await?;
  let resume = state
    .cache
    .get_or_load(&*state.store, profile.profile_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(resume.all_latest_content().get(section).clone()))
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /profiles/{username}/content/{section}/history`
pub async fn history<S>(
  State(state): State<ApiState<S>>,
  Path((username, section)): Path<(String, String)>,
) -> Result<Json<Vec<Content>>, ApiError>
where
  S: ContentStore,
{
  let section = Section::parse(&section)?;
  let profile = require_profile(&*state.store, &username).await?;
  let versions = state
    .store
    .history(profile.profile_id, section)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(versions))
}
