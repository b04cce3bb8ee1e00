//! `GET /profiles/{username}/resume[?format=markdown|latex]`
//!
//! Responds with the rendered résumé as text. Conditional requests are
//! supported through `ETag` / `If-None-Match`; `Last-Modified` reflects the
//! newest saved content.

use axum::{
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use texume_core::{format::OutputFormat, store::ContentStore};

use crate::{
  ApiState,
  error::ApiError,
  etag::{compute_etag, http_date, if_none_match},
  profiles::require_profile,
};

#[derive(Debug, Deserialize)]
pub struct RenderParams {
  /// `markdown` (default) or `latex`.
  pub format: Option<String>,
}

pub async fn render<S>(
  State(state): State<ApiState<S>>,
  Path(username): Path<String>,
  Query(params): Query<RenderParams>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: ContentStore,
{
  let format = match params.format.as_deref() {
    Some(f) => f.parse::<OutputFormat>()?,
    None => OutputFormat::Markdown,
  };

  let profile = require_profile(&*state.store, &username).await?;
  let resume = state
    .cache
    .get_or_load(&*state.store, profile.profile_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let body = resume.render(format)?;
  let etag = compute_etag(body.as_bytes());
  let last_modified = http_date(resume.last_updated());

  if if_none_match(&headers, &etag) {
    return Ok(
      (
        StatusCode::NOT_MODIFIED,
        [(header::ETAG, etag), (header::LAST_MODIFIED, last_modified)],
      )
        .into_response(),
    );
  }

  tracing::info!(username = %profile.username, %format, bytes = body.len(), "resume rendered");
  Ok(
    (
      [
        (header::CONTENT_TYPE, format.media_type().to_owned()),
        (
          header::CONTENT_DISPOSITION,
          format!("inline; filename=\"resume.{}\"", format.extension()),
        ),
        (header::ETAG, etag),
        (header::LAST_MODIFIED, last_modified),
      ],
      body,
    )
      .into_response(),
  )
}
