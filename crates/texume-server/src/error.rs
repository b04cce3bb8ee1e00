//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use texume_api::ApiError;
use thiserror::Error;

use crate::export::CompileError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error(transparent)]
  Api(#[from] ApiError),

  #[error("LaTeX compilation failed: {0}")]
  Compile(#[from] CompileError),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"texume\""),
        );
        res
      }
      Error::Api(e) => e.into_response(),
      Error::Compile(e) => {
        tracing::warn!(error = %e, "pdf export failed");
        (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))).into_response()
      }
    }
  }
}
