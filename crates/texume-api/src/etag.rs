//! Validators for rendered résumés.
//!
//! The ETag is a SHA-256 hash of the exact response body, so any change in
//! content or format yields a new tag.

use axum::http::{HeaderMap, header};
use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Quoted strong ETag for `body`.
pub fn compute_etag(body: &[u8]) -> String {
  let hash = Sha256::digest(body);
  format!("\"{}\"", hex::encode(hash))
}

/// Whether the request's `If-None-Match` names `etag` (or `*`).
///
/// Unquoted and weak (`W/`) forms are accepted.
pub fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let bare = etag.trim_matches('"');
  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*" || candidate.trim_start_matches("W/").trim_matches('"') == bare
  })
}

/// `Last-Modified` value for a résumé last updated on `date` (midnight UTC).
pub fn http_date(date: NaiveDate) -> String {
  date
    .and_time(chrono::NaiveTime::default())
    .and_utc()
    .format("%a, %d %b %Y %H:%M:%S GMT")
    .to_string()
}
