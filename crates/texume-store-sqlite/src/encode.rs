//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings and content dates are `YYYY-MM-DD`, so
//! lexical order matches chronological order. Sections are stored by label.

use chrono::{DateTime, NaiveDate, Utc};
use texume_core::{
  content::Content, formatting::FormattingMode, profile::Profile, section::Section,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `profiles` row.
pub struct RawProfile {
  pub profile_id: String,
  pub username:   String,
  pub created_at: String,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      profile_id: decode_uuid(&self.profile_id)?,
      username:   self.username,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Columns selected by every `contents` query, in [`RawContent::from_row`]
/// order.
pub const CONTENT_COLUMNS: &str = "content_id, profile_id, section, formatting, body, created";

/// Raw strings read directly from a `contents` row.
pub struct RawContent {
  pub content_id: String,
  pub profile_id: String,
  pub section:    String,
  pub formatting: String,
  pub body:       String,
  pub created:    String,
}

impl RawContent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      content_id: row.get(0)?,
      profile_id: row.get(1)?,
      section:    row.get(2)?,
      formatting: row.get(3)?,
      body:       row.get(4)?,
      created:    row.get(5)?,
    })
  }

  pub fn into_content(self) -> Result<Content> {
    Ok(Content {
      content_id: decode_uuid(&self.content_id)?,
      user_id:    decode_uuid(&self.profile_id)?,
      section:    Section::parse(&self.section)?,
      formatting: FormattingMode::parse(&self.formatting)?,
      body:       self.body,
      created:    decode_date(&self.created)?,
    })
  }
}
