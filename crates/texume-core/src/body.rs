//! Section body grammar.
//!
//! Bodies are plain multi-line text. Entries are separated by blank lines;
//! within an entry each line is one field, in the fixed order the formatting
//! mode prescribes, followed by one point per line.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_entries()  → Vec<Vec<String>>   (CRLF normalised)
//!          └─ parse_*()   → typed entries, or BodyError

use crate::{error::BodyError, formatting::FormattingMode};

/// One `date-points` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedEntry {
  /// Display text; never parsed as a calendar date.
  pub date:   String,
  pub points: Vec<String>,
}

/// One `org-loc-title-date-points` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionEntry {
  pub organization: String,
  pub location:     String,
  pub title:        String,
  pub date:         String,
  pub points:       Vec<String>,
}

/// A body parsed according to its formatting mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedBody {
  Text(String),
  DatePoints(Vec<DatedEntry>),
  OrgLocTitleDatePoints(Vec<PositionEntry>),
}

/// Fields preceding the points in an `org-loc-title-date-points` entry.
const POSITION_HEADER_LINES: usize = 4;

/// Parse `body` with the grammar of `mode`.
pub fn parse(mode: FormattingMode, body: &str) -> Result<ParsedBody, BodyError> {
  Ok(match mode {
    FormattingMode::Text => ParsedBody::Text(body.to_owned()),
    FormattingMode::DatePoints => ParsedBody::DatePoints(parse_date_points(body)?),
    FormattingMode::OrgLocTitleDatePoints => {
      ParsedBody::OrgLocTitleDatePoints(parse_org_loc_title_date_points(body)?)
    }
  })
}

/// Split a body into blank-line separated entries of non-empty lines.
///
/// CRLF is normalised to LF and trailing whitespace is trimmed from every
/// line, so a whitespace-only line also separates entries. Leading, trailing
/// and repeated blank lines never produce empty entries.
pub fn split_entries(body: &str) -> Vec<Vec<String>> {
  let normalized = body.replace("\r\n", "\n");
  let mut entries = Vec::new();
  let mut current = Vec::new();

  for line in normalized.split('\n') {
    let line = line.trim_end();
    if line.is_empty() {
      if !current.is_empty() {
        entries.push(std::mem::take(&mut current));
      }
    } else {
      current.push(line.to_owned());
    }
  }
  if !current.is_empty() {
    entries.push(current);
  }

  entries
}

pub fn parse_date_points(body: &str) -> Result<Vec<DatedEntry>, BodyError> {
  split_entries(body)
    .into_iter()
    .enumerate()
    .map(|(i, lines)| {
      let found = lines.len();
      let mut lines = lines.into_iter();
      match (lines.next(), lines.as_slice().is_empty()) {
        (Some(date), false) => Ok(DatedEntry { date, points: lines.collect() }),
        _ => Err(BodyError {
          mode: FormattingMode::DatePoints,
          entry: i + 1,
          found,
          required: 2,
        }),
      }
    })
    .collect()
}

pub fn parse_org_loc_title_date_points(
  body: &str,
) -> Result<Vec<PositionEntry>, BodyError> {
  split_entries(body)
    .into_iter()
    .enumerate()
    .map(|(i, lines)| {
      if lines.len() <= POSITION_HEADER_LINES {
        return Err(BodyError {
          mode:     FormattingMode::OrgLocTitleDatePoints,
          entry:    i + 1,
          found:    lines.len(),
          required: POSITION_HEADER_LINES + 1,
        });
      }
      let mut lines = lines.into_iter();
      // The length check above guarantees the four header fields.
      let mut field = || lines.next().unwrap_or_default();
      let organization = field();
      let location = field();
      let title = field();
      let date = field();
      Ok(PositionEntry {
        organization,
        location,
        title,
        date,
        points: lines.collect(),
      })
    })
    .collect()
}
