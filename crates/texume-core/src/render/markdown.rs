//! Markdown renderers.
//!
//! Every section starts with its label on a line of its own.

use crate::{
  body::{DatedEntry, ParsedBody, PositionEntry},
  section::Section,
  template::{Template, Vars},
  Result,
};

/// Header block; placeholders are section labels.
pub const HEADER: Template =
  Template::new("{{Name}}\n{{Link}}\n{{Phone}} | {{Email}}\n{{Postmail}}\n\n");

pub fn render_section(section: Section, body: &ParsedBody) -> String {
  match body {
    ParsedBody::Text(text) => text_section(section, text),
    ParsedBody::DatePoints(entries) => date_points_section(section, entries),
    ParsedBody::OrgLocTitleDatePoints(entries) => {
      org_loc_title_date_points_section(section, entries)
    }
  }
}

/// `LABEL\nBODY\n`
pub fn text_section(section: Section, text: &str) -> String {
  format!("{}\n{text}\n", section.label())
}

/// `LABEL\n` then `* [DATE] P1; P2\n` per entry.
pub fn date_points_section(section: Section, entries: &[DatedEntry]) -> String {
  let mut out = format!("{}\n", section.label());
  for entry in entries {
    out.push_str(&format!("* [{}] {}\n", entry.date, entry.points.join("; ")));
  }
  out
}

/// `LABEL\n` then per entry `*ORG* LOC`, `_TITLE_ [DATE]`, one `* POINT` per
/// point, and a blank line.
pub fn org_loc_title_date_points_section(
  section: Section,
  entries: &[PositionEntry],
) -> String {
  let mut out = format!("{}\n", section.label());
  for entry in entries {
    out.push_str(&format!("*{}* {}\n", entry.organization, entry.location));
    out.push_str(&format!("_{}_ [{}]\n", entry.title, entry.date));
    for point in &entry.points {
      out.push_str(&format!("* {point}\n"));
    }
    out.push('\n');
  }
  out
}

/// Fill the header block from header field values keyed by section label.
pub fn header(vars: &Vars<'_>) -> Result<String> { HEADER.fill(vars) }
