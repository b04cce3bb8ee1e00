//! Content: one saved version of one résumé section.
//!
//! Content is an append-only log: saving a section never edits an earlier
//! record, it adds a newer one. The current value of a section is the record
//! with the latest `created` date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  body, format::OutputFormat, formatting::FormattingMode, render, section::Section,
  Result,
};

/// `created` of synthesized empty content, and `last_updated` of a résumé
/// with no saved content.
pub const EPOCH_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
  Some(d) => d,
  None => panic!("invalid epoch floor"),
};

/// An immutable, saved section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
  /// Nil for content synthesized by [`Content::empty`].
  pub content_id: Uuid,
  pub user_id:    Uuid,
  pub section:    Section,
  pub formatting: FormattingMode,
  pub body:       String,
  /// Store-assigned save date.
  pub created:    NaiveDate,
}

impl Content {
  /// Placeholder for a section the user has never saved. Never persisted.
  pub fn empty(user_id: Uuid, section: Section) -> Self {
    Self {
      content_id: Uuid::nil(),
      user_id,
      section,
      formatting: FormattingMode::default(),
      body: String::new(),
      created: EPOCH_FLOOR,
    }
  }

  /// Whether this record came from the store rather than [`Content::empty`].
  pub fn is_persisted(&self) -> bool { !self.content_id.is_nil() }

  /// Render this section alone.
  ///
  /// The output ends with the renderer's own trailing newline(s); document
  /// assembly relies on that for spacing between sections. Header sections
  /// cannot be rendered to LaTeX on their own; use
  /// [`crate::resume::Resume::render`].
  ///
  /// # Panics
  ///
  /// LaTeX output of a header section, see [`Section::latex_command`].
  pub fn render(&self, format: OutputFormat) -> Result<String> {
    let parsed = body::parse(self.formatting, &self.body)
      .map_err(|e| e.in_section(self.section))?;
    render::render_section(self.section, &parsed, format)
  }

  /// Whether `self` is a later version of the section than `other`.
  ///
  /// Later `created` wins; on equal dates `self` is assumed to be the more
  /// recently saved record.
  pub fn supersedes(&self, other: &Content) -> bool { self.created >= other.created }
}

/// Input to [`crate::store::ContentStore::save`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContent {
  pub user_id:    Uuid,
  pub section:    Section,
  #[serde(default)]
  pub formatting: FormattingMode,
  pub body:       String,
  /// Backdate the record; the store uses today's UTC date when `None`.
  #[serde(default)]
  pub created:    Option<NaiveDate>,
}

impl NewContent {
  /// Convenience constructor with the default formatting and date.
  pub fn new(user_id: Uuid, section: Section, body: impl Into<String>) -> Self {
    Self {
      user_id,
      section,
      formatting: FormattingMode::default(),
      body: body.into(),
      created: None,
    }
  }

  pub fn with_formatting(mut self, formatting: FormattingMode) -> Self {
    self.formatting = formatting;
    self
  }

  pub fn created_on(mut self, date: NaiveDate) -> Self {
    self.created = Some(date);
    self
  }

  /// Check the body against its formatting grammar so malformed content can
  /// be refused before it is saved.
  pub fn validate(&self) -> Result<()> {
    body::parse(self.formatting, &self.body)
      .map(drop)
      .map_err(|e| e.in_section(self.section))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn content(section: Section, formatting: FormattingMode, body: &str) -> Content {
    Content {
      content_id: Uuid::new_v4(),
      user_id: Uuid::nil(),
      section,
      formatting,
      body: body.to_owned(),
      created: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    }
  }

  #[test]
  fn text_markdown() {
    let c = content(Section::Education, FormattingMode::Text, "abc");
    assert_eq!(c.render(OutputFormat::Markdown).unwrap(), "Education\nabc\n");
  }

  #[test]
  fn date_points_markdown() {
    let c = content(
      Section::Courses,
      FormattingMode::DatePoints,
      "2019-01-23\ndid amazing things\norganized cool stuff\n\n2018-10-23\ncool things here as well",
    );
    assert_eq!(
      c.render(OutputFormat::Markdown).unwrap(),
      "Courses\n* [2019-01-23] did amazing things; organized cool stuff\n* [2018-10-23] cool things here as well\n"
    );
  }

  #[test]
  fn crlf_bodies_render_like_lf() {
    let lf = content(Section::Courses, FormattingMode::DatePoints, "2019\na\nb\n\n2018\nc");
    let crlf =
      content(Section::Courses, FormattingMode::DatePoints, "2019\r\na\r\nb\r\n\r\n2018\r\nc");
    assert_eq!(
      lf.render(OutputFormat::Latex).unwrap(),
      crlf.render(OutputFormat::Latex).unwrap()
    );
  }

  #[test]
  fn rendering_is_deterministic() {
    let c = content(
      Section::ProfessionalExperience,
      FormattingMode::OrgLocTitleDatePoints,
      "Acme\nBerlin\nEngineer\n2020\nbuilt it",
    );
    for format in [OutputFormat::Markdown, OutputFormat::Latex] {
      assert_eq!(c.render(format).unwrap(), c.render(format).unwrap());
    }
  }

  #[test]
  fn empty_content_renders_empty_sections() {
    let c = Content::empty(Uuid::new_v4(), Section::Publications);
    assert!(!c.is_persisted());
    assert_eq!(c.created, EPOCH_FLOOR);
    assert_eq!(c.render(OutputFormat::Markdown).unwrap(), "Publications\n\n");
    assert_eq!(
      c.render(OutputFormat::Latex).unwrap(),
      "\\renewcommand{\\publications}{\n\n}\n"
    );
  }

  #[test]
  fn malformed_body_names_the_section() {
    let c = content(
      Section::ProjectWork,
      FormattingMode::OrgLocTitleDatePoints,
      "Acme\nBerlin\nEngineer",
    );
    let err = c.render(OutputFormat::Markdown).unwrap_err();
    let Error::MalformedBody { section, source } = &err else {
      panic!("expected MalformedBody, got {err:?}")
    };
    assert_eq!(*section, Section::ProjectWork);
    assert_eq!(source.found, 3);
  }

  #[test]
  fn validate_matches_render() {
    let ok = NewContent::new(Uuid::nil(), Section::Courses, "2020\nRust")
      .with_formatting(FormattingMode::DatePoints);
    assert!(ok.validate().is_ok());

    let bad = NewContent::new(Uuid::nil(), Section::Courses, "2020")
      .with_formatting(FormattingMode::DatePoints);
    assert!(matches!(bad.validate(), Err(Error::MalformedBody { .. })));
  }

  #[test]
  fn later_date_supersedes() {
    let mut old = content(Section::Courses, FormattingMode::Text, "old");
    let new = content(Section::Courses, FormattingMode::Text, "new");
    old.created = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    assert!(new.supersedes(&old));
    assert!(!old.supersedes(&new));
  }
}
