//! Résumé sections: the closed set of categories content is filed under.
//!
//! Declaration order is significant: it is the order body sections appear in
//! a rendered document.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator as _};

use crate::Error;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  EnumCount,
  strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Section {
  // ── Header ──────────────────────────────────────────────────────────────
  #[strum(serialize = "Name")]
  Name,
  #[strum(serialize = "Link")]
  Link,
  #[strum(serialize = "Phone")]
  Phone,
  #[strum(serialize = "Email")]
  Email,
  #[strum(serialize = "Postmail")]
  Postmail,

  // ── Body ────────────────────────────────────────────────────────────────
  #[strum(serialize = "Education")]
  Education,
  #[serde(rename = "Professional Experience")]
  #[strum(serialize = "Professional Experience", serialize = "professional-experience")]
  ProfessionalExperience,
  #[serde(rename = "Project Work")]
  #[strum(serialize = "Project Work", serialize = "project-work")]
  ProjectWork,
  #[strum(serialize = "Publications")]
  Publications,
  #[strum(serialize = "Courses")]
  Courses,
  #[serde(rename = "Technical Skills")]
  #[strum(serialize = "Technical Skills", serialize = "technical-skills")]
  TechnicalSkills,
  #[serde(rename = "Extra Curricular")]
  #[strum(serialize = "Extra Curricular", serialize = "extra-curricular")]
  ExtraCurricular,
}

/// Header sections in the order the header templates reference them.
pub const HEADER_SECTIONS: [Section; 5] = [
  Section::Name,
  Section::Link,
  Section::Phone,
  Section::Email,
  Section::Postmail,
];

impl Section {
  /// The display label: Markdown section heading, header placeholder name,
  /// and storage representation.
  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "Name",
      Self::Link => "Link",
      Self::Phone => "Phone",
      Self::Email => "Email",
      Self::Postmail => "Postmail",
      Self::Education => "Education",
      Self::ProfessionalExperience => "Professional Experience",
      Self::ProjectWork => "Project Work",
      Self::Publications => "Publications",
      Self::Courses => "Courses",
      Self::TechnicalSkills => "Technical Skills",
      Self::ExtraCurricular => "Extra Curricular",
    }
  }

  /// Identity and contact fields rendered through the header template rather
  /// than as standalone sections.
  pub fn is_header(self) -> bool { HEADER_SECTIONS.contains(&self) }

  /// Body sections in render order.
  pub fn body_sections() -> impl Iterator<Item = Section> {
    Self::iter().filter(|s| !s.is_header())
  }

  /// Name of the LaTeX command (without the backslash) a body section's
  /// rendered content is bound to.
  ///
  /// # Panics
  ///
  /// Header sections have no command of their own; they are rendered by the
  /// header template. Asking for one is a caller bug.
  pub fn latex_command(self) -> &'static str {
    match self {
      Self::Education => "education",
      Self::ProfessionalExperience => "experience",
      Self::ProjectWork => "projects",
      Self::Publications => "publications",
      Self::Courses => "courses",
      Self::TechnicalSkills => "skills",
      Self::ExtraCurricular => "extracurricular",
      Self::Name | Self::Link | Self::Phone | Self::Email | Self::Postmail => {
        panic!("header section {self} has no LaTeX section command")
      }
    }
  }

  /// Parse a label or kebab-case alias, mapping failures to
  /// [`Error::UnknownSection`].
  pub fn parse(s: &str) -> crate::Result<Self> {
    <Self as FromStr>::from_str(s.trim())
      .map_err(|_| Error::UnknownSection(s.to_owned()))
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
