//! Formatting modes: the grammar a section body is written in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::EnumIter,
  strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FormattingMode {
  /// The body is emitted verbatim.
  #[default]
  Text,
  /// Entries of one date line followed by one or more point lines.
  DatePoints,
  /// Entries of organisation, location, title and date lines followed by one
  /// or more point lines.
  OrgLocTitleDatePoints,
}

impl FormattingMode {
  /// The kebab-case name used in storage and on the wire.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Text => "text",
      Self::DatePoints => "date-points",
      Self::OrgLocTitleDatePoints => "org-loc-title-date-points",
    }
  }

  pub fn parse(s: &str) -> crate::Result<Self> {
    s.trim()
      .parse::<Self>()
      .map_err(|_| Error::UnknownFormatting(s.to_owned()))
  }
}

impl fmt::Display for FormattingMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn as_str_matches_parse_and_serde() {
    for mode in FormattingMode::iter() {
      assert_eq!(FormattingMode::parse(mode.as_str()).unwrap(), mode);
      let json = serde_json::to_string(&mode).unwrap();
      assert_eq!(json, format!("\"{}\"", mode.as_str()));
    }
  }

  #[test]
  fn default_is_text() {
    assert_eq!(FormattingMode::default(), FormattingMode::Text);
  }

  #[test]
  fn unknown_mode_is_an_error() {
    assert!(matches!(
      FormattingMode::parse("bullets"),
      Err(Error::UnknownFormatting(_))
    ));
  }
}
