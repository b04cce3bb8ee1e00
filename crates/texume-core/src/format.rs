//! Output formats a résumé can be rendered to.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
  Markdown,
  Latex,
}

impl OutputFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Markdown => "markdown",
      Self::Latex => "latex",
    }
  }

  /// `Content-Type` for a rendered document in this format.
  pub fn media_type(self) -> &'static str {
    match self {
      Self::Markdown => "text/markdown; charset=utf-8",
      Self::Latex => "application/x-latex; charset=utf-8",
    }
  }

  pub fn extension(self) -> &'static str {
    match self {
      Self::Markdown => "md",
      Self::Latex => "tex",
    }
  }
}

impl FromStr for OutputFormat {
  type Err = Error;

  /// Any value other than `markdown` or `latex` (case-insensitive) is
  /// [`Error::UnsupportedFormat`].
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "markdown" | "md" => Ok(Self::Markdown),
      "latex" | "tex" => Ok(Self::Latex),
      _ => Err(Error::UnsupportedFormat(s.to_owned())),
    }
  }
}

impl TryFrom<String> for OutputFormat {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
