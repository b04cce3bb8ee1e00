//! Error types for `texume-core`.

use thiserror::Error;

use crate::{formatting::FormattingMode, section::Section};

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported output format: {0:?} (expected \"markdown\" or \"latex\")")]
  UnsupportedFormat(String),

  #[error("malformed {section} body: {source}")]
  MalformedBody {
    section: Section,
    #[source]
    source:  BodyError,
  },

  #[error("unknown section: {0:?}")]
  UnknownSection(String),

  #[error("unknown formatting mode: {0:?}")]
  UnknownFormatting(String),

  #[error("template placeholder {{{{{placeholder}}}}} has no value")]
  Template { placeholder: String },
}

/// A body that does not match its formatting mode's line grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{mode} entry {entry} has {found} line(s), needs at least {required}")]
pub struct BodyError {
  pub mode:     FormattingMode,
  /// 1-based index of the offending entry.
  pub entry:    usize,
  pub found:    usize,
  pub required: usize,
}

impl BodyError {
  /// Attach the section the body belongs to.
  pub fn in_section(self, section: Section) -> Error {
    Error::MalformedBody { section, source: self }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
