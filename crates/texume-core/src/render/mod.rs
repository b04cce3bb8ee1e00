//! Format renderers: one pure function per (formatting mode × output format).
//!
//! Each renderer owns its trailing-newline convention. Document assembly
//! concatenates section output with no separator, so these conventions are
//! what spaces sections apart.

pub mod latex;
pub mod markdown;

use crate::{body::ParsedBody, format::OutputFormat, section::Section, Result};

/// Render an already-parsed body for `section` in `format`.
pub fn render_section(
  section: Section,
  body: &ParsedBody,
  format: OutputFormat,
) -> Result<String> {
  match format {
    OutputFormat::Markdown => Ok(markdown::render_section(section, body)),
    OutputFormat::Latex => latex::render_section(section, body),
  }
}
