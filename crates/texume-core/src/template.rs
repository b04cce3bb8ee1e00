//! Fixed text templates with `{{NAME}}` placeholders.
//!
//! Substitution is a single left-to-right pass: values are copied into the
//! output and never rescanned, so user text containing `{{...}}` or a
//! placeholder name is inserted literally. A `{{` that is not followed by a
//! placeholder name and `}}` is ordinary text, which keeps LaTeX group braces
//! such as `{{{Name}}}` unambiguous (`{` + placeholder + `}`).

use std::collections::BTreeMap;

use crate::{Error, Result};

/// A static template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template(&'static str);

/// Values keyed by placeholder name.
#[derive(Debug, Clone, Default)]
pub struct Vars<'a> {
  values: BTreeMap<&'a str, &'a str>,
}

impl<'a> Vars<'a> {
  pub fn new() -> Self { Self::default() }

  /// Set a placeholder value, replacing any previous one.
  pub fn set(mut self, name: &'a str, value: &'a str) -> Self {
    self.values.insert(name, value);
    self
  }

  pub fn insert(&mut self, name: &'a str, value: &'a str) {
    self.values.insert(name, value);
  }

  fn get(&self, name: &str) -> Option<&'a str> { self.values.get(name).copied() }
}

impl Template {
  pub const fn new(source: &'static str) -> Self { Self(source) }

  pub fn source(&self) -> &'static str { self.0 }

  /// Substitute every placeholder from `vars`.
  ///
  /// Fails with [`Error::Template`] when the template names a placeholder that
  /// `vars` has no value for. Unused values are ignored.
  pub fn fill(&self, vars: &Vars<'_>) -> Result<String> {
    let src = self.0;
    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(open) = rest.find("{{") {
      out.push_str(&rest[..open]);
      let after = &rest[open + 2..];
      match placeholder_at(after) {
        Some(name) => {
          let value = vars.get(name).ok_or_else(|| Error::Template {
            placeholder: name.to_owned(),
          })?;
          out.push_str(value);
          rest = &after[name.len() + 2..];
        }
        None => {
          // Not a placeholder; emit one brace and rescan from the next.
          out.push('{');
          rest = &rest[open + 1..];
        }
      }
    }
    out.push_str(rest);

    Ok(out)
  }
}

/// If `s` starts with `NAME}}`, return `NAME`.
fn placeholder_at(s: &str) -> Option<&str> {
  let end = s
    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
    .unwrap_or(s.len());
  (end > 0 && s[end..].starts_with("}}")).then(|| &s[..end])
}
