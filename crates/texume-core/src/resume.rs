//! Resume: the assembled document for one user.
//!
//! A résumé is never stored. It is computed from the latest [`Content`] of
//! every [`Section`], fetched once into a [`LatestContent`] value that the
//! résumé holds until the caller explicitly refreshes it or builds a new one.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use crate::{
  content::{Content, EPOCH_FLOOR},
  format::OutputFormat,
  render::{latex, markdown},
  section::{HEADER_SECTIONS, Section},
  store::ContentStore,
  template::Vars,
  Result,
};

// ─── LatestContent ───────────────────────────────────────────────────────────

/// The current [`Content`] of every section for one user.
///
/// Always holds all twelve sections; sections the user never saved are filled
/// with [`Content::empty`].
#[derive(Debug, Clone, Serialize)]
pub struct LatestContent {
  user_id:    Uuid,
  by_section: BTreeMap<Section, Content>,
}

impl LatestContent {
  /// Fetch the latest version of every section from `store`, one lookup per
  /// section.
  pub async fn fetch<S: ContentStore>(store: &S, user_id: Uuid) -> Result<Self, S::Error> {
    let mut by_section = BTreeMap::new();
    for section in Section::iter() {
      let content = store
        .latest(user_id, section)
        .await?
        .unwrap_or_else(|| Content::empty(user_id, section));
      by_section.insert(section, content);
    }
    Ok(Self { user_id, by_section })
  }

  /// Resolve the latest version per section from an unordered log.
  ///
  /// `records` must be in save order: when two records for a section share
  /// the latest `created` date, the later one in the iterator wins. Records
  /// belonging to other users are ignored.
  pub fn from_records(user_id: Uuid, records: impl IntoIterator<Item = Content>) -> Self {
    let mut by_section: BTreeMap<Section, Content> = BTreeMap::new();
    for record in records.into_iter().filter(|c| c.user_id == user_id) {
      match by_section.get(&record.section) {
        Some(current) if !record.supersedes(current) => {}
        _ => {
          by_section.insert(record.section, record);
        }
      }
    }
    for section in Section::iter() {
      by_section
        .entry(section)
        .or_insert_with(|| Content::empty(user_id, section));
    }
    Self { user_id, by_section }
  }

  pub fn user_id(&self) -> Uuid { self.user_id }

  /// The current content of `section`.
  pub fn get(&self, section: Section) -> &Content { &self.by_section[&section] }

  /// All sections in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = &Content> { self.by_section.values() }

  /// The newest `created` date among saved content, or [`EPOCH_FLOOR`] when
  /// nothing has been saved.
  pub fn last_updated(&self) -> NaiveDate {
    self
      .iter()
      .filter(|c| c.is_persisted())
      .map(|c| c.created)
      .max()
      .unwrap_or(EPOCH_FLOOR)
  }
}

// ─── Resume ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Resume {
  latest: LatestContent,
}

impl Resume {
  pub fn new(latest: LatestContent) -> Self { Self { latest } }

  /// Fetch `user_id`'s latest content from `store` and build a résumé.
  pub async fn load<S: ContentStore>(store: &S, user_id: Uuid) -> Result<Self, S::Error> {
    Ok(Self::new(LatestContent::fetch(store, user_id).await?))
  }

  /// Discard the held content and fetch it again.
  pub async fn refresh<S: ContentStore>(&mut self, store: &S) -> Result<(), S::Error> {
    self.latest = LatestContent::fetch(store, self.latest.user_id).await?;
    Ok(())
  }

  pub fn user_id(&self) -> Uuid { self.latest.user_id }

  pub fn all_latest_content(&self) -> &LatestContent { &self.latest }

  pub fn last_updated(&self) -> NaiveDate { self.latest.last_updated() }

  /// Render the header block followed by every body section in declaration
  /// order.
  ///
  /// Section output is concatenated as-is; spacing comes from each renderer's
  /// trailing newlines. Any malformed section fails the whole render.
  pub fn render(&self, format: OutputFormat) -> Result<String> {
    let mut vars = Vars::new();
    for section in HEADER_SECTIONS {
      vars.insert(section.label(), self.latest.get(section).body.trim());
    }

    let mut out = match format {
      OutputFormat::Markdown => markdown::header(&vars)?,
      OutputFormat::Latex => latex::header(&vars)?,
    };

    for section in Section::body_sections() {
      out.push_str(&self.latest.get(section).render(format)?);
    }

    Ok(out)
  }

  /// The LaTeX rendering embedded in the document handed to the compiler.
  pub fn render_document(&self) -> Result<String> {
    latex::document(&self.render(OutputFormat::Latex)?)
  }
}
