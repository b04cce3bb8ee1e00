//! [`SqliteStore`], the SQLite implementation of [`ContentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use texume_core::{
  content::{Content, NewContent},
  profile::Profile,
  section::Section,
  store::ContentStore,
};

use crate::{
  encode::{encode_date, encode_dt, encode_uuid, RawContent, RawProfile, CONTENT_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A texume content store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Every stored version of `section` for `user_id`, latest first, at most
  /// `limit` rows.
  async fn select_contents(
    &self,
    user_id: Uuid,
    section: Section,
    limit:   Option<u32>,
  ) -> Result<Vec<Content>> {
    let user_str    = encode_uuid(user_id);
    let section_str = section.label();
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val   = limit.map_or(-1, i64::from);

    let raws: Vec<RawContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTENT_COLUMNS}
           FROM contents
           WHERE profile_id = ?1 AND section = ?2
           ORDER BY created DESC, seq DESC
           LIMIT ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![user_str, section_str, limit_val],
            RawContent::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }
}

// ─── ContentStore impl ───────────────────────────────────────────────────────

impl ContentStore for SqliteStore {
  type Error = Error;

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn add_profile(&self, username: String) -> Result<Profile> {
    let profile = Profile {
      profile_id: Uuid::new_v4(),
      username,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(profile.profile_id);
    let name_str = profile.username.clone();
    let at_str   = encode_dt(profile.created_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM profiles WHERE username = ?1",
            rusqlite::params![name_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO profiles (profile_id, username, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name_str, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateUsername(profile.username));
    }

    tracing::debug!(username = %profile.username, id = %profile.profile_id, "profile created");
    Ok(profile)
  }

  async fn get_profile(&self, username: &str) -> Result<Option<Profile>> {
    let name_str = username.to_owned();

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT profile_id, username, created_at FROM profiles WHERE username = ?1",
            rusqlite::params![name_str],
            |row| {
              Ok(RawProfile {
                profile_id: row.get(0)?,
                username:   row.get(1)?,
                created_at: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  // ── Content: append-only writes ───────────────────────────────────────────

  async fn save(&self, input: NewContent) -> Result<Content> {
    let content = Content {
      content_id: Uuid::new_v4(),
      user_id:    input.user_id,
      section:    input.section,
      formatting: input.formatting,
      body:       input.body,
      created:    input.created.unwrap_or_else(|| Utc::now().date_naive()),
    };

    let content_id_str = encode_uuid(content.content_id);
    let profile_id_str = encode_uuid(content.user_id);
    let section_str    = content.section.label();
    let formatting_str = content.formatting.as_str();
    let body           = content.body.clone();
    let created_str    = encode_date(content.created);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let known = conn
          .query_row(
            "SELECT 1 FROM profiles WHERE profile_id = ?1",
            rusqlite::params![profile_id_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !known {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO contents (content_id, profile_id, section, formatting, body, created)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            content_id_str,
            profile_id_str,
            section_str,
            formatting_str,
            body,
            created_str,
          ],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::ProfileNotFound(content.user_id));
    }

    tracing::debug!(
      user = %content.user_id,
      section = %content.section,
      formatting = %content.formatting,
      created = %content.created,
      "content saved"
    );
    Ok(content)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn latest(&self, user_id: Uuid, section: Section) -> Result<Option<Content>> {
    Ok(self.select_contents(user_id, section, Some(1)).await?.pop())
  }

  async fn history(&self, user_id: Uuid, section: Section) -> Result<Vec<Content>> {
    self.select_contents(user_id, section, None).await
  }
}
