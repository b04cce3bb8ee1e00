//! The `ContentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `texume-store-sqlite`).
//! Higher layers (`texume-api`, `texume-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  content::{Content, NewContent},
  profile::Profile,
  section::Section,
};

/// Abstraction over a texume content store backend.
///
/// Content writes are append-only: [`save`](ContentStore::save) always
/// inserts a new record and never touches earlier ones.
///
/// "Latest" means the record with the greatest `created` date; among records
/// sharing that date, the one saved last wins. Every backend must apply this
/// same rule so rendering is deterministic.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Create and persist a profile. Fails if `username` is taken.
  fn add_profile(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Look a profile up by username. Returns `None` if not found.
  fn get_profile<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + 'a;

  // ── Content: append-only writes ───────────────────────────────────────

  /// Record a new version of a section and return the persisted
  /// [`Content`]. `created` defaults to the store's current UTC date.
  fn save(
    &self,
    input: NewContent,
  ) -> impl Future<Output = Result<Content, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The current version of `section` for `user_id`, or `None` if the user
  /// has never saved it.
  fn latest(
    &self,
    user_id: Uuid,
    section: Section,
  ) -> impl Future<Output = Result<Option<Content>, Self::Error>> + Send + '_;

  /// Every saved version of `section` for `user_id`, latest first.
  fn history(
    &self,
    user_id: Uuid,
    section: Section,
  ) -> impl Future<Output = Result<Vec<Content>, Self::Error>> + Send + '_;
}
