//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use texume_core::{
  content::NewContent,
  format::OutputFormat,
  formatting::FormattingMode,
  resume::Resume,
  section::Section,
  store::ContentStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_profile() {
  let s = store().await;

  let profile = s.add_profile("ada".into()).await.unwrap();
  assert_eq!(profile.username, "ada");

  let fetched = s.get_profile("ada").await.unwrap().unwrap();
  assert_eq!(fetched.profile_id, profile.profile_id);
  assert_eq!(fetched.username, "ada");
}

#[tokio::test]
async fn get_profile_missing_returns_none() {
  let s = store().await;
  assert!(s.get_profile("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_rejected() {
  let s = store().await;
  s.add_profile("ada".into()).await.unwrap();
  let err = s.add_profile("ada".into()).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateUsername(name) if name == "ada"));
}

// ─── Saving ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_defaults_created_to_today() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;

  let saved = s.save(NewContent::new(user, Section::Name, "Ada")).await.unwrap();
  assert!(saved.is_persisted());
  assert_eq!(saved.created, chrono::Utc::now().date_naive());
  assert_eq!(saved.formatting, FormattingMode::Text);
}

#[tokio::test]
async fn save_for_unknown_profile_fails() {
  let s = store().await;
  let ghost = Uuid::new_v4();
  let err = s.save(NewContent::new(ghost, Section::Name, "x")).await.unwrap_err();
  assert!(matches!(err, Error::ProfileNotFound(id) if id == ghost));
}

#[tokio::test]
async fn round_trips_every_field() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;

  let input = NewContent::new(user, Section::ProjectWork, "Acme\nBerlin\nEngineer\n2020\nbuilt it")
    .with_formatting(FormattingMode::OrgLocTitleDatePoints)
    .created_on(date(2020, 6, 1));
  let saved = s.save(input).await.unwrap();

  let latest = s.latest(user, Section::ProjectWork).await.unwrap().unwrap();
  assert_eq!(latest, saved);
}

// ─── Latest ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn latest_none_when_never_saved() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;
  assert!(s.latest(user, Section::Courses).await.unwrap().is_none());
}

#[tokio::test]
async fn latest_prefers_created_over_insertion_order() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;

  s.save(NewContent::new(user, Section::Courses, "newer").created_on(date(2024, 1, 1)))
    .await
    .unwrap();
  s.save(NewContent::new(user, Section::Courses, "backdated").created_on(date(2020, 1, 1)))
    .await
    .unwrap();

  let latest = s.latest(user, Section::Courses).await.unwrap().unwrap();
  assert_eq!(latest.body, "newer");
}

#[tokio::test]
async fn same_day_saves_last_one_wins() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;

  for body in ["first", "second", "third"] {
    s.save(NewContent::new(user, Section::Email, body).created_on(date(2024, 5, 5)))
      .await
      .unwrap();
  }

  let latest = s.latest(user, Section::Email).await.unwrap().unwrap();
  assert_eq!(latest.body, "third");
}

#[tokio::test]
async fn sections_and_users_are_isolated() {
  let s = store().await;
  let ada = s.add_profile("ada".into()).await.unwrap().profile_id;
  let bob = s.add_profile("bob".into()).await.unwrap().profile_id;

  s.save(NewContent::new(ada, Section::Name, "Ada")).await.unwrap();
  s.save(NewContent::new(bob, Section::Name, "Bob")).await.unwrap();

  assert_eq!(s.latest(ada, Section::Name).await.unwrap().unwrap().body, "Ada");
  assert_eq!(s.latest(bob, Section::Name).await.unwrap().unwrap().body, "Bob");
  assert!(s.latest(ada, Section::Link).await.unwrap().is_none());
}

// ─── History ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_latest_first_and_append_only() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;

  s.save(NewContent::new(user, Section::Education, "v1").created_on(date(2021, 1, 1)))
    .await
    .unwrap();
  s.save(NewContent::new(user, Section::Education, "v3").created_on(date(2023, 1, 1)))
    .await
    .unwrap();
  s.save(NewContent::new(user, Section::Education, "v2").created_on(date(2022, 1, 1)))
    .await
    .unwrap();

  let bodies: Vec<_> = s
    .history(user, Section::Education)
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.body)
    .collect();
  assert_eq!(bodies, ["v3", "v2", "v1"]);
}

// ─── Resume over the store ───────────────────────────────────────────────────

#[tokio::test]
async fn resume_renders_latest_content() {
  let s = store().await;
  let user = s.add_profile("ada".into()).await.unwrap().profile_id;

  s.save(NewContent::new(user, Section::Name, "Ada").created_on(date(2024, 1, 1)))
    .await
    .unwrap();
  s.save(NewContent::new(user, Section::Name, "Ada Lovelace").created_on(date(2024, 2, 1)))
    .await
    .unwrap();
  s.save(
    NewContent::new(user, Section::Courses, "2019\nRust")
      .with_formatting(FormattingMode::DatePoints)
      .created_on(date(2023, 7, 1)),
  )
  .await
  .unwrap();

  let resume = Resume::load(&s, user).await.unwrap();
  assert_eq!(resume.last_updated(), date(2024, 2, 1));

  let md = resume.render(OutputFormat::Markdown).unwrap();
  assert!(md.starts_with("Ada Lovelace\n"));
  assert!(md.contains("Courses\n* [2019] Rust\n"));
}

#[tokio::test]
async fn file_backed_store_persists() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("texume.db");

  let user = {
    let s = SqliteStore::open(&path).await.unwrap();
    let user = s.add_profile("ada".into()).await.unwrap().profile_id;
    s.save(NewContent::new(user, Section::Phone, "555")).await.unwrap();
    user
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.latest(user, Section::Phone).await.unwrap().unwrap().body, "555");
  assert!(reopened.get_profile("ada").await.unwrap().is_some());
}
