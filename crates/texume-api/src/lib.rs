//! JSON REST API for texume.
//!
//! Exposes an axum [`Router`] backed by any [`texume_core::store::ContentStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", texume_api::api_router(ApiState::new(store.clone())))
//! ```

pub mod cache;
pub mod content;
pub mod error;
pub mod etag;
pub mod profiles;
pub mod resume;

use std::sync::Arc;

use axum::{Router, routing::get};
use texume_core::store::ContentStore;

pub use cache::ResumeCache;
pub use error::ApiError;

/// State shared by every API handler.
pub struct ApiState<S> {
  pub store: Arc<S>,
  pub cache: Arc<ResumeCache>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, cache: Arc::new(ResumeCache::new()) }
  }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), cache: Arc::clone(&self.cache) }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ContentStore + 'static,
{
  Router::new()
    // Profiles
    .route("/profiles", axum::routing::post(profiles::create::<S>))
    .route("/profiles/{username}", get(profiles::get_one::<S>))
    // Content
    .route(
      "/profiles/{username}/content",
      get(content::list::<S>).post(content::save::<S>),
    )
    .route("/profiles/{username}/content/{section}", get(content::get_one::<S>))
    .route(
      "/profiles/{username}/content/{section}/history",
      get(content::history::<S>),
    )
    // Rendering
    .route("/profiles/{username}/resume", get(resume::render::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
