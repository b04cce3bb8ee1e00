//! Per-user cache of loaded résumés.
//!
//! Entries are built on first read and dropped when the user saves content,
//! so reads between writes do not hit the store.

use std::{collections::HashMap, sync::Arc};

use texume_core::{resume::Resume, store::ContentStore};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ResumeCache {
  entries: RwLock<HashMap<Uuid, Arc<Resume>>>,
}

impl ResumeCache {
  pub fn new() -> Self { Self::default() }

  /// The cached résumé for `user_id`, loading it from `store` on a miss.
  ///
  /// Loads run under the write lock, so an [`invalidate`](Self::invalidate)
  /// issued after a save always evicts anything loaded before it.
  pub async fn get_or_load<S: ContentStore>(
    &self,
    store: &S,
    user_id: Uuid,
  ) -> Result<Arc<Resume>, S::Error> {
    if let Some(resume) = self.entries.read().await.get(&user_id) {
      return Ok(Arc::clone(resume));
    }

    let mut entries = self.entries.write().await;
    if let Some(resume) = entries.get(&user_id) {
      return Ok(Arc::clone(resume));
    }

    let resume = Arc::new(Resume::load(store, user_id).await?);
    entries.insert(user_id, Arc::clone(&resume));
    tracing::debug!(user = %user_id, "resume cached");
    Ok(resume)
  }

  pub async fn invalidate(&self, user_id: Uuid) {
    if self.entries.write().await.remove(&user_id).is_some() {
      tracing::debug!(user = %user_id, "resume cache invalidated");
    }
  }
}
