//! Profile: the owner of a set of résumé content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user who owns content. Holds identity metadata only; everything shown on
/// the résumé lives in [`crate::content::Content`] records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub profile_id: Uuid,
  pub username:   String,
  pub created_at: DateTime<Utc>,
}
