//! Worker membership domain model.
//!
//! A worker record links a principal to a farm it does not own, with a
//! job title and a set of fine-grained permission strings (e.g.
//! `feeding`, `health`, `weight`, `eggs`). One active membership per
//! (user, farm) pair is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: Uuid,
    pub user_id: Uuid,
    pub farm_id: Uuid,
    /// Job title on the farm (free text, not the platform [`Role`]).
    ///
    /// [`Role`]: crate::models::user::Role
    pub title: String,
    /// Fine-grained capabilities held by this membership.
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorker {
    pub user_id: Uuid,
    pub farm_id: Uuid,
    pub title: String,
    pub permissions: Vec<String>,
}
