//! Farm domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    /// The single owning principal.
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal farm stub attached to the context on the membership path,
/// where the full farm row was never fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFarm {
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
}
