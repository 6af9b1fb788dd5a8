//! Flock domain model.
//!
//! A flock belongs to exactly one farm; access to it is derived
//! transitively from access to the owning farm.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flock {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub name: String,
    pub breed: String,
    pub bird_count: u32,
    pub hatched_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFlock {
    pub farm_id: Uuid,
    pub name: String,
    pub breed: String,
    pub bird_count: u32,
    pub hatched_on: DateTime<Utc>,
}
