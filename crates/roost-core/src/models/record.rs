//! Daily operational record models (feed, health).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRecord {
    pub id: Uuid,
    pub flock_id: Uuid,
    /// Principal who submitted the record.
    pub recorded_by: Uuid,
    pub feed_type: String,
    pub quantity_kg: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeedRecord {
    pub flock_id: Uuid,
    pub recorded_by: Uuid,
    pub feed_type: String,
    pub quantity_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub flock_id: Uuid,
    pub recorded_by: Uuid,
    pub symptoms: String,
    pub diagnosis: Option<String>,
    pub mortality_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHealthRecord {
    pub flock_id: Uuid,
    pub recorded_by: Uuid,
    pub symptoms: String,
    pub diagnosis: Option<String>,
    pub mortality_count: u32,
}
