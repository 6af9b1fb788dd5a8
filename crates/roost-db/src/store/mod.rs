//! SurrealDB store implementations.

mod access;
mod farm;
mod record;

pub use access::SurrealAccessStore;
pub use farm::SurrealFarmStore;
pub use record::SurrealRecordStore;

use chrono::{DateTime, Utc};
use roost_core::models::{Role, Worker};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn parse_role(s: &str) -> Result<Role, DbError> {
    match s {
        "FARMER" => Ok(Role::Farmer),
        "WORKER" => Ok(Role::Worker),
        "VET" => Ok(Role::Vet),
        other => Err(DbError::Data(format!("unknown role: {other}"))),
    }
}

pub(crate) fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Data(format!("invalid {what} UUID: {e}")))
}

/// DB-side worker membership row, shared by the access and farm
/// stores.
#[derive(Debug, Deserialize)]
pub(crate) struct WorkerRow {
    pub record_id: String,
    pub user_id: String,
    pub farm_id: String,
    pub title: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkerRow {
    pub(crate) fn try_into_worker(self) -> Result<Worker, DbError> {
        Ok(Worker {
            id: parse_uuid(&self.record_id, "worker")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            farm_id: parse_uuid(&self.farm_id, "farm")?,
            title: self.title,
            permissions: self.permissions,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side flock row, shared by the access and farm stores.
#[derive(Debug, Deserialize)]
pub(crate) struct FlockRow {
    pub record_id: String,
    pub farm_id: String,
    pub name: String,
    pub breed: String,
    pub bird_count: u32,
    pub hatched_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlockRow {
    pub(crate) fn try_into_flock(self) -> Result<roost_core::models::Flock, DbError> {
        Ok(roost_core::models::Flock {
            id: parse_uuid(&self.record_id, "flock")?,
            farm_id: parse_uuid(&self.farm_id, "farm")?,
            name: self.name,
            breed: self.breed,
            bird_count: self.bird_count,
            hatched_on: self.hatched_on,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side farm row, shared by the access and farm stores.
#[derive(Debug, Deserialize)]
pub(crate) struct FarmRow {
    pub record_id: String,
    pub owner_id: String,
    pub name: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FarmRow {
    pub(crate) fn try_into_farm(self) -> Result<roost_core::models::Farm, DbError> {
        Ok(roost_core::models::Farm {
            id: parse_uuid(&self.record_id, "farm")?,
            owner_id: parse_uuid(&self.owner_id, "owner")?,
            name: self.name,
            location: self.location,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
