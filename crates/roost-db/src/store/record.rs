//! SurrealDB implementation of [`RecordStore`] — daily operational
//! record writes.

use chrono::{DateTime, Utc};
use roost_core::error::RoostResult;
use roost_core::models::{CreateFeedRecord, CreateHealthRecord, FeedRecord, HealthRecord};
use roost_core::repository::RecordStore;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;
use crate::store::parse_uuid;

#[derive(Debug, Deserialize)]
struct FeedRecordRow {
    flock_id: String,
    recorded_by: String,
    feed_type: String,
    quantity_kg: f64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct HealthRecordRow {
    flock_id: String,
    recorded_by: String,
    symptoms: String,
    diagnosis: Option<String>,
    mortality_count: u32,
    created_at: DateTime<Utc>,
}

/// SurrealDB implementation of the record store.
pub struct SurrealRecordStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealRecordStore<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealRecordStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RecordStore for SurrealRecordStore<C> {
    async fn create_feed_record(&self, input: CreateFeedRecord) -> RoostResult<FeedRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('feed_record', $id) SET \
                 flock_id = $flock_id, recorded_by = $recorded_by, \
                 feed_type = $feed_type, quantity_kg = $quantity_kg",
            )
            .bind(("id", id_str.clone()))
            .bind(("flock_id", input.flock_id.to_string()))
            .bind(("recorded_by", input.recorded_by.to_string()))
            .bind(("feed_type", input.feed_type))
            .bind(("quantity_kg", input.quantity_kg))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Data(e.to_string()))?;
        let rows: Vec<FeedRecordRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "feed_record".into(),
            id: id_str,
        })?;

        Ok(FeedRecord {
            id,
            flock_id: parse_uuid(&row.flock_id, "flock")?,
            recorded_by: parse_uuid(&row.recorded_by, "user")?,
            feed_type: row.feed_type,
            quantity_kg: row.quantity_kg,
            created_at: row.created_at,
        })
    }

    async fn create_health_record(&self, input: CreateHealthRecord) -> RoostResult<HealthRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('health_record', $id) SET \
                 flock_id = $flock_id, recorded_by = $recorded_by, \
                 symptoms = $symptoms, diagnosis = $diagnosis, \
                 mortality_count = $mortality_count",
            )
            .bind(("id", id_str.clone()))
            .bind(("flock_id", input.flock_id.to_string()))
            .bind(("recorded_by", input.recorded_by.to_string()))
            .bind(("symptoms", input.symptoms))
            .bind(("diagnosis", input.diagnosis))
            .bind(("mortality_count", input.mortality_count))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Data(e.to_string()))?;
        let rows: Vec<HealthRecordRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "health_record".into(),
            id: id_str,
        })?;

        Ok(HealthRecord {
            id,
            flock_id: parse_uuid(&row.flock_id, "flock")?,
            recorded_by: parse_uuid(&row.recorded_by, "user")?,
            symptoms: row.symptoms,
            diagnosis: row.diagnosis,
            mortality_count: row.mortality_count,
            created_at: row.created_at,
        })
    }
}
