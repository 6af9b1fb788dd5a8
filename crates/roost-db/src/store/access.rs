//! SurrealDB implementation of [`AccessStore`] — the read-only point
//! lookups the gate pipeline issues.

use roost_core::error::RoostResult;
use roost_core::models::{Farm, FarmRef, Flock, OwnedFarm, Principal, Worker};
use roost_core::repository::AccessStore;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;
use crate::store::{FarmRow, FlockRow, WorkerRow, parse_role, parse_uuid};

#[derive(Debug, Deserialize)]
struct PrincipalRow {
    record_id: String,
    name: String,
    email: String,
    role: String,
    is_active: bool,
    is_verified: bool,
}

#[derive(Debug, Deserialize)]
struct OwnedFarmRow {
    record_id: String,
    name: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct FarmRefRow {
    record_id: String,
    name: String,
}

/// SurrealDB implementation of the access-control lookups.
pub struct SurrealAccessStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealAccessStore<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealAccessStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AccessStore for SurrealAccessStore<C> {
    async fn find_principal(&self, id: Uuid) -> RoostResult<Option<Principal>> {
        let id_str = id.to_string();

        // Principal plus its ownership and membership projections in a
        // single round trip.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, name, email, role, \
                 is_active, is_verified \
                 FROM type::thing('user', $id);
                 SELECT meta::id(id) AS record_id, name, is_active \
                 FROM farm WHERE owner_id = $id;
                 SELECT meta::id(id) AS record_id, user_id, farm_id, \
                 title, permissions, is_active, created_at, updated_at \
                 FROM worker WHERE user_id = $id",
            )
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;

        let users: Vec<PrincipalRow> = result.take(0).map_err(DbError::from)?;
        let Some(user) = users.into_iter().next() else {
            return Ok(None);
        };

        let farm_rows: Vec<OwnedFarmRow> = result.take(1).map_err(DbError::from)?;
        let worker_rows: Vec<WorkerRow> = result.take(2).map_err(DbError::from)?;

        let owned_farms = farm_rows
            .into_iter()
            .map(|row| {
                Ok(OwnedFarm {
                    id: parse_uuid(&row.record_id, "farm")?,
                    name: row.name,
                    is_active: row.is_active,
                })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        let memberships = worker_rows
            .into_iter()
            .map(WorkerRow::try_into_worker)
            .collect::<Result<Vec<Worker>, DbError>>()?;

        Ok(Some(Principal {
            id: parse_uuid(&user.record_id, "user")?,
            name: user.name,
            email: user.email,
            role: parse_role(&user.role)?,
            is_active: user.is_active,
            is_verified: user.is_verified,
            owned_farms,
            memberships,
        }))
    }

    async fn find_farm_owned_by(&self, farm_id: Uuid, owner_id: Uuid) -> RoostResult<Option<Farm>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, owner_id, name, \
                 location, is_active, created_at, updated_at \
                 FROM type::thing('farm', $id) \
                 WHERE owner_id = $owner_id",
            )
            .bind(("id", farm_id.to_string()))
            .bind(("owner_id", owner_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FarmRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_farm()?)),
            None => Ok(None),
        }
    }

    async fn find_active_membership(
        &self,
        user_id: Uuid,
        farm_id: Uuid,
    ) -> RoostResult<Option<(Worker, FarmRef)>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, user_id, farm_id, \
                 title, permissions, is_active, created_at, updated_at \
                 FROM worker \
                 WHERE user_id = $user_id AND farm_id = $farm_id \
                 AND is_active = true;
                 SELECT meta::id(id) AS record_id, name \
                 FROM type::thing('farm', $farm_id)",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("farm_id", farm_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let worker_rows: Vec<WorkerRow> = result.take(0).map_err(DbError::from)?;
        let Some(worker_row) = worker_rows.into_iter().next() else {
            return Ok(None);
        };
        let worker = worker_row.try_into_worker()?;

        let farm_rows: Vec<FarmRefRow> = result.take(1).map_err(DbError::from)?;
        let farm_row = farm_rows.into_iter().next().ok_or_else(|| {
            DbError::Data(format!(
                "worker membership {} references missing farm {farm_id}",
                worker.id
            ))
        })?;

        let farm = FarmRef {
            id: parse_uuid(&farm_row.record_id, "farm")?,
            name: farm_row.name,
        };

        Ok(Some((worker, farm)))
    }

    async fn find_flock(&self, flock_id: Uuid) -> RoostResult<Option<Flock>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, farm_id, name, breed, \
                 bird_count, hatched_on, created_at, updated_at \
                 FROM type::thing('flock', $id)",
            )
            .bind(("id", flock_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FlockRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_flock()?)),
            None => Ok(None),
        }
    }
}
