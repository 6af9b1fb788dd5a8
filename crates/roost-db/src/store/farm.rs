//! SurrealDB implementation of [`FarmStore`] — the provisioning
//! surface for users, farms, memberships, and flocks.

use chrono::{DateTime, Utc};
use roost_core::error::RoostResult;
use roost_core::models::{
    CreateFarm, CreateFlock, CreateUser, CreateWorker, Farm, Flock, Principal, UpdateUser, Worker,
};
use roost_core::repository::FarmStore;
use serde::Deserialize;
use surrealdb::sql::Datetime;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;
use crate::store::{FlockRow, parse_role, parse_uuid};

#[derive(Debug, Deserialize)]
struct UserCreateRow {
    name: String,
    email: String,
    role: String,
    is_active: bool,
    is_verified: bool,
}

#[derive(Debug, Deserialize)]
struct FarmCreateRow {
    owner_id: String,
    name: String,
    location: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WorkerCreateRow {
    user_id: String,
    farm_id: String,
    title: String,
    permissions: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct FlockCreateRow {
    farm_id: String,
    name: String,
    breed: String,
    bird_count: u32,
    hatched_on: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// SurrealDB implementation of the provisioning store.
pub struct SurrealFarmStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealFarmStore<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealFarmStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> FarmStore for SurrealFarmStore<C> {
    async fn create_user(&self, input: CreateUser) -> RoostResult<Principal> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('user', $id) SET \
                 name = $name, email = $email, role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("role", input.role.as_str()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Data(e.to_string()))?;
        let rows: Vec<UserCreateRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(Principal {
            id,
            name: row.name,
            email: row.email,
            role: parse_role(&row.role)?,
            is_active: row.is_active,
            is_verified: row.is_verified,
            owned_farms: vec![],
            memberships: vec![],
        })
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> RoostResult<()> {
        let mut sets = Vec::new();
        if input.is_active.is_some() {
            sets.push("is_active = $is_active");
        }
        if input.is_verified.is_some() {
            sets.push("is_verified = $is_verified");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::thing('user', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));
        if let Some(is_active) = input.is_active {
            builder = builder.bind(("is_active", is_active));
        }
        if let Some(is_verified) = input.is_verified {
            builder = builder.bind(("is_verified", is_verified));
        }

        builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Data(e.to_string()))?;

        Ok(())
    }

    async fn create_farm(&self, input: CreateFarm) -> RoostResult<Farm> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('farm', $id) SET \
                 owner_id = $owner_id, name = $name, location = $location",
            )
            .bind(("id", id_str.clone()))
            .bind(("owner_id", input.owner_id.to_string()))
            .bind(("name", input.name))
            .bind(("location", input.location))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Data(e.to_string()))?;
        let rows: Vec<FarmCreateRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "farm".into(),
            id: id_str,
        })?;

        Ok(Farm {
            id,
            owner_id: parse_uuid(&row.owner_id, "owner")?,
            name: row.name,
            location: row.location,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn create_worker(&self, input: CreateWorker) -> RoostResult<Worker> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('worker', $id) SET \
                 user_id = $user_id, farm_id = $farm_id, \
                 title = $title, permissions = $permissions",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("farm_id", input.farm_id.to_string()))
            .bind(("title", input.title))
            .bind(("permissions", input.permissions))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Data(e.to_string()))?;
        let rows: Vec<WorkerCreateRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "worker".into(),
            id: id_str,
        })?;

        Ok(Worker {
            id,
            user_id: parse_uuid(&row.user_id, "user")?,
            farm_id: parse_uuid(&row.farm_id, "farm")?,
            title: row.title,
            permissions: row.permissions,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn deactivate_worker(&self, id: Uuid) -> RoostResult<()> {
        self.db
            .query(
                "UPDATE type::thing('worker', $id) SET \
                 is_active = false, updated_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Data(e.to_string()))?;

        Ok(())
    }

    async fn create_flock(&self, input: CreateFlock) -> RoostResult<Flock> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('flock', $id) SET \
                 farm_id = $farm_id, name = $name, breed = $breed, \
                 bird_count = $bird_count, hatched_on = $hatched_on",
            )
            .bind(("id", id_str.clone()))
            .bind(("farm_id", input.farm_id.to_string()))
            .bind(("name", input.name))
            .bind(("breed", input.breed))
            .bind(("bird_count", input.bird_count))
            .bind(("hatched_on", Datetime::from(input.hatched_on)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Data(e.to_string()))?;
        let rows: Vec<FlockCreateRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "flock".into(),
            id: id_str,
        })?;

        Ok(Flock {
            id,
            farm_id: parse_uuid(&row.farm_id, "farm")?,
            name: row.name,
            breed: row.breed,
            bird_count: row.bird_count,
            hatched_on: row.hatched_on,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn list_flocks(&self, farm_id: Uuid) -> RoostResult<Vec<Flock>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, farm_id, name, breed, \
                 bird_count, hatched_on, created_at, updated_at \
                 FROM flock WHERE farm_id = $farm_id \
                 ORDER BY created_at ASC",
            )
            .bind(("farm_id", farm_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FlockRow> = result.take(0).map_err(DbError::from)?;
        let flocks = rows
            .into_iter()
            .map(FlockRow::try_into_flock)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(flocks)
    }
}
