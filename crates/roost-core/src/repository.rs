//! Store trait definitions for data access abstraction.
//!
//! All store operations are async. The access-control gates consume
//! [`AccessStore`] only; [`FarmStore`] and [`RecordStore`] are the
//! write-side surface the platform's CRUD routes use.

use uuid::Uuid;

use crate::error::RoostResult;
use crate::models::{
    farm::{CreateFarm, Farm, FarmRef},
    flock::{CreateFlock, Flock},
    record::{CreateFeedRecord, CreateHealthRecord, FeedRecord, HealthRecord},
    user::{CreateUser, Principal, UpdateUser},
    worker::{CreateWorker, Worker},
};

/// Read-only point lookups consumed by the access-control gates.
///
/// Absence of a row is a normal outcome the gates branch on, so every
/// lookup returns `Option`; the `Err` channel carries infrastructure
/// faults only.
pub trait AccessStore: Send + Sync {
    /// Resolve a principal with its embedded farm-ownership and
    /// worker-membership projections.
    fn find_principal(&self, id: Uuid) -> impl Future<Output = RoostResult<Option<Principal>>> + Send;

    /// Find a farm by id, constrained to a given owner.
    fn find_farm_owned_by(
        &self,
        farm_id: Uuid,
        owner_id: Uuid,
    ) -> impl Future<Output = RoostResult<Option<Farm>>> + Send;

    /// Find the active worker membership of a user on a farm, with a
    /// minimal stub of the farm it belongs to.
    fn find_active_membership(
        &self,
        user_id: Uuid,
        farm_id: Uuid,
    ) -> impl Future<Output = RoostResult<Option<(Worker, FarmRef)>>> + Send;

    /// Find a flock by id.
    fn find_flock(&self, flock_id: Uuid) -> impl Future<Output = RoostResult<Option<Flock>>> + Send;
}

/// Provisioning surface for users, farms, memberships, and flocks.
pub trait FarmStore: Send + Sync {
    fn create_user(&self, input: CreateUser) -> impl Future<Output = RoostResult<Principal>> + Send;

    fn update_user(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = RoostResult<()>> + Send;

    fn create_farm(&self, input: CreateFarm) -> impl Future<Output = RoostResult<Farm>> + Send;

    fn create_worker(&self, input: CreateWorker)
    -> impl Future<Output = RoostResult<Worker>> + Send;

    /// Deactivate a worker membership (soft removal).
    fn deactivate_worker(&self, id: Uuid) -> impl Future<Output = RoostResult<()>> + Send;

    fn create_flock(&self, input: CreateFlock) -> impl Future<Output = RoostResult<Flock>> + Send;

    fn list_flocks(&self, farm_id: Uuid) -> impl Future<Output = RoostResult<Vec<Flock>>> + Send;
}

/// Daily operational record writes.
pub trait RecordStore: Send + Sync {
    fn create_feed_record(
        &self,
        input: CreateFeedRecord,
    ) -> impl Future<Output = RoostResult<FeedRecord>> + Send;

    fn create_health_record(
        &self,
        input: CreateHealthRecord,
    ) -> impl Future<Output = RoostResult<HealthRecord>> + Send;
}
