//! Domain models for the ROOST platform.

pub mod farm;
pub mod flock;
pub mod record;
pub mod user;
pub mod worker;

pub use farm::{CreateFarm, Farm, FarmRef};
pub use flock::{CreateFlock, Flock};
pub use record::{CreateFeedRecord, CreateHealthRecord, FeedRecord, HealthRecord};
pub use user::{CreateUser, OwnedFarm, Principal, Role, UpdateUser};
pub use worker::{CreateWorker, Worker};
