//! Principal (user) domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::worker::Worker;

/// Platform-wide role of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Farmer,
    Worker,
    Vet,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "FARMER",
            Role::Worker => "WORKER",
            Role::Vet => "VET",
        }
    }
}

/// Summary of a farm as embedded in a resolved principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedFarm {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

/// An authenticated user identity, resolved with its ownership and
/// membership projections.
///
/// This is the shape the identity stage attaches to the request
/// context: downstream gates read `owned_farms` and `memberships`
/// without issuing further principal lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    /// Farms this principal owns (id/name/active projection).
    pub owned_farms: Vec<OwnedFarm>,
    /// Active and inactive worker memberships held by this principal.
    pub memberships: Vec<Worker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Targeted account-state updates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}
