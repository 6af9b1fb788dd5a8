//! The typed authorization context threaded from gate to gate.

use roost_auth::AccessTokenClaims;
use roost_core::models::{Farm, FarmRef, Flock, Principal, Worker};
use uuid::Uuid;

/// Effective access a principal holds on a farm, resolved once and
/// consumed uniformly by the worker, permission, and flock gates.
///
/// Ownership grants implicit full rights and is always checked before
/// membership.
#[derive(Debug, Clone)]
pub enum FarmAccess {
    /// The principal owns the farm; the full farm row was fetched.
    Owner(Farm),
    /// The principal holds an active worker membership; only a minimal
    /// stub of the farm was fetched.
    Member { worker: Worker, farm: FarmRef },
}

impl FarmAccess {
    pub fn farm_id(&self) -> Uuid {
        match self {
            FarmAccess::Owner(farm) => farm.id,
            FarmAccess::Member { farm, .. } => farm.id,
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, FarmAccess::Owner(_))
    }
}

/// Everything earlier gates have resolved for the current request.
///
/// Constructed by the identity stage; later gates consume it and
/// return an augmented copy on allow. A context always carries an
/// authenticated principal — there is no unauthenticated variant.
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub principal: Principal,
    /// Raw decoded token claims.
    pub claims: AccessTokenClaims,
    /// Farm access established by an ownership/worker/flock gate, if
    /// one has run.
    pub access: Option<FarmAccess>,
    /// Flock resolved by the flock-access gate, if it has run.
    pub flock: Option<Flock>,
}

impl AccessContext {
    pub fn new(principal: Principal, claims: AccessTokenClaims) -> Self {
        Self {
            principal,
            claims,
            access: None,
            flock: None,
        }
    }
}
