//! Shared application state.

use std::sync::Arc;

use roost_access::Gatekeeper;
use roost_auth::TokenConfig;
use roost_db::{SurrealAccessStore, SurrealFarmStore, SurrealRecordStore};
use surrealdb::{Connection, Surreal};

/// State injected into every handler.
///
/// Generic over the SurrealDB engine so the tests run against the
/// in-memory engine with the exact same wiring.
pub struct AppState<C: Connection> {
    pub gatekeeper: Arc<Gatekeeper<SurrealAccessStore<C>>>,
    pub farms: SurrealFarmStore<C>,
    pub records: SurrealRecordStore<C>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            gatekeeper: Arc::clone(&self.gatekeeper),
            farms: self.farms.clone(),
            records: self.records.clone(),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, tokens: TokenConfig) -> Self {
        Self {
            gatekeeper: Arc::new(Gatekeeper::new(
                SurrealAccessStore::new(db.clone()),
                tokens,
            )),
            farms: SurrealFarmStore::new(db.clone()),
            records: SurrealRecordStore::new(db),
        }
    }
}
