//! ROOST Access — the request-authorization gate pipeline.
//!
//! Every API operation is gated by a linear chain of checks before it
//! reaches business logic: identity verification, then zero or more of
//! role, farm-ownership, farm-access (owner or worker membership),
//! fine-grained permission, and flock-access gates.
//!
//! Each gate is a function from an [`AccessContext`] to either an
//! augmented context (allow) or a terminal [`Denial`]. There is no
//! backtracking and no retry: the first denial short-circuits the
//! chain and is the response. Gates communicate through the typed
//! context value they thread forward, never through shared mutable
//! request state.
//!
//! The pipeline is generic over [`AccessStore`], so the SurrealDB
//! store and an in-memory test engine are interchangeable.
//!
//! [`AccessStore`]: roost_core::repository::AccessStore

pub mod context;
pub mod denial;
pub mod gates;

pub use context::{AccessContext, FarmAccess};
pub use denial::{Denial, DenyCode};
pub use gates::Gatekeeper;
