//! ROOST Server — HTTP API wiring for the access-control core.
//!
//! The router layers the identity stage as middleware; the remaining
//! gates run as explicit calls at the top of each handler, in the
//! order the route's chain requires.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
