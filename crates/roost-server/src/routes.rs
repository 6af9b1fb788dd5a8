//! Route table.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use surrealdb::Connection;

use crate::handlers::{farms, records};
use crate::middleware::authenticate;
use crate::state::AppState;

pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/farms", get(farms::list_farms::<C>))
        .route("/farms/{farm_id}", get(farms::get_farm::<C>))
        .route("/farms/{farm_id}/flocks", get(farms::list_farm_flocks::<C>))
        .route(
            "/flocks/{flock_id}/feed-records",
            post(records::create_feed_record::<C>),
        )
        .route(
            "/flocks/{flock_id}/health-records",
            post(records::create_health_record::<C>),
        )
        .layer(from_fn_with_state(state.clone(), authenticate::<C>))
        .with_state(state)
}
