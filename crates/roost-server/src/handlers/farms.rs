//! Farm routes.

use axum::Json;
use axum::extract::{Path, State};
use roost_access::FarmAccess;
use roost_core::RoostError;
use roost_core::models::Role;
use roost_core::repository::FarmStore;
use serde_json::Value;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::ok;
use crate::middleware::Authenticated;
use crate::state::AppState;

/// `GET /farms` — list the caller's owned farms.
///
/// Chain: identity → role(FARMER).
pub async fn list_farms<C: Connection>(
    State(state): State<AppState<C>>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<Value>, ApiError> {
    state.gatekeeper.require_role(&ctx, &[Role::Farmer])?;
    Ok(ok("Farms retrieved", &ctx.principal.owned_farms))
}

/// `GET /farms/{farm_id}` — fetch a farm the caller owns.
///
/// Chain: identity → farm ownership.
pub async fn get_farm<C: Connection>(
    State(state): State<AppState<C>>,
    Authenticated(ctx): Authenticated,
    Path(farm_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let ctx = state
        .gatekeeper
        .require_farm_owner(ctx, Some(farm_id))
        .await?;

    // The ownership gate only ever attaches owner access.
    match ctx.access {
        Some(FarmAccess::Owner(farm)) => Ok(ok("Farm retrieved", farm)),
        _ => Err(RoostError::Internal("ownership gate did not attach a farm".into()).into()),
    }
}

/// `GET /farms/{farm_id}/flocks` — list flocks on a farm the caller
/// owns or works on.
///
/// Chain: identity → farm access (owner or active membership).
pub async fn list_farm_flocks<C: Connection>(
    State(state): State<AppState<C>>,
    Authenticated(ctx): Authenticated,
    Path(farm_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state
        .gatekeeper
        .require_farm_access(ctx, Some(farm_id))
        .await?;

    let flocks = state.farms.list_flocks(farm_id).await?;
    Ok(ok("Flocks retrieved", flocks))
}
