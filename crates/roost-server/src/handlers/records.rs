//! Daily operational record routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use roost_core::models::{CreateFeedRecord, CreateHealthRecord};
use roost_core::repository::RecordStore;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::ok;
use crate::middleware::Authenticated;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedRecordBody {
    pub feed_type: String,
    pub quantity_kg: f64,
}

/// `POST /flocks/{flock_id}/feed-records`
///
/// Chain: identity → flock access → permission("feeding").
pub async fn create_feed_record<C: Connection>(
    State(state): State<AppState<C>>,
    Authenticated(ctx): Authenticated,
    Path(flock_id): Path<Uuid>,
    Json(body): Json<FeedRecordBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let ctx = state
        .gatekeeper
        .require_flock_access(ctx, Some(flock_id))
        .await?;
    state.gatekeeper.require_permission(&ctx, &["feeding"])?;

    let record = state
        .records
        .create_feed_record(CreateFeedRecord {
            flock_id,
            recorded_by: ctx.principal.id,
            feed_type: body.feed_type,
            quantity_kg: body.quantity_kg,
        })
        .await?;

    Ok((StatusCode::CREATED, ok("Feed record created", record)))
}

#[derive(Debug, Deserialize)]
pub struct HealthRecordBody {
    pub symptoms: String,
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub mortality_count: u32,
}

/// `POST /flocks/{flock_id}/health-records`
///
/// Chain: identity → flock access → permission("health").
pub async fn create_health_record<C: Connection>(
    State(state): State<AppState<C>>,
    Authenticated(ctx): Authenticated,
    Path(flock_id): Path<Uuid>,
    Json(body): Json<HealthRecordBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let ctx = state
        .gatekeeper
        .require_flock_access(ctx, Some(flock_id))
        .await?;
    state.gatekeeper.require_permission(&ctx, &["health"])?;

    let record = state
        .records
        .create_health_record(CreateHealthRecord {
            flock_id,
            recorded_by: ctx.principal.id,
            symptoms: body.symptoms,
            diagnosis: body.diagnosis,
            mortality_count: body.mortality_count,
        })
        .await?;

    Ok((StatusCode::CREATED, ok("Health record created", record)))
}
