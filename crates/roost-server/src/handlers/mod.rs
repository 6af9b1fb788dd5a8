//! Route handlers.

pub mod farms;
pub mod records;

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Success envelope: `{ success: true, message, data }`.
pub(crate) fn ok<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
        "data": data,
    }))
}
