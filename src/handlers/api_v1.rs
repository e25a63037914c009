use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::router::UpdaterState;

/// Device metadata in the v1 response envelope.
pub async fn device(
    State(state): State<UpdaterState>,
    Path(device): Path<String>,
) -> Result<Json<Value>, AppError> {
    let device = state.provider.get_device(&device).await?;
    Ok(Json(json!({ "response": [device] })))
}

/// Build list in the v1 response envelope.
pub async fn builds(
    State(state): State<UpdaterState>,
    Path(device): Path<String>,
) -> Result<Json<Value>, AppError> {
    let builds = state.provider.list_builds(&device).await?;
    Ok(Json(json!({ "response": builds })))
}
