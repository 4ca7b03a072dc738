//! Machinery handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::machinery::{
    CreateMachineryInput, MachineryWithDepreciation, UpdateMachineryInput,
};
use crate::services::MachineryService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FarmAssetsQuery {
    pub farm_id: Option<String>,
}

/// List machines with their depreciation
pub async fn list_machinery(
    State(state): State<AppState>,
    Query(query): Query<FarmAssetsQuery>,
) -> AppResult<Json<Vec<MachineryWithDepreciation>>> {
    let service = MachineryService::new(state.store);
    Ok(Json(service.list_machinery(query.farm_id.as_deref()).await?))
}

pub async fn get_machinery(
    State(state): State<AppState>,
    Path(machinery_id): Path<String>,
) -> AppResult<Json<MachineryWithDepreciation>> {
    let service = MachineryService::new(state.store);
    Ok(Json(service.get_machinery(&machinery_id).await?))
}

pub async fn create_machinery(
    State(state): State<AppState>,
    Json(input): Json<CreateMachineryInput>,
) -> AppResult<(StatusCode, Json<MachineryWithDepreciation>)> {
    let service = MachineryService::new(state.store);
    let machinery = service.create_machinery(input).await?;
    Ok((StatusCode::CREATED, Json(machinery)))
}

pub async fn update_machinery(
    State(state): State<AppState>,
    Path(machinery_id): Path<String>,
    Json(input): Json<UpdateMachineryInput>,
) -> AppResult<Json<MachineryWithDepreciation>> {
    let service = MachineryService::new(state.store);
    Ok(Json(service.update_machinery(&machinery_id, input).await?))
}

pub async fn delete_machinery(
    State(state): State<AppState>,
    Path(machinery_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = MachineryService::new(state.store);
    service.delete_machinery(&machinery_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
