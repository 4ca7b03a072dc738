//! Harvest handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::Harvest;
use crate::services::harvest::{CreateHarvestInput, UpdateHarvestInput};
use crate::services::HarvestService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListHarvestsQuery {
    pub safra_id: Option<String>,
}

pub async fn list_harvests(
    State(state): State<AppState>,
    Query(query): Query<ListHarvestsQuery>,
) -> AppResult<Json<Vec<Harvest>>> {
    let service = HarvestService::new(state.store);
    Ok(Json(service.list_harvests(query.safra_id.as_deref()).await?))
}

pub async fn get_harvest(
    State(state): State<AppState>,
    Path(harvest_id): Path<String>,
) -> AppResult<Json<Harvest>> {
    let service = HarvestService::new(state.store);
    Ok(Json(service.get_harvest(&harvest_id).await?))
}

pub async fn record_harvest(
    State(state): State<AppState>,
    Json(input): Json<CreateHarvestInput>,
) -> AppResult<(StatusCode, Json<Harvest>)> {
    let service = HarvestService::new(state.store);
    let harvest = service.record_harvest(input).await?;
    Ok((StatusCode::CREATED, Json(harvest)))
}

pub async fn update_harvest(
    State(state): State<AppState>,
    Path(harvest_id): Path<String>,
    Json(input): Json<UpdateHarvestInput>,
) -> AppResult<Json<Harvest>> {
    let service = HarvestService::new(state.store);
    Ok(Json(service.update_harvest(&harvest_id, input).await?))
}

pub async fn delete_harvest(
    State(state): State<AppState>,
    Path(harvest_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = HarvestService::new(state.store);
    service.delete_harvest(&harvest_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
