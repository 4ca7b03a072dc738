//! Crop cycle handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{Safra, SafraIndicators};
use crate::services::safra::{CreateSafraInput, UpdateSafraInput};
use crate::services::{ResultsService, SafraService};
use crate::AppState;

/// Query parameters for listing crop cycles
#[derive(Debug, Deserialize)]
pub struct ListSafrasQuery {
    pub include_inactive: Option<bool>,
}

/// Body of the finish request
#[derive(Debug, Deserialize)]
pub struct FinishSafraRequest {
    pub end_date: String,
}

/// List crop cycles; inactive ones only when asked for
pub async fn list_safras(
    State(state): State<AppState>,
    Query(query): Query<ListSafrasQuery>,
) -> AppResult<Json<Vec<Safra>>> {
    let service = SafraService::new(state.store);
    let include_inactive = query.include_inactive.unwrap_or(false);
    Ok(Json(service.list_safras(include_inactive).await?))
}

pub async fn get_safra(
    State(state): State<AppState>,
    Path(safra_id): Path<String>,
) -> AppResult<Json<Safra>> {
    let service = SafraService::new(state.store);
    Ok(Json(service.get_safra(&safra_id).await?))
}

pub async fn create_safra(
    State(state): State<AppState>,
    Json(input): Json<CreateSafraInput>,
) -> AppResult<(StatusCode, Json<Safra>)> {
    let service = SafraService::new(state.store);
    let safra = service.create_safra(input).await?;
    Ok((StatusCode::CREATED, Json(safra)))
}

pub async fn update_safra(
    State(state): State<AppState>,
    Path(safra_id): Path<String>,
    Json(input): Json<UpdateSafraInput>,
) -> AppResult<Json<Safra>> {
    let service = SafraService::new(state.store);
    Ok(Json(service.update_safra(&safra_id, input).await?))
}

pub async fn delete_safra(
    State(state): State<AppState>,
    Path(safra_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = SafraService::new(state.store);
    service.delete_safra(&safra_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Close a crop cycle
pub async fn finish_safra(
    State(state): State<AppState>,
    Path(safra_id): Path<String>,
    Json(body): Json<FinishSafraRequest>,
) -> AppResult<Json<Safra>> {
    let service = SafraService::new(state.store);
    Ok(Json(service.finish_safra(&safra_id, body.end_date).await?))
}

/// Indicators of one crop cycle
pub async fn get_safra_results(
    State(state): State<AppState>,
    Path(safra_id): Path<String>,
) -> AppResult<Json<SafraIndicators>> {
    let service = ResultsService::new(state.store);
    Ok(Json(service.indicators_for(&safra_id).await?))
}
