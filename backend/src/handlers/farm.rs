//! Farm handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::models::Farm;
use crate::services::farm::{CreateFarmInput, UpdateFarmInput};
use crate::services::FarmService;
use crate::AppState;

pub async fn list_farms(State(state): State<AppState>) -> AppResult<Json<Vec<Farm>>> {
    let service = FarmService::new(state.store);
    Ok(Json(service.list_farms().await?))
}

pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> AppResult<Json<Farm>> {
    let service = FarmService::new(state.store);
    Ok(Json(service.get_farm(&farm_id).await?))
}

pub async fn create_farm(
    State(state): State<AppState>,
    Json(input): Json<CreateFarmInput>,
) -> AppResult<(StatusCode, Json<Farm>)> {
    let service = FarmService::new(state.store);
    let farm = service.create_farm(input).await?;
    Ok((StatusCode::CREATED, Json(farm)))
}

pub async fn update_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
    Json(input): Json<UpdateFarmInput>,
) -> AppResult<Json<Farm>> {
    let service = FarmService::new(state.store);
    Ok(Json(service.update_farm(&farm_id, input).await?))
}

pub async fn delete_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = FarmService::new(state.store);
    service.delete_farm(&farm_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
