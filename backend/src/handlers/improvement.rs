//! Improvement handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::machinery::FarmAssetsQuery;
use crate::error::AppResult;
use crate::services::improvement::{
    CreateImprovementInput, ImprovementWithBalance, UpdateImprovementInput,
};
use crate::services::ImprovementService;
use crate::AppState;

/// List improvements with their installment position
pub async fn list_improvements(
    State(state): State<AppState>,
    Query(query): Query<FarmAssetsQuery>,
) -> AppResult<Json<Vec<ImprovementWithBalance>>> {
    let service = ImprovementService::new(state.store);
    Ok(Json(service.list_improvements(query.farm_id.as_deref()).await?))
}

pub async fn get_improvement(
    State(state): State<AppState>,
    Path(improvement_id): Path<String>,
) -> AppResult<Json<ImprovementWithBalance>> {
    let service = ImprovementService::new(state.store);
    Ok(Json(service.get_improvement(&improvement_id).await?))
}

pub async fn create_improvement(
    State(state): State<AppState>,
    Json(input): Json<CreateImprovementInput>,
) -> AppResult<(StatusCode, Json<ImprovementWithBalance>)> {
    let service = ImprovementService::new(state.store);
    let improvement = service.create_improvement(input).await?;
    Ok((StatusCode::CREATED, Json(improvement)))
}

pub async fn update_improvement(
    State(state): State<AppState>,
    Path(improvement_id): Path<String>,
    Json(input): Json<UpdateImprovementInput>,
) -> AppResult<Json<ImprovementWithBalance>> {
    let service = ImprovementService::new(state.store);
    Ok(Json(service.update_improvement(&improvement_id, input).await?))
}

pub async fn delete_improvement(
    State(state): State<AppState>,
    Path(improvement_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = ImprovementService::new(state.store);
    service.delete_improvement(&improvement_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
