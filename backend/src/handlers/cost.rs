//! Cost handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Cost, CostKind};
use crate::services::cost::{CreateCostInput, UpdateCostInput};
use crate::services::CostService;
use crate::AppState;

/// `?kind=variable&safra_id=...` or `?kind=fixed`; no kind lists everything
#[derive(Debug, Deserialize)]
pub struct ListCostsQuery {
    pub kind: Option<CostKind>,
    pub safra_id: Option<String>,
}

pub async fn list_costs(
    State(state): State<AppState>,
    Query(query): Query<ListCostsQuery>,
) -> AppResult<Json<Vec<Cost>>> {
    let service = CostService::new(state.store);
    let costs = match (query.kind, query.safra_id) {
        (Some(CostKind::Variable), Some(safra_id)) => service.list_variable_costs(&safra_id).await?,
        (Some(CostKind::Variable), None) => {
            return Err(AppError::ValidationError(
                "safra_id is required when listing variable costs".to_string(),
            ))
        }
        (Some(CostKind::Fixed), _) => service.list_fixed_costs().await?,
        (None, _) => service.list_costs().await?,
    };
    Ok(Json(costs))
}

pub async fn get_cost(
    State(state): State<AppState>,
    Path(cost_id): Path<String>,
) -> AppResult<Json<Cost>> {
    let service = CostService::new(state.store);
    Ok(Json(service.get_cost(&cost_id).await?))
}

pub async fn create_cost(
    State(state): State<AppState>,
    Json(input): Json<CreateCostInput>,
) -> AppResult<(StatusCode, Json<Cost>)> {
    let service = CostService::new(state.store);
    let cost = service.create_cost(input).await?;
    Ok((StatusCode::CREATED, Json(cost)))
}

pub async fn update_cost(
    State(state): State<AppState>,
    Path(cost_id): Path<String>,
    Json(input): Json<UpdateCostInput>,
) -> AppResult<Json<Cost>> {
    let service = CostService::new(state.store);
    Ok(Json(service.update_cost(&cost_id, input).await?))
}

pub async fn delete_cost(
    State(state): State<AppState>,
    Path(cost_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = CostService::new(state.store);
    service.delete_cost(&cost_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
