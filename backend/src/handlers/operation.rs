//! Field operation handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::FieldOperation;
use crate::services::operation::{CreateOperationInput, UpdateOperationInput};
use crate::services::OperationService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListOperationsQuery {
    pub safra_id: Option<String>,
}

pub async fn list_operations(
    State(state): State<AppState>,
    Query(query): Query<ListOperationsQuery>,
) -> AppResult<Json<Vec<FieldOperation>>> {
    let service = OperationService::new(state.store);
    Ok(Json(service.list_operations(query.safra_id.as_deref()).await?))
}

pub async fn get_operation(
    State(state): State<AppState>,
    Path(operation_id): Path<String>,
) -> AppResult<Json<FieldOperation>> {
    let service = OperationService::new(state.store);
    Ok(Json(service.get_operation(&operation_id).await?))
}

pub async fn create_operation(
    State(state): State<AppState>,
    Json(input): Json<CreateOperationInput>,
) -> AppResult<(StatusCode, Json<FieldOperation>)> {
    let service = OperationService::new(state.store);
    let operation = service.create_operation(input).await?;
    Ok((StatusCode::CREATED, Json(operation)))
}

pub async fn update_operation(
    State(state): State<AppState>,
    Path(operation_id): Path<String>,
    Json(input): Json<UpdateOperationInput>,
) -> AppResult<Json<FieldOperation>> {
    let service = OperationService::new(state.store);
    Ok(Json(service.update_operation(&operation_id, input).await?))
}

pub async fn delete_operation(
    State(state): State<AppState>,
    Path(operation_id): Path<String>,
) -> AppResult<StatusCode> {
    let service = OperationService::new(state.store);
    service.delete_operation(&operation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
