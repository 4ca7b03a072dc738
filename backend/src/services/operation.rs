//! Field operation (manejo) service

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::{FieldOperation, OperationType};
use crate::store::Store;
use shared::types::sum_or_zero;
use shared::validation::{validate_money, validate_record_date};

#[derive(Clone)]
pub struct OperationService {
    store: Arc<Store>,
}

/// Input for recording a field operation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOperationInput {
    #[validate(length(min = 1))]
    pub safra_id: String,
    pub date: String,
    pub operation_type: OperationType,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub details: String,
    pub cost: Decimal,
}

/// Input for updating a field operation
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOperationInput {
    pub date: Option<String>,
    pub operation_type: Option<OperationType>,
    #[validate(length(max = 500))]
    pub details: Option<String>,
    pub cost: Option<Decimal>,
}

fn check_operation(operation: &FieldOperation) -> AppResult<()> {
    check("date", validate_record_date(&operation.date))?;
    check("cost", validate_money(operation.cost))
}

impl OperationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Operations of one crop cycle, or every operation when no cycle is given
    pub async fn list_operations(&self, safra_id: Option<&str>) -> AppResult<Vec<FieldOperation>> {
        let operations = self.store.operations.list().await;
        Ok(match safra_id {
            Some(id) => operations.into_iter().filter(|o| o.safra_id == id).collect(),
            None => operations,
        })
    }

    pub async fn get_operation(&self, operation_id: &str) -> AppResult<FieldOperation> {
        self.store
            .operations
            .get(operation_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Operation {}", operation_id)))
    }

    pub async fn create_operation(&self, input: CreateOperationInput) -> AppResult<FieldOperation> {
        input.validate()?;
        if self.store.safras.get(&input.safra_id).await.is_none() {
            return Err(AppError::NotFound(format!("Safra {}", input.safra_id)));
        }

        let operation = FieldOperation {
            id: String::new(),
            safra_id: input.safra_id,
            date: input.date,
            operation_type: input.operation_type,
            details: input.details,
            cost: input.cost,
        };
        check_operation(&operation)?;

        let operation = self.store.operations.insert(operation).await;
        tracing::info!(
            operation_id = %operation.id,
            safra_id = %operation.safra_id,
            operation_type = %operation.operation_type,
            "Field operation recorded"
        );
        Ok(operation)
    }

    pub async fn update_operation(
        &self,
        operation_id: &str,
        input: UpdateOperationInput,
    ) -> AppResult<FieldOperation> {
        input.validate()?;
        let mut operation = self.get_operation(operation_id).await?;

        if let Some(date) = input.date {
            operation.date = date;
        }
        if let Some(operation_type) = input.operation_type {
            operation.operation_type = operation_type;
        }
        if let Some(details) = input.details {
            operation.details = details;
        }
        if let Some(cost) = input.cost {
            operation.cost = cost;
        }
        check_operation(&operation)?;

        save(self.store.operations.as_ref(), "Operation", operation).await
    }

    pub async fn delete_operation(&self, operation_id: &str) -> AppResult<()> {
        if !self.store.operations.delete(operation_id).await {
            return Err(AppError::NotFound(format!("Operation {}", operation_id)));
        }
        tracing::info!(operation_id = %operation_id, "Field operation deleted");
        Ok(())
    }

    /// Sum of operation costs for a crop cycle
    pub async fn total_cost(&self, safra_id: &str) -> AppResult<Decimal> {
        let operations = self.list_operations(Some(safra_id)).await?;
        Ok(sum_or_zero(operations.iter().map(|o| o.cost)))
    }
}
