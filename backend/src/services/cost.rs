//! Variable and fixed cost service

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::{Cost, CostKind};
use crate::store::Store;
use shared::validation::{
    validate_cost_assignment, validate_cost_category, validate_money, validate_record_date,
};

#[derive(Clone)]
pub struct CostService {
    store: Arc<Store>,
}

/// Input for recording a cost
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCostInput {
    pub kind: CostKind,
    /// Required for variable costs, absent for fixed costs
    pub safra_id: Option<String>,
    pub date: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: String,
    pub value: Decimal,
}

/// Input for updating a cost
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCostInput {
    pub kind: Option<CostKind>,
    pub safra_id: Option<String>,
    pub date: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub value: Option<Decimal>,
}

fn check_cost(cost: &Cost) -> AppResult<()> {
    check("safra_id", validate_cost_assignment(cost))?;
    check("category", validate_cost_category(cost.kind, &cost.category))?;
    check("date", validate_record_date(&cost.date))?;
    check("value", validate_money(cost.value))
}

impl CostService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Variable costs charged to one crop cycle
    pub async fn list_variable_costs(&self, safra_id: &str) -> AppResult<Vec<Cost>> {
        let costs = self.store.costs.list().await;
        Ok(costs
            .into_iter()
            .filter(|c| c.is_variable_for(safra_id))
            .collect())
    }

    /// Fixed costs of the whole operation
    pub async fn list_fixed_costs(&self) -> AppResult<Vec<Cost>> {
        let costs = self.store.costs.list().await;
        Ok(costs.into_iter().filter(Cost::is_fixed).collect())
    }

    pub async fn list_costs(&self) -> AppResult<Vec<Cost>> {
        Ok(self.store.costs.list().await)
    }

    pub async fn get_cost(&self, cost_id: &str) -> AppResult<Cost> {
        self.store
            .costs
            .get(cost_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Cost {}", cost_id)))
    }

    pub async fn create_cost(&self, input: CreateCostInput) -> AppResult<Cost> {
        input.validate()?;

        let cost = Cost {
            id: String::new(),
            safra_id: input.safra_id,
            date: input.date,
            kind: input.kind,
            category: input.category,
            description: input.description,
            value: input.value,
        };
        check_cost(&cost)?;
        self.ensure_safra_exists(&cost).await?;

        let cost = self.store.costs.insert(cost).await;
        tracing::info!(
            cost_id = %cost.id,
            kind = %cost.kind,
            category = %cost.category,
            "Cost recorded"
        );
        Ok(cost)
    }

    pub async fn update_cost(&self, cost_id: &str, input: UpdateCostInput) -> AppResult<Cost> {
        input.validate()?;
        let mut cost = self.get_cost(cost_id).await?;

        if let Some(kind) = input.kind {
            cost.kind = kind;
            if kind == CostKind::Fixed {
                cost.safra_id = None;
            }
        }
        if input.safra_id.is_some() {
            cost.safra_id = input.safra_id;
        }
        if let Some(date) = input.date {
            cost.date = date;
        }
        if let Some(category) = input.category {
            cost.category = category;
        }
        if let Some(description) = input.description {
            cost.description = description;
        }
        if let Some(value) = input.value {
            cost.value = value;
        }
        check_cost(&cost)?;
        self.ensure_safra_exists(&cost).await?;

        save(self.store.costs.as_ref(), "Cost", cost).await
    }

    pub async fn delete_cost(&self, cost_id: &str) -> AppResult<()> {
        if !self.store.costs.delete(cost_id).await {
            return Err(AppError::NotFound(format!("Cost {}", cost_id)));
        }
        tracing::info!(cost_id = %cost_id, "Cost deleted");
        Ok(())
    }

    async fn ensure_safra_exists(&self, cost: &Cost) -> AppResult<()> {
        if let Some(safra_id) = cost.safra_id.as_deref() {
            if self.store.safras.get(safra_id).await.is_none() {
                return Err(AppError::NotFound(format!("Safra {}", safra_id)));
            }
        }
        Ok(())
    }
}
