//! Results dashboard service
//!
//! Runs the indicator calculator over a snapshot of the store.

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Safra, SafraIndicators};
use crate::store::Store;

#[derive(Clone)]
pub struct ResultsService {
    store: Arc<Store>,
}

/// One card of the results overview
#[derive(Debug, Clone, Serialize)]
pub struct SafraOverview {
    pub safra_id: String,
    pub name: String,
    pub culture: String,
    pub variety: String,
    pub area: Decimal,
    pub start_date: String,
    pub is_active: bool,
    pub status: String,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub gross_profit: Decimal,
    pub productivity: Decimal,
}

impl SafraOverview {
    fn new(safra: &Safra, indicators: &SafraIndicators) -> Self {
        Self {
            safra_id: safra.id.clone(),
            name: safra.name.clone(),
            culture: safra.culture.clone(),
            variety: safra.variety.clone(),
            area: safra.area,
            start_date: safra.start_date.clone(),
            is_active: safra.is_active,
            status: safra.status_label().to_string(),
            total_revenue: indicators.total_revenue,
            total_cost: indicators.total_cost,
            gross_profit: indicators.gross_profit,
            productivity: indicators.productivity,
        }
    }
}

impl ResultsService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Every crop cycle, newest start date first. Cycles whose start date
    /// cannot be parsed go last, keeping store order among equals.
    pub async fn overview(&self) -> AppResult<Vec<SafraOverview>> {
        let inputs = self.store.snapshot().await;

        let mut safras: Vec<&Safra> = inputs.safras.iter().collect();
        safras.sort_by(|a, b| b.parsed_start_date().cmp(&a.parsed_start_date()));

        tracing::debug!(safras = safras.len(), "Computing results overview");
        Ok(safras
            .into_iter()
            .map(|safra| SafraOverview::new(safra, &inputs.indicators_for(Some(safra))))
            .collect())
    }

    /// Full indicator set for one crop cycle
    pub async fn indicators_for(&self, safra_id: &str) -> AppResult<SafraIndicators> {
        let inputs = self.store.snapshot().await;
        let safra = inputs
            .safras
            .iter()
            .find(|s| s.id == safra_id)
            .ok_or_else(|| AppError::NotFound(format!("Safra {}", safra_id)))?;

        tracing::debug!(safra_id = %safra_id, "Calculating crop cycle indicators");
        Ok(inputs.indicators_for(Some(safra)))
    }
}
