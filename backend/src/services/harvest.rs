//! Harvest (colheita) service

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::{Harvest, HarvestUnit};
use crate::store::Store;
use shared::types::sum_or_zero;
use shared::validation::{validate_harvest_quantity, validate_money, validate_record_date};

#[derive(Clone)]
pub struct HarvestService {
    store: Arc<Store>,
}

/// Input for recording a harvest
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHarvestInput {
    #[validate(length(min = 1))]
    pub safra_id: String,
    pub date: String,
    pub quantity: Decimal,
    pub unit: HarvestUnit,
    pub unit_price: Decimal,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub responsible: String,
}

/// Input for updating a harvest
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHarvestInput {
    pub date: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<HarvestUnit>,
    pub unit_price: Option<Decimal>,
    #[validate(length(max = 200))]
    pub responsible: Option<String>,
}

fn check_harvest(harvest: &Harvest) -> AppResult<()> {
    check("date", validate_record_date(&harvest.date))?;
    check("quantity", validate_harvest_quantity(harvest.quantity))?;
    check("unit_price", validate_money(harvest.unit_price))
}

impl HarvestService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_harvests(&self, safra_id: Option<&str>) -> AppResult<Vec<Harvest>> {
        let harvests = self.store.harvests.list().await;
        Ok(match safra_id {
            Some(id) => harvests.into_iter().filter(|h| h.safra_id == id).collect(),
            None => harvests,
        })
    }

    pub async fn get_harvest(&self, harvest_id: &str) -> AppResult<Harvest> {
        self.store
            .harvests
            .get(harvest_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Harvest {}", harvest_id)))
    }

    pub async fn record_harvest(&self, input: CreateHarvestInput) -> AppResult<Harvest> {
        input.validate()?;
        if self.store.safras.get(&input.safra_id).await.is_none() {
            return Err(AppError::NotFound(format!("Safra {}", input.safra_id)));
        }

        let harvest = Harvest {
            id: String::new(),
            safra_id: input.safra_id,
            date: input.date,
            quantity: input.quantity,
            unit: input.unit,
            unit_price: input.unit_price,
            responsible: input.responsible,
        };
        check_harvest(&harvest)?;

        let harvest = self.store.harvests.insert(harvest).await;
        tracing::info!(
            harvest_id = %harvest.id,
            safra_id = %harvest.safra_id,
            quantity = %harvest.quantity,
            unit = %harvest.unit,
            "Harvest recorded"
        );
        Ok(harvest)
    }

    pub async fn update_harvest(
        &self,
        harvest_id: &str,
        input: UpdateHarvestInput,
    ) -> AppResult<Harvest> {
        input.validate()?;
        let mut harvest = self.get_harvest(harvest_id).await?;

        if let Some(date) = input.date {
            harvest.date = date;
        }
        if let Some(quantity) = input.quantity {
            harvest.quantity = quantity;
        }
        if let Some(unit) = input.unit {
            harvest.unit = unit;
        }
        if let Some(unit_price) = input.unit_price {
            harvest.unit_price = unit_price;
        }
        if let Some(responsible) = input.responsible {
            harvest.responsible = responsible;
        }
        check_harvest(&harvest)?;

        save(self.store.harvests.as_ref(), "Harvest", harvest).await
    }

    pub async fn delete_harvest(&self, harvest_id: &str) -> AppResult<()> {
        if !self.store.harvests.delete(harvest_id).await {
            return Err(AppError::NotFound(format!("Harvest {}", harvest_id)));
        }
        tracing::info!(harvest_id = %harvest_id, "Harvest deleted");
        Ok(())
    }

    /// Quantity times unit price summed over a crop cycle's harvests
    pub async fn total_revenue(&self, safra_id: &str) -> AppResult<Decimal> {
        let harvests = self.list_harvests(Some(safra_id)).await?;
        Ok(sum_or_zero(harvests.iter().map(Harvest::revenue)))
    }
}
