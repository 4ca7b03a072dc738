//! Crop cycle (safra) management service

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::{Safra, SoilAnalysis};
use crate::store::Store;
use shared::validation::{validate_area, validate_date_order, validate_record_date, validate_soil_ph};

/// Crop cycle service
#[derive(Clone)]
pub struct SafraService {
    store: Arc<Store>,
}

/// Input for opening a crop cycle
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSafraInput {
    #[validate(length(min = 1))]
    pub farm_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub culture: String,
    #[validate(length(max = 100))]
    pub variety: String,
    pub area: Decimal,
    pub start_date: String,
    pub soil_analysis: Option<SoilAnalysis>,
}

/// Input for updating a crop cycle
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSafraInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub culture: Option<String>,
    #[validate(length(max = 100))]
    pub variety: Option<String>,
    pub area: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_active: Option<bool>,
    pub soil_analysis: Option<SoilAnalysis>,
}

/// Field checks shared by create, update and finish
fn check_safra(safra: &Safra) -> AppResult<()> {
    check("area", validate_area(safra.area))?;
    check("start_date", validate_record_date(&safra.start_date))?;
    if let Some(end_date) = safra.end_date.as_deref() {
        check("end_date", validate_record_date(end_date))?;
    }
    check(
        "end_date",
        validate_date_order(&safra.start_date, safra.end_date.as_deref()),
    )?;
    if let Some(soil) = &safra.soil_analysis {
        check("soil_analysis.ph", validate_soil_ph(soil.ph))?;
    }
    Ok(())
}

impl SafraService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// List crop cycles in store order, optionally only the active ones
    pub async fn list_safras(&self, include_inactive: bool) -> AppResult<Vec<Safra>> {
        let safras = self.store.safras.list().await;
        Ok(safras
            .into_iter()
            .filter(|s| include_inactive || s.is_active)
            .collect())
    }

    pub async fn get_safra(&self, safra_id: &str) -> AppResult<Safra> {
        self.store
            .safras
            .get(safra_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Safra {}", safra_id)))
    }

    /// Open a new crop cycle; new cycles are always active
    pub async fn create_safra(&self, input: CreateSafraInput) -> AppResult<Safra> {
        input.validate()?;
        if self.store.farms.get(&input.farm_id).await.is_none() {
            return Err(AppError::NotFound(format!("Farm {}", input.farm_id)));
        }

        let safra = Safra {
            id: String::new(),
            farm_id: input.farm_id,
            name: input.name,
            culture: input.culture,
            variety: input.variety,
            area: input.area,
            start_date: input.start_date,
            end_date: None,
            is_active: true,
            soil_analysis: input.soil_analysis,
        };
        check_safra(&safra)?;

        let safra = self.store.safras.insert(safra).await;
        tracing::info!(safra_id = %safra.id, farm_id = %safra.farm_id, "Crop cycle created");
        Ok(safra)
    }

    pub async fn update_safra(&self, safra_id: &str, input: UpdateSafraInput) -> AppResult<Safra> {
        input.validate()?;
        let mut safra = self.get_safra(safra_id).await?;

        if let Some(name) = input.name {
            safra.name = name;
        }
        if let Some(culture) = input.culture {
            safra.culture = culture;
        }
        if let Some(variety) = input.variety {
            safra.variety = variety;
        }
        if let Some(area) = input.area {
            safra.area = area;
        }
        if let Some(start_date) = input.start_date {
            safra.start_date = start_date;
        }
        if input.end_date.is_some() {
            safra.end_date = input.end_date;
        }
        if let Some(is_active) = input.is_active {
            safra.is_active = is_active;
        }
        if input.soil_analysis.is_some() {
            safra.soil_analysis = input.soil_analysis;
        }
        check_safra(&safra)?;

        save(self.store.safras.as_ref(), "Safra", safra).await
    }

    /// Close a crop cycle on `end_date`
    pub async fn finish_safra(&self, safra_id: &str, end_date: String) -> AppResult<Safra> {
        let mut safra = self.get_safra(safra_id).await?;
        safra.end_date = Some(end_date);
        safra.is_active = false;
        check_safra(&safra)?;

        let safra = save(self.store.safras.as_ref(), "Safra", safra).await?;
        tracing::info!(safra_id = %safra.id, "Crop cycle finished");
        Ok(safra)
    }

    /// Delete a crop cycle; its operations, costs and harvests are kept and
    /// simply stop contributing to any indicator
    pub async fn delete_safra(&self, safra_id: &str) -> AppResult<()> {
        if !self.store.safras.delete(safra_id).await {
            return Err(AppError::NotFound(format!("Safra {}", safra_id)));
        }
        tracing::info!(safra_id = %safra_id, "Crop cycle deleted");
        Ok(())
    }
}
