//! Machinery and equipment service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::{Machinery, MachineryDepreciation};
use crate::store::Store;
use shared::assets::machinery_depreciation;
use shared::validation::{validate_money, validate_record_date, validate_residual_percentage};

#[derive(Clone)]
pub struct MachineryService {
    store: Arc<Store>,
}

/// Machine with its straight-line depreciation
#[derive(Debug, Clone, Serialize)]
pub struct MachineryWithDepreciation {
    #[serde(flatten)]
    pub machinery: Machinery,
    pub depreciation: MachineryDepreciation,
}

impl From<Machinery> for MachineryWithDepreciation {
    fn from(machinery: Machinery) -> Self {
        let depreciation = machinery_depreciation(&machinery);
        Self {
            machinery,
            depreciation,
        }
    }
}

/// Input for registering a machine
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMachineryInput {
    #[validate(length(min = 1))]
    pub farm_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub machine_type: String,
    pub acquisition_value: Decimal,
    pub acquisition_date: String,
    #[validate(range(min = 1, max = 100))]
    pub lifespan_years: u32,
    pub residual_value_percentage: Decimal,
}

/// Input for updating a machine
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMachineryInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub machine_type: Option<String>,
    pub acquisition_value: Option<Decimal>,
    pub acquisition_date: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub lifespan_years: Option<u32>,
    pub residual_value_percentage: Option<Decimal>,
}

fn check_machinery(machinery: &Machinery) -> AppResult<()> {
    check("acquisition_value", validate_money(machinery.acquisition_value))?;
    check("acquisition_date", validate_record_date(&machinery.acquisition_date))?;
    check(
        "residual_value_percentage",
        validate_residual_percentage(machinery.residual_value_percentage),
    )
}

impl MachineryService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Machines of one farm (or all) with their depreciation
    pub async fn list_machinery(
        &self,
        farm_id: Option<&str>,
    ) -> AppResult<Vec<MachineryWithDepreciation>> {
        let machinery = self.store.machinery.list().await;
        Ok(machinery
            .into_iter()
            .filter(|m| farm_id.map_or(true, |id| m.farm_id == id))
            .map(MachineryWithDepreciation::from)
            .collect())
    }

    pub async fn get_machinery(&self, machinery_id: &str) -> AppResult<MachineryWithDepreciation> {
        self.find(machinery_id).await.map(MachineryWithDepreciation::from)
    }

    pub async fn create_machinery(
        &self,
        input: CreateMachineryInput,
    ) -> AppResult<MachineryWithDepreciation> {
        input.validate()?;
        if self.store.farms.get(&input.farm_id).await.is_none() {
            return Err(AppError::NotFound(format!("Farm {}", input.farm_id)));
        }

        let machinery = Machinery {
            id: String::new(),
            farm_id: input.farm_id,
            name: input.name,
            machine_type: input.machine_type,
            acquisition_value: input.acquisition_value,
            acquisition_date: input.acquisition_date,
            lifespan_years: input.lifespan_years,
            residual_value_percentage: input.residual_value_percentage,
        };
        check_machinery(&machinery)?;

        let machinery = self.store.machinery.insert(machinery).await;
        tracing::info!(machinery_id = %machinery.id, farm_id = %machinery.farm_id, "Machine registered");
        Ok(machinery.into())
    }

    pub async fn update_machinery(
        &self,
        machinery_id: &str,
        input: UpdateMachineryInput,
    ) -> AppResult<MachineryWithDepreciation> {
        input.validate()?;
        let mut machinery = self.find(machinery_id).await?;

        if let Some(name) = input.name {
            machinery.name = name;
        }
        if let Some(machine_type) = input.machine_type {
            machinery.machine_type = machine_type;
        }
        if let Some(value) = input.acquisition_value {
            machinery.acquisition_value = value;
        }
        if let Some(date) = input.acquisition_date {
            machinery.acquisition_date = date;
        }
        if let Some(years) = input.lifespan_years {
            machinery.lifespan_years = years;
        }
        if let Some(percentage) = input.residual_value_percentage {
            machinery.residual_value_percentage = percentage;
        }
        check_machinery(&machinery)?;

        Ok(save(self.store.machinery.as_ref(), "Machinery", machinery)
            .await?
            .into())
    }

    pub async fn delete_machinery(&self, machinery_id: &str) -> AppResult<()> {
        if !self.store.machinery.delete(machinery_id).await {
            return Err(AppError::NotFound(format!("Machinery {}", machinery_id)));
        }
        tracing::info!(machinery_id = %machinery_id, "Machine deleted");
        Ok(())
    }

    async fn find(&self, machinery_id: &str) -> AppResult<Machinery> {
        self.store
            .machinery
            .get(machinery_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Machinery {}", machinery_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Fixtures;

    fn service() -> MachineryService {
        MachineryService::new(Arc::new(Store::from_fixtures(Fixtures::demo())))
    }

    #[tokio::test]
    async fn test_list_includes_depreciation() {
        let machinery = service().list_machinery(Some("farm1")).await.unwrap();
        assert_eq!(machinery.len(), 1);
        assert_eq!(machinery[0].depreciation.residual_value, Decimal::from(50_000));
        assert_eq!(machinery[0].depreciation.annual_depreciation, Decimal::from(20_000));
        assert!(service().list_machinery(Some("farm2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_residual_over_100() {
        let result = service()
            .create_machinery(CreateMachineryInput {
                farm_id: "farm1".to_string(),
                name: "Colheitadeira".to_string(),
                machine_type: "Colheitadeira".to_string(),
                acquisition_value: Decimal::from(900_000),
                acquisition_date: "2022-03-01".to_string(),
                lifespan_years: 12,
                residual_value_percentage: Decimal::from(120),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Validation { field, .. }) if field == "residual_value_percentage"
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_zero_lifespan() {
        let result = service()
            .create_machinery(CreateMachineryInput {
                farm_id: "farm1".to_string(),
                name: "Pulverizador".to_string(),
                machine_type: "Pulverizador".to_string(),
                acquisition_value: Decimal::from(80_000),
                acquisition_date: "2022-03-01".to_string(),
                lifespan_years: 0,
                residual_value_percentage: Decimal::from(10),
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_recomputes_depreciation() {
        let updated = service()
            .update_machinery(
                "mach1",
                UpdateMachineryInput {
                    lifespan_years: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.depreciation.annual_depreciation, Decimal::from(40_000));
    }
}
