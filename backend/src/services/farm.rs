//! Farm (propriedade) management service

use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::Farm;
use crate::store::Store;
use shared::types::GpsCoordinates;
use shared::validation::validate_coordinates;

/// Farm service for managing properties
#[derive(Clone)]
pub struct FarmService {
    store: Arc<Store>,
}

/// Input for creating a farm
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFarmInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(length(max = 200))]
    pub producer_name: Option<String>,
    pub coordinates: Option<GpsCoordinates>,
}

/// Input for updating a farm
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFarmInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 200))]
    pub producer_name: Option<String>,
    pub coordinates: Option<GpsCoordinates>,
}

fn check_coordinates(coordinates: Option<&GpsCoordinates>) -> AppResult<()> {
    match coordinates {
        Some(c) => check("coordinates", validate_coordinates(c.latitude, c.longitude)),
        None => Ok(()),
    }
}

impl FarmService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_farms(&self) -> AppResult<Vec<Farm>> {
        Ok(self.store.farms.list().await)
    }

    pub async fn get_farm(&self, farm_id: &str) -> AppResult<Farm> {
        self.store
            .farms
            .get(farm_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Farm {}", farm_id)))
    }

    pub async fn create_farm(&self, input: CreateFarmInput) -> AppResult<Farm> {
        input.validate()?;
        check_coordinates(input.coordinates.as_ref())?;

        let farm = self
            .store
            .farms
            .insert(Farm {
                id: String::new(),
                name: input.name,
                location: input.location,
                producer_name: input.producer_name,
                coordinates: input.coordinates,
            })
            .await;

        tracing::info!(farm_id = %farm.id, "Farm created");
        Ok(farm)
    }

    pub async fn update_farm(&self, farm_id: &str, input: UpdateFarmInput) -> AppResult<Farm> {
        input.validate()?;
        check_coordinates(input.coordinates.as_ref())?;

        let mut farm = self.get_farm(farm_id).await?;
        if let Some(name) = input.name {
            farm.name = name;
        }
        if let Some(location) = input.location {
            farm.location = location;
        }
        if input.producer_name.is_some() {
            farm.producer_name = input.producer_name;
        }
        if input.coordinates.is_some() {
            farm.coordinates = input.coordinates;
        }

        save(self.store.farms.as_ref(), "Farm", farm).await
    }

    /// Delete a farm that no crop cycle, machine or improvement refers to
    pub async fn delete_farm(&self, farm_id: &str) -> AppResult<()> {
        self.get_farm(farm_id).await?;

        let in_use = self.store.safras.list().await.iter().any(|s| s.farm_id == farm_id)
            || self.store.machinery.list().await.iter().any(|m| m.farm_id == farm_id)
            || self.store.improvements.list().await.iter().any(|i| i.farm_id == farm_id);
        if in_use {
            return Err(AppError::Conflict {
                resource: "farm".to_string(),
                message: format!("Farm {} still has crop cycles or assets", farm_id),
                message_pt: format!("A propriedade {} ainda possui safras ou bens", farm_id),
            });
        }

        self.store.farms.delete(farm_id).await;
        tracing::info!(farm_id = %farm_id, "Farm deleted");
        Ok(())
    }
}
