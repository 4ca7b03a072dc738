//! Farm improvement (benfeitoria) service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::{check, save};
use crate::error::{AppError, AppResult};
use crate::models::{Improvement, ImprovementBalance, Installments};
use crate::store::Store;
use shared::assets::improvement_balance;
use shared::validation::{validate_installments, validate_money, validate_record_date};

#[derive(Clone)]
pub struct ImprovementService {
    store: Arc<Store>,
}

/// Improvement with its payment position
#[derive(Debug, Clone, Serialize)]
pub struct ImprovementWithBalance {
    #[serde(flatten)]
    pub improvement: Improvement,
    pub balance: ImprovementBalance,
}

impl From<Improvement> for ImprovementWithBalance {
    fn from(improvement: Improvement) -> Self {
        let balance = improvement_balance(&improvement);
        Self {
            improvement,
            balance,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateImprovementInput {
    #[validate(length(min = 1))]
    pub farm_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub total_value: Decimal,
    pub installments: Installments,
    pub payment_start_date: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateImprovementInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub total_value: Option<Decimal>,
    pub installments: Option<Installments>,
    pub payment_start_date: Option<String>,
}

fn check_improvement(improvement: &Improvement) -> AppResult<()> {
    check("total_value", validate_money(improvement.total_value))?;
    check(
        "installments",
        validate_installments(improvement.installments.current, improvement.installments.total),
    )?;
    check(
        "payment_start_date",
        validate_record_date(&improvement.payment_start_date),
    )
}

impl ImprovementService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_improvements(
        &self,
        farm_id: Option<&str>,
    ) -> AppResult<Vec<ImprovementWithBalance>> {
        let improvements = self.store.improvements.list().await;
        Ok(improvements
            .into_iter()
            .filter(|i| farm_id.map_or(true, |id| i.farm_id == id))
            .map(ImprovementWithBalance::from)
            .collect())
    }

    pub async fn get_improvement(&self, improvement_id: &str) -> AppResult<ImprovementWithBalance> {
        self.find(improvement_id).await.map(ImprovementWithBalance::from)
    }

    pub async fn create_improvement(
        &self,
        input: CreateImprovementInput,
    ) -> AppResult<ImprovementWithBalance> {
        input.validate()?;
        if self.store.farms.get(&input.farm_id).await.is_none() {
            return Err(AppError::NotFound(format!("Farm {}", input.farm_id)));
        }

        let improvement = Improvement {
            id: String::new(),
            farm_id: input.farm_id,
            name: input.name,
            total_value: input.total_value,
            installments: input.installments,
            payment_start_date: input.payment_start_date,
        };
        check_improvement(&improvement)?;

        let improvement = self.store.improvements.insert(improvement).await;
        tracing::info!(improvement_id = %improvement.id, farm_id = %improvement.farm_id, "Improvement registered");
        Ok(improvement.into())
    }

    pub async fn update_improvement(
        &self,
        improvement_id: &str,
        input: UpdateImprovementInput,
    ) -> AppResult<ImprovementWithBalance> {
        input.validate()?;
        let mut improvement = self.find(improvement_id).await?;

        if let Some(name) = input.name {
            improvement.name = name;
        }
        if let Some(total_value) = input.total_value {
            improvement.total_value = total_value;
        }
        if let Some(installments) = input.installments {
            improvement.installments = installments;
        }
        if let Some(date) = input.payment_start_date {
            improvement.payment_start_date = date;
        }
        check_improvement(&improvement)?;

        Ok(save(self.store.improvements.as_ref(), "Improvement", improvement)
            .await?
            .into())
    }

    pub async fn delete_improvement(&self, improvement_id: &str) -> AppResult<()> {
        if !self.store.improvements.delete(improvement_id).await {
            return Err(AppError::NotFound(format!("Improvement {}", improvement_id)));
        }
        tracing::info!(improvement_id = %improvement_id, "Improvement deleted");
        Ok(())
    }

    async fn find(&self, improvement_id: &str) -> AppResult<Improvement> {
        self.store
            .improvements
            .get(improvement_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Improvement {}", improvement_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Fixtures;

    fn service() -> ImprovementService {
        ImprovementService::new(Arc::new(Store::from_fixtures(Fixtures::demo())))
    }

    #[tokio::test]
    async fn test_silo_balance() {
        let silo = service().get_improvement("imp1").await.unwrap();
        assert_eq!(silo.balance.installment_value, Decimal::from(2_500));
        assert_eq!(silo.balance.balance_due, Decimal::from(75_000));
        assert_eq!(silo.balance.remaining_installments, 30);
    }

    #[tokio::test]
    async fn test_paid_cannot_exceed_total() {
        let result = service()
            .update_improvement(
                "imp1",
                UpdateImprovementInput {
                    installments: Some(Installments {
                        current: 61,
                        total: 60,
                    }),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(AppError::Validation { field, .. }) if field == "installments"
        ));
    }

    #[tokio::test]
    async fn test_create_for_farm() {
        let service = service();
        let created = service
            .create_improvement(CreateImprovementInput {
                farm_id: "farm2".to_string(),
                name: "Galpão".to_string(),
                total_value: Decimal::from(40_000),
                installments: Installments {
                    current: 0,
                    total: 10,
                },
                payment_start_date: "2024-01-05".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.balance.balance_due, Decimal::from(40_000));
        assert_eq!(service.list_improvements(Some("farm2")).await.unwrap().len(), 1);
    }
}
